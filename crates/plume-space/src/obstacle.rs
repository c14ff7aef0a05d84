//! One-shot obstacle snapshots.

use crate::error::SpaceError;
use crate::field::{CellField, CellIndex};
use crate::grid::GridSpace;
use plume_core::{CellCoord, ObstacleOracle};

/// Immutable per-cell obstacle flags for one grid.
///
/// Built once, before any run, by querying an [`ObstacleOracle`] for every
/// cell. There is no refresh: if the scene changes, take a new snapshot
/// and build a new engine around it.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleMask {
    blocked: CellField<bool>,
    count: usize,
}

impl ObstacleMask {
    /// A mask with no obstacles.
    pub fn empty(space: &GridSpace) -> Self {
        Self {
            blocked: CellField::new(space, false),
            count: 0,
        }
    }

    /// Query `oracle` exactly once per cell of `space`.
    pub fn snapshot(space: &GridSpace, oracle: &impl ObstacleOracle) -> Self {
        let mut blocked = CellField::new(space, false);
        let mut count = 0;
        for coord in space.coords() {
            if oracle.obstacle_at(coord) {
                if let Some(idx) = space.index_of(coord) {
                    blocked[idx] = true;
                    count += 1;
                }
            }
        }
        Self { blocked, count }
    }

    /// Mark exactly the listed cells as obstacles.
    ///
    /// Duplicates are allowed. Returns an error on the first
    /// out-of-bounds coordinate.
    pub fn from_coords(
        space: &GridSpace,
        coords: impl IntoIterator<Item = CellCoord>,
    ) -> Result<Self, SpaceError> {
        let mut mask = Self::empty(space);
        for coord in coords {
            let idx = space.checked_index(coord)?;
            if !mask.blocked[idx] {
                mask.blocked[idx] = true;
                mask.count += 1;
            }
        }
        Ok(mask)
    }

    /// Check that this mask was built for `space`.
    pub fn check_shape(&self, space: &GridSpace) -> Result<(), SpaceError> {
        if self.blocked.matches(space) {
            Ok(())
        } else {
            Err(SpaceError::ShapeMismatch {
                expected: (space.width(), space.height()),
                actual: self.blocked.dims(),
            })
        }
    }

    /// Whether the cell at `index` is blocked.
    pub fn is_blocked(&self, index: CellIndex) -> bool {
        self.blocked[index]
    }

    /// Whether `coord` is blocked. Out-of-bounds coordinates read as
    /// not blocked; bounds are the grid's business.
    pub fn is_blocked_at(&self, coord: CellCoord) -> bool {
        self.blocked.get(coord).copied().unwrap_or(false)
    }

    /// Number of blocked cells.
    pub fn obstacle_count(&self) -> usize {
        self.count
    }

    /// Number of cells that are not blocked.
    pub fn open_count(&self) -> usize {
        self.blocked.len() - self.count
    }

    /// Iterate blocked coordinates in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.blocked
            .iter()
            .filter(|(_, &b)| b)
            .map(|(c, _)| c)
    }
}

impl ObstacleOracle for ObstacleMask {
    fn obstacle_at(&self, coord: CellCoord) -> bool {
        self.is_blocked_at(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::WorldPoint;
    use std::cell::Cell;

    fn space(w: u32, h: u32) -> GridSpace {
        GridSpace::new(w, h, 1.0, WorldPoint::ZERO).unwrap()
    }

    #[test]
    fn snapshot_queries_each_cell_once() {
        let s = space(4, 3);
        let calls = Cell::new(0usize);
        let oracle = |c: CellCoord| {
            calls.set(calls.get() + 1);
            c.x == 1
        };
        let mask = ObstacleMask::snapshot(&s, &oracle);
        assert_eq!(calls.get(), 12);
        assert_eq!(mask.obstacle_count(), 3);
        assert_eq!(mask.open_count(), 9);
        assert!(mask.is_blocked_at(CellCoord::new(1, 2)));
        assert!(!mask.is_blocked_at(CellCoord::new(0, 2)));
    }

    #[test]
    fn from_coords_deduplicates() {
        let s = space(3, 3);
        let mask = ObstacleMask::from_coords(
            &s,
            [CellCoord::new(1, 1), CellCoord::new(1, 1), CellCoord::new(0, 2)],
        )
        .unwrap();
        assert_eq!(mask.obstacle_count(), 2);
        let listed: Vec<CellCoord> = mask.obstacles().collect();
        assert_eq!(listed, vec![CellCoord::new(1, 1), CellCoord::new(0, 2)]);
    }

    #[test]
    fn from_coords_rejects_out_of_bounds() {
        let s = space(3, 3);
        let err = ObstacleMask::from_coords(&s, [CellCoord::new(3, 0)]).unwrap_err();
        assert!(matches!(err, SpaceError::CoordOutOfBounds { .. }));
    }

    #[test]
    fn out_of_bounds_reads_open() {
        let s = space(2, 2);
        let mask = ObstacleMask::snapshot(&s, &|_: CellCoord| true);
        assert!(!mask.is_blocked_at(CellCoord::new(-1, 0)));
        assert_eq!(mask.open_count(), 0);
    }

    #[test]
    fn shape_check_catches_foreign_grid() {
        let mask = ObstacleMask::empty(&space(3, 3));
        assert!(mask.check_shape(&space(3, 3)).is_ok());
        assert_eq!(
            mask.check_shape(&space(4, 3)),
            Err(SpaceError::ShapeMismatch {
                expected: (4, 3),
                actual: (3, 3),
            })
        );
    }

    #[test]
    fn mask_is_itself_an_oracle() {
        let s = space(3, 3);
        let original = ObstacleMask::from_coords(&s, [CellCoord::new(2, 2)]).unwrap();
        let copy = ObstacleMask::snapshot(&s, &original);
        assert_eq!(copy, original);
    }
}
