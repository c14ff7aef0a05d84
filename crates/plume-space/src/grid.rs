//! The fixed-size 2D grid and its world-space transforms.

use crate::direction::Direction;
use crate::error::SpaceError;
use crate::field::CellIndex;
use crate::point::WorldPoint;
use plume_core::CellCoord;
use smallvec::SmallVec;

/// A rectangular grid of square cells anchored in world space.
///
/// Cell `(x, y)` covers the world-space square
/// `[origin.x + x*size, origin.x + (x+1)*size) × [origin.y + y*size, origin.y + (y+1)*size)`.
/// Width, height, cell size and origin are fixed at construction; the grid
/// is never resized.
///
/// # Examples
///
/// ```
/// use plume_core::CellCoord;
/// use plume_space::{GridSpace, WorldPoint};
///
/// let grid = GridSpace::new(10, 8, 0.5, WorldPoint::new(-2.5, -2.0)).unwrap();
/// assert_eq!(grid.cell_count(), 80);
///
/// let c = grid.world_to_cell(WorldPoint::new(-2.4, -1.9)).unwrap();
/// assert_eq!(c, CellCoord::new(0, 0));
/// assert_eq!(grid.cell_center(c), WorldPoint::new(-2.25, -1.75));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpace {
    width: u32,
    height: u32,
    cell_size: f64,
    origin: WorldPoint,
}

impl GridSpace {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a grid of `width × height` cells of side `cell_size`, whose
    /// lower-left corner sits at `origin`.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0,
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`,
    /// `Err(SpaceError::InvalidCellSize)` for a non-finite or non-positive
    /// size, and `Err(SpaceError::InvalidOrigin)` for a non-finite origin.
    pub fn new(
        width: u32,
        height: u32,
        cell_size: f64,
        origin: WorldPoint,
    ) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SpaceError::InvalidCellSize { value: cell_size });
        }
        if !origin.is_finite() {
            return Err(SpaceError::InvalidOrigin);
        }
        Ok(Self {
            width,
            height,
            cell_size,
            origin,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Side length of one cell in world units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World-space position of the grid's lower-left corner.
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `coord` lies in `[0, width) × [0, height)`.
    pub fn is_in_bounds(&self, coord: CellCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    /// Bounds-check `coord` and return its dense index.
    pub fn index_of(&self, coord: CellCoord) -> Option<CellIndex> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        Some(CellIndex::new(
            coord.y as usize * self.width as usize + coord.x as usize,
        ))
    }

    /// Like [`index_of`](Self::index_of) but with a descriptive error.
    pub fn checked_index(&self, coord: CellCoord) -> Result<CellIndex, SpaceError> {
        self.index_of(coord)
            .ok_or_else(|| SpaceError::CoordOutOfBounds {
                coord,
                bounds: self.bounds_description(),
            })
    }

    /// Coordinate of a dense index produced by this grid.
    pub fn coord_of(&self, index: CellIndex) -> CellCoord {
        let w = self.width as usize;
        CellCoord::new((index.get() % w) as i32, (index.get() / w) as i32)
    }

    /// The cell containing `point`, by floor division of the offset from
    /// the origin. `None` if the point falls outside the grid or is not
    /// finite.
    pub fn world_to_cell(&self, point: WorldPoint) -> Option<CellCoord> {
        let fx = ((point.x - self.origin.x) / self.cell_size).floor();
        let fy = ((point.y - self.origin.y) / self.cell_size).floor();
        if !fx.is_finite() || !fy.is_finite() {
            return None;
        }
        if fx < 0.0 || fy < 0.0 || fx >= self.width as f64 || fy >= self.height as f64 {
            return None;
        }
        Some(CellCoord::new(fx as i32, fy as i32))
    }

    /// World-space centre of `coord`.
    ///
    /// Defined for any coordinate, including out-of-bounds ones, so that
    /// callers can place effects just beyond the edge if they need to.
    pub fn cell_center(&self, coord: CellCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (coord.x as f64 + 0.5) * self.cell_size,
            self.origin.y + (coord.y as f64 + 0.5) * self.cell_size,
        )
    }

    /// All coordinates in row-major order: `(0,0), (1,0), …, (w-1,h-1)`.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| CellCoord::new(x, y)))
    }

    /// In-bounds neighbours of `coord`, in [`Direction::ALL`] order.
    pub fn neighbours(&self, coord: CellCoord) -> SmallVec<[(Direction, CellIndex); 8]> {
        self.neighbours_in(coord, &Direction::ALL)
    }

    /// In-bounds neighbours of `coord`, visiting `order` in turn.
    pub fn neighbours_in(
        &self,
        coord: CellCoord,
        order: &[Direction],
    ) -> SmallVec<[(Direction, CellIndex); 8]> {
        let mut out = SmallVec::new();
        for &dir in order {
            let (dx, dy) = dir.offset();
            if let Some(idx) = self.index_of(coord.offset(dx, dy)) {
                out.push((dir, idx));
            }
        }
        out
    }

    fn bounds_description(&self) -> String {
        format!("[0, {}) x [0, {})", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit(w: u32, h: u32) -> GridSpace {
        GridSpace::new(w, h, 1.0, WorldPoint::ZERO).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn rejects_empty() {
        assert_eq!(
            GridSpace::new(0, 5, 1.0, WorldPoint::ZERO),
            Err(SpaceError::EmptySpace)
        );
        assert_eq!(
            GridSpace::new(5, 0, 1.0, WorldPoint::ZERO),
            Err(SpaceError::EmptySpace)
        );
    }

    #[test]
    fn rejects_oversized_dimension() {
        let err = GridSpace::new(GridSpace::MAX_DIM + 1, 1, 1.0, WorldPoint::ZERO).unwrap_err();
        assert!(matches!(
            err,
            SpaceError::DimensionTooLarge { name: "width", .. }
        ));
    }

    #[test]
    fn rejects_bad_cell_size() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = GridSpace::new(4, 4, size, WorldPoint::ZERO).unwrap_err();
            assert!(matches!(err, SpaceError::InvalidCellSize { .. }), "{size}");
        }
    }

    #[test]
    fn rejects_non_finite_origin() {
        let err = GridSpace::new(4, 4, 1.0, WorldPoint::new(f64::NAN, 0.0)).unwrap_err();
        assert_eq!(err, SpaceError::InvalidOrigin);
    }

    // ── Transforms ──────────────────────────────────────────────

    #[test]
    fn world_to_cell_floors() {
        let g = GridSpace::new(4, 4, 2.0, WorldPoint::new(10.0, 10.0)).unwrap();
        assert_eq!(
            g.world_to_cell(WorldPoint::new(10.0, 10.0)),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(
            g.world_to_cell(WorldPoint::new(11.99, 13.5)),
            Some(CellCoord::new(0, 1))
        );
        assert_eq!(
            g.world_to_cell(WorldPoint::new(17.999, 17.999)),
            Some(CellCoord::new(3, 3))
        );
    }

    #[test]
    fn world_to_cell_outside_is_none() {
        let g = GridSpace::new(4, 4, 2.0, WorldPoint::new(10.0, 10.0)).unwrap();
        assert_eq!(g.world_to_cell(WorldPoint::new(9.99, 11.0)), None);
        assert_eq!(g.world_to_cell(WorldPoint::new(18.0, 11.0)), None);
        assert_eq!(g.world_to_cell(WorldPoint::new(11.0, 18.0)), None);
        assert_eq!(g.world_to_cell(WorldPoint::new(f64::NAN, 11.0)), None);
    }

    #[test]
    fn cell_center_is_half_offset() {
        let g = GridSpace::new(4, 4, 2.0, WorldPoint::new(-4.0, 0.0)).unwrap();
        assert_eq!(
            g.cell_center(CellCoord::new(1, 2)),
            WorldPoint::new(-1.0, 5.0)
        );
    }

    // ── Indexing ────────────────────────────────────────────────

    #[test]
    fn index_round_trip() {
        let g = unit(5, 3);
        for c in g.coords() {
            let idx = g.index_of(c).unwrap();
            assert_eq!(g.coord_of(idx), c);
        }
        assert_eq!(g.coords().count(), 15);
    }

    #[test]
    fn checked_index_reports_bounds() {
        let g = unit(5, 3);
        let err = g.checked_index(CellCoord::new(5, 0)).unwrap_err();
        assert!(err.to_string().contains("[0, 5) x [0, 3)"));
    }

    // ── Neighbours ──────────────────────────────────────────────

    #[test]
    fn interior_has_eight_neighbours() {
        let g = unit(5, 5);
        let n = g.neighbours(CellCoord::new(2, 2));
        assert_eq!(n.len(), 8);
        let dirs: Vec<Direction> = n.iter().map(|(d, _)| *d).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());
    }

    #[test]
    fn corner_has_three_neighbours() {
        let g = unit(5, 5);
        let n = g.neighbours(CellCoord::new(0, 0));
        let dirs: Vec<Direction> = n.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            dirs,
            vec![Direction::East, Direction::North, Direction::NorthEast]
        );
    }

    #[test]
    fn neighbours_in_follows_given_order() {
        let g = unit(5, 5);
        let dirs: Vec<Direction> = g
            .neighbours_in(CellCoord::new(0, 0), &Direction::PATH_ORDER)
            .iter()
            .map(|(d, _)| *d)
            .collect();
        assert_eq!(
            dirs,
            vec![Direction::North, Direction::East, Direction::NorthEast]
        );
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let g = unit(1, 1);
        assert!(g.neighbours(CellCoord::new(0, 0)).is_empty());
    }

    proptest! {
        #[test]
        fn center_maps_back_to_cell(
            w in 1u32..40,
            h in 1u32..40,
            size in 0.01f64..10.0,
            ox in -100.0f64..100.0,
            oy in -100.0f64..100.0,
            x in 0i32..40,
            y in 0i32..40,
        ) {
            let g = GridSpace::new(w, h, size, WorldPoint::new(ox, oy)).unwrap();
            let c = CellCoord::new(x % w as i32, y % h as i32);
            prop_assert_eq!(g.world_to_cell(g.cell_center(c)), Some(c));
        }

        #[test]
        fn world_to_cell_results_are_in_bounds(
            w in 1u32..20,
            h in 1u32..20,
            px in -50.0f64..50.0,
            py in -50.0f64..50.0,
        ) {
            let g = GridSpace::new(w, h, 1.5, WorldPoint::new(-3.0, -3.0)).unwrap();
            if let Some(c) = g.world_to_cell(WorldPoint::new(px, py)) {
                prop_assert!(g.is_in_bounds(c));
            }
        }
    }
}
