//! Connected-component size from an origin, for strict cell budgets.

use std::collections::VecDeque;

use plume_space::{CellField, CellIndex, GridSpace, ObstacleMask};

/// Number of non-obstacle cells connected to `origin`, origin included.
///
/// Connectivity is 4-neighbour, or 8-neighbour when `corner_cutting` is
/// allowed. Without corner cutting a gated diagonal only ever reaches cells
/// that are also reachable orthogonally, so the 4-connected component is
/// exactly what a run can visit.
///
/// Returns 0 if `origin` is itself an obstacle.
pub fn reachable_cells(
    space: &GridSpace,
    obstacles: &ObstacleMask,
    origin: CellIndex,
    corner_cutting: bool,
) -> usize {
    if obstacles.is_blocked(origin) {
        return 0;
    }
    let mut seen = CellField::new(space, false);
    let mut queue = VecDeque::new();
    seen[origin] = true;
    queue.push_back(origin);
    let mut count = 1;

    while let Some(idx) = queue.pop_front() {
        for (dir, n) in space.neighbours(space.coord_of(idx)) {
            if dir.is_diagonal() && !corner_cutting {
                continue;
            }
            if seen[n] || obstacles.is_blocked(n) {
                continue;
            }
            seen[n] = true;
            count += 1;
            queue.push_back(n);
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::CellCoord;
    use plume_space::WorldPoint;

    fn space(w: u32, h: u32) -> GridSpace {
        GridSpace::new(w, h, 1.0, WorldPoint::ZERO).unwrap()
    }

    #[test]
    fn open_grid_is_fully_reachable() {
        let s = space(6, 4);
        let mask = ObstacleMask::empty(&s);
        let origin = s.index_of(CellCoord::new(2, 2)).unwrap();
        assert_eq!(reachable_cells(&s, &mask, origin, false), 24);
    }

    #[test]
    fn wall_splits_grid() {
        let s = space(5, 3);
        let wall = (0..3).map(|y| CellCoord::new(2, y));
        let mask = ObstacleMask::from_coords(&s, wall).unwrap();
        let origin = s.index_of(CellCoord::new(0, 1)).unwrap();
        assert_eq!(reachable_cells(&s, &mask, origin, false), 6);
        assert_eq!(reachable_cells(&s, &mask, origin, true), 6);
    }

    #[test]
    fn diagonal_gap_needs_corner_cutting() {
        // # .
        // o #     (y grows upward; origin at (0,0))
        let s = space(2, 2);
        let mask =
            ObstacleMask::from_coords(&s, [CellCoord::new(1, 0), CellCoord::new(0, 1)]).unwrap();
        let origin = s.index_of(CellCoord::new(0, 0)).unwrap();
        assert_eq!(reachable_cells(&s, &mask, origin, false), 1);
        assert_eq!(reachable_cells(&s, &mask, origin, true), 2);
    }

    #[test]
    fn blocked_origin_reaches_nothing() {
        let s = space(3, 3);
        let mask = ObstacleMask::from_coords(&s, [CellCoord::new(1, 1)]).unwrap();
        let origin = s.index_of(CellCoord::new(1, 1)).unwrap();
        assert_eq!(reachable_cells(&s, &mask, origin, false), 0);
    }
}
