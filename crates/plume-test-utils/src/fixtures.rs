//! Reusable grid fixtures.

use std::cell::Cell;

use plume_core::{CellCoord, ObstacleOracle};
use plume_space::{GridSpace, ObstacleMask, WorldPoint};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A `w × h` grid of unit cells at the world origin.
pub fn unit_grid(w: u32, h: u32) -> GridSpace {
    GridSpace::new(w, h, 1.0, WorldPoint::ZERO).expect("valid fixture grid")
}

/// Block roughly `density` of the cells of `space`, deterministically for
/// a given `seed`. Cells listed in `keep_open` are never blocked.
pub fn random_obstacles(
    space: &GridSpace,
    density: f64,
    seed: u64,
    keep_open: &[CellCoord],
) -> ObstacleMask {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let threshold = (density.clamp(0.0, 1.0) * u32::MAX as f64) as u32;
    let blocked: Vec<CellCoord> = space
        .coords()
        .filter(|_| rng.next_u32() < threshold)
        .filter(|c| !keep_open.contains(c))
        .collect();
    ObstacleMask::from_coords(space, blocked).expect("fixture coords are in bounds")
}

/// An oracle that counts how often it is asked.
pub struct CountingOracle<F> {
    inner: F,
    calls: Cell<usize>,
}

impl<F: Fn(CellCoord) -> bool> CountingOracle<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<F: Fn(CellCoord) -> bool> ObstacleOracle for CountingOracle<F> {
    fn obstacle_at(&self, coord: CellCoord) -> bool {
        self.calls.set(self.calls.get() + 1);
        (self.inner)(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_obstacles_are_seeded() {
        let g = unit_grid(16, 16);
        let a = random_obstacles(&g, 0.3, 7, &[]);
        let b = random_obstacles(&g, 0.3, 7, &[]);
        assert_eq!(a, b);
        assert!(a.obstacle_count() > 0);
        assert!(a.obstacle_count() < 256);
    }

    #[test]
    fn keep_open_is_respected() {
        let g = unit_grid(4, 4);
        let keep = [CellCoord::new(2, 2)];
        let mask = random_obstacles(&g, 1.0, 1, &keep);
        assert!(!mask.is_blocked_at(CellCoord::new(2, 2)));
    }

    #[test]
    fn counting_oracle_counts() {
        let oracle = CountingOracle::new(|c: CellCoord| c.x == 0);
        let mask = ObstacleMask::snapshot(&unit_grid(3, 2), &oracle);
        assert_eq!(oracle.calls(), 6);
        assert_eq!(mask.obstacle_count(), 2);
    }
}
