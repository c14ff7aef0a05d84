//! Benchmark profiles for the Plume diffusion engine.
//!
//! - [`reference_profile`]: 128x128 grid (16K cells), ~15% obstacles
//! - [`stress_profile`]: 512x512 grid (~262K cells), ~15% obstacles
//! - [`scatter_obstacles`]: deterministic obstacle placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use plume_core::CellCoord;
use plume_engine::{DiffusionConfig, DiffusionEngine, ExpansionOrder};
use plume_space::{GridSpace, ObstacleMask, WorldPoint};

/// A grid plus its obstacle snapshot, ready to build engines from.
#[derive(Clone, Debug)]
pub struct Profile {
    /// The grid.
    pub space: GridSpace,
    /// Obstacles; the centre cell is always open.
    pub obstacles: ObstacleMask,
    /// The centre cell, used as the run origin.
    pub origin: CellCoord,
}

impl Profile {
    /// Build a fresh engine for this profile.
    pub fn engine(&self) -> DiffusionEngine {
        DiffusionEngine::new(self.space.clone(), self.obstacles.clone())
            .expect("profile mask matches its grid")
    }
}

/// 128x128 unit cells with ~15% obstacles.
pub fn reference_profile(seed: u64) -> Profile {
    square_profile(128, 15, seed)
}

/// 512x512 unit cells with ~15% obstacles.
pub fn stress_profile(seed: u64) -> Profile {
    square_profile(512, 15, seed)
}

fn square_profile(side: u32, percent: u64, seed: u64) -> Profile {
    let space = GridSpace::new(side, side, 1.0, WorldPoint::ZERO).expect("non-empty grid");
    let origin = CellCoord::new(side as i32 / 2, side as i32 / 2);
    let obstacles = scatter_obstacles(&space, percent, seed, origin);
    Profile {
        space,
        obstacles,
        origin,
    }
}

/// Block about `percent`% of cells, deterministically for `seed`, never
/// blocking `keep_open`.
pub fn scatter_obstacles(
    space: &GridSpace,
    percent: u64,
    seed: u64,
    keep_open: CellCoord,
) -> ObstacleMask {
    let blocked = space.coords().enumerate().filter_map(|(i, c)| {
        let h = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add((i as u64).wrapping_mul(1442695040888963407));
        ((h >> 33) % 100 < percent && c != keep_open).then_some(c)
    });
    ObstacleMask::from_coords(space, blocked).expect("coords come from the grid")
}

/// Fill-until-exhausted config: threshold 0.05 with decay 0.02 reaches
/// out to distance 47.5.
pub fn wide_config(order: ExpansionOrder) -> DiffusionConfig {
    DiffusionConfig::builder()
        .strength_threshold(0.05)
        .decay_per_unit_distance(0.02)
        .order(order)
        .build()
        .expect("valid bench config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_keeps_origin_open() {
        let p = reference_profile(42);
        assert!(!p.obstacles.is_blocked_at(p.origin));
        let ratio = p.obstacles.obstacle_count() as f64 / p.space.cell_count() as f64;
        assert!((0.05..0.25).contains(&ratio), "{ratio}");
    }

    #[test]
    fn scatter_is_deterministic() {
        let space = GridSpace::new(32, 32, 1.0, WorldPoint::ZERO).unwrap();
        let a = scatter_obstacles(&space, 20, 7, CellCoord::new(0, 0));
        let b = scatter_obstacles(&space, 20, 7, CellCoord::new(0, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn wide_config_runs_to_completion() {
        let p = reference_profile(1);
        let mut e = p.engine();
        e.start(p.origin, &wide_config(ExpansionOrder::GreedyNearest))
            .unwrap();
        let summary = e.run_to_completion().unwrap();
        assert!(summary.cells_filled > 1);
    }
}
