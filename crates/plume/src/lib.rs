//! Plume: wavefront gas and smoke diffusion over a 2D grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Plume sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use plume::prelude::*;
//!
//! // A 20×12 grid of half-metre cells with a pillar in the middle.
//! let grid = GridSpace::new(20, 12, 0.5, WorldPoint::ZERO).unwrap();
//! let pillar = |c: CellCoord| (9..=10).contains(&c.x) && (5..=6).contains(&c.y);
//! let engine = DiffusionEngine::with_oracle(grid, &pillar);
//!
//! let mut smoke = StepScheduler::new(engine, SchedulerConfig::default()).unwrap();
//! let config = DiffusionConfig::builder()
//!     .strength_threshold(0.2)
//!     .decay_per_unit_distance(0.1)
//!     .build()
//!     .unwrap();
//! smoke.start_run(3, 6, &config, PriorOutput::Discard).unwrap();
//!
//! // Drive from the game loop at 60 fps until the cloud settles.
//! let frame = std::time::Duration::from_micros(16_667);
//! while smoke.engine().is_running() {
//!     smoke.advance(frame);
//! }
//!
//! let field = smoke.engine().field();
//! assert!(field.strength(3, 6) > field.strength(6, 6));
//! assert!(!field.is_visited(9, 5));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plume-core` | Coordinates, run ids, events, oracle and read traits |
//! | [`space`] | `plume-space` | Grid geometry, cell fields, obstacle snapshots |
//! | [`engine`] | `plume-engine` | Diffusion engine, configuration, scheduler |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinates, ids, events and the consumed/exposed traits (`plume-core`).
pub use plume_core as types;

/// Grid geometry and obstacle snapshots (`plume-space`).
///
/// [`space::GridSpace`] maps between world points and cells;
/// [`space::ObstacleMask`] is the one-shot obstacle snapshot.
pub use plume_space as space;

/// The diffusion engine and its scheduler (`plume-engine`).
///
/// [`engine::DiffusionEngine`] for manual stepping,
/// [`engine::StepScheduler`] for frame-paced stepping.
pub use plume_engine as engine;

/// Common imports for typical Plume usage.
///
/// ```rust
/// use plume::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use plume_core::{
        CellCoord, CellFilled, CompletionReason, ObstacleOracle, PriorOutput, RunEvent, RunId,
        StrengthRead,
    };

    // Space
    pub use plume_space::{GridSpace, ObstacleMask, SpaceError, WorldPoint};

    // Engine
    pub use plume_engine::{
        Cadence, ConfigError, DiffusionConfig, DiffusionEngine, DistanceMetric, ExpansionOrder,
        RunStatus, SchedulerConfig, SchedulerError, StartError, StepScheduler, StrengthField,
        TerminationPolicy,
    };
}
