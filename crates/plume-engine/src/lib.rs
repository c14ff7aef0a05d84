//! Wavefront diffusion engine for Plume.
//!
//! [`DiffusionEngine`] owns a grid, its obstacle snapshot and the strength
//! field, and runs one diffusion at a time as an explicit resumable state
//! machine: [`start`](DiffusionEngine::start) seeds the frontier, each
//! [`step`](DiffusionEngine::step) processes one cell (or one wave in
//! [`ExpansionOrder::LayeredWave`]), and the strength field is readable
//! between steps without any locking.
//!
//! [`StepScheduler`] paces those steps against the host's clock and owns
//! the cancel-then-replace semantics for restarting a run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod flow;
pub(crate) mod frontier;
pub mod metrics;
pub mod reach;
pub mod scheduler;
pub mod strength;

pub use config::{
    ConfigError, CountLimitMode, DiffusionConfig, DiffusionConfigBuilder, DistanceMetric,
    ExpansionOrder, TerminationPolicy,
};
pub use engine::{DiffusionEngine, RunHandle, RunOutcome, RunStatus, RunSummary, StepResult};
pub use error::{InvalidStartReason, StartError};
pub use flow::FlowVector;
pub use metrics::RunMetrics;
pub use reach::reachable_cells;
pub use scheduler::{AdvanceReport, Cadence, SchedulerConfig, SchedulerError, StepScheduler};
pub use strength::StrengthField;
