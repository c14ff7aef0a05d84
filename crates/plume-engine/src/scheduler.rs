//! Paces engine steps against host time.
//!
//! The host calls [`StepScheduler::advance`] once per frame with the frame
//! time; the scheduler accumulates it and runs one engine step per elapsed
//! interval. The first step of a new run is due immediately, and at most
//! [`SchedulerConfig::max_steps_per_advance`] steps run per call so that a
//! long hitch cannot turn into a catch-up spiral.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use crossbeam_channel::Receiver;
use log::warn;

use plume_core::{CellCoord, CellFilled, PriorOutput, RunEvent};

use crate::config::DiffusionConfig;
use crate::engine::{DiffusionEngine, RunHandle, RunStatus, RunSummary};
use crate::error::StartError;

/// How often engine steps happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    /// One step per interval of host time.
    Every(Duration),
    /// Up to the step cap on every advance, regardless of elapsed time.
    Unpaced,
}

/// Scheduler configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Step cadence. Default: one step every 5 ms.
    pub cadence: Cadence,
    /// Upper bound on steps per [`StepScheduler::advance`]. Default: 64.
    pub max_steps_per_advance: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cadence: Cadence::Every(Duration::from_millis(5)),
            max_steps_per_advance: 64,
        }
    }
}

impl SchedulerConfig {
    /// Check that the cadence can make progress.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.cadence == Cadence::Every(Duration::ZERO) {
            return Err(SchedulerError::ZeroInterval);
        }
        if self.max_steps_per_advance == 0 {
            return Err(SchedulerError::ZeroStepCap);
        }
        Ok(())
    }
}

/// A [`SchedulerConfig`] that could never step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    /// A paced cadence has a zero interval.
    ZeroInterval,
    /// `max_steps_per_advance` is zero.
    ZeroStepCap,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "step interval must be non-zero"),
            Self::ZeroStepCap => write!(f, "max_steps_per_advance must be at least 1"),
        }
    }
}

impl Error for SchedulerError {}

/// What one [`StepScheduler::advance`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvanceReport {
    /// Engine steps taken.
    pub steps: u32,
    /// Cells processed, in expansion order.
    pub filled: Vec<CellFilled>,
    /// Engine state afterwards.
    pub status: RunStatus,
    /// Host time discarded because the step cap was hit.
    pub dropped: Duration,
}

/// Owns a [`DiffusionEngine`] and drives it at a fixed cadence.
#[derive(Debug)]
pub struct StepScheduler {
    engine: DiffusionEngine,
    config: SchedulerConfig,
    accumulated: Duration,
}

impl StepScheduler {
    /// Wrap `engine`.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::ZeroInterval`] or [`SchedulerError::ZeroStepCap`].
    pub fn new(engine: DiffusionEngine, config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            accumulated: Duration::ZERO,
        })
    }

    /// Start a run at `(x, y)`, cancelling the run in progress first.
    ///
    /// The logical field is reset either way; `prior_output` only tells
    /// subscribers whether to keep what the replaced run rendered.
    pub fn start_run(
        &mut self,
        x: i32,
        y: i32,
        config: &DiffusionConfig,
        prior_output: PriorOutput,
    ) -> Result<RunHandle, StartError> {
        let handle = self
            .engine
            .start_with(CellCoord::new(x, y), config, prior_output)?;
        self.accumulated = match self.config.cadence {
            Cadence::Every(interval) => interval,
            Cadence::Unpaced => Duration::ZERO,
        };
        Ok(handle)
    }

    /// Account for `elapsed` host time and run the steps now due.
    pub fn advance(&mut self, elapsed: Duration) -> AdvanceReport {
        let mut report = AdvanceReport {
            steps: 0,
            filled: Vec::new(),
            status: self.engine.status(),
            dropped: Duration::ZERO,
        };
        if !self.engine.is_running() {
            self.accumulated = Duration::ZERO;
            return report;
        }

        let cap = self.config.max_steps_per_advance;
        match self.config.cadence {
            Cadence::Unpaced => {
                while report.steps < cap && self.engine.is_running() {
                    self.step_into(&mut report);
                }
            }
            Cadence::Every(interval) => {
                self.accumulated += elapsed;
                while self.accumulated >= interval
                    && report.steps < cap
                    && self.engine.is_running()
                {
                    self.accumulated -= interval;
                    self.step_into(&mut report);
                }
                if self.engine.is_running() && self.accumulated >= interval {
                    report.dropped = self.accumulated;
                    self.accumulated = Duration::ZERO;
                    warn!(
                        "step cap {cap} reached, dropping {:?} of catch-up",
                        report.dropped
                    );
                }
            }
        }
        if !self.engine.is_running() {
            self.accumulated = Duration::ZERO;
        }
        report.status = self.engine.status();
        report
    }

    fn step_into(&mut self, report: &mut AdvanceReport) {
        let result = self.engine.step();
        report.steps += 1;
        report.filled.extend(result.filled);
    }

    /// Run the active run to its end, ignoring the cadence.
    pub fn run_to_completion(&mut self) -> Option<RunSummary> {
        self.accumulated = Duration::ZERO;
        self.engine.run_to_completion()
    }

    /// Cancel the active run, keeping its partial field.
    pub fn cancel(&mut self) {
        self.engine.cancel();
        self.accumulated = Duration::ZERO;
    }

    /// Cancel and reset the strength field.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.accumulated = Duration::ZERO;
    }

    /// The engine, for reading the field and status.
    pub fn engine(&self) -> &DiffusionEngine {
        &self.engine
    }

    /// The scheduler configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Subscribe to the engine's events.
    pub fn subscribe(&mut self) -> Receiver<RunEvent> {
        self.engine.subscribe()
    }

    /// Unwrap the engine.
    pub fn into_engine(self) -> DiffusionEngine {
        self.engine
    }
}
