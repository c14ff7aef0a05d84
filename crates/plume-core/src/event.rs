//! The cell-filled event stream and run lifecycle events.
//!
//! [`CellFilled`] is the integration point a visual layer subscribes to:
//! exactly one is produced per processed cell, in expansion order. The
//! surrounding [`RunEvent`] variants tell the consumer when to tear down or
//! keep output from a previous run.

use crate::id::{CellCoord, RunId};

/// One processed cell: where, how strong, and how far from the source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFilled {
    /// The run that filled the cell.
    pub run: RunId,
    /// Grid coordinate of the cell.
    pub coord: CellCoord,
    /// Strength assigned to the cell.
    pub strength: f64,
    /// Distance from the run's origin under the run's distance model.
    pub distance: f64,
}

/// Why a run stopped expanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionReason {
    /// A `FixedCount` budget was spent.
    BudgetReached,
    /// The frontier ran dry: every reachable admissible cell was processed.
    FrontierExhausted,
}

/// What a consumer should do with output emitted by a replaced run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriorOutput {
    /// Tear down whatever the previous run rendered.
    #[default]
    Discard,
    /// Leave the previous run's rendered output in place. The logical
    /// strength field is reset regardless.
    Preserve,
}

/// Lifecycle and progress events published to subscribers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunEvent {
    /// A run began at `origin`, replacing any previous run.
    Started {
        /// The new run.
        run: RunId,
        /// Start cell.
        origin: CellCoord,
        /// How to treat output from the replaced run.
        prior_output: PriorOutput,
    },
    /// A cell was processed.
    CellFilled(CellFilled),
    /// A run stopped on its own.
    Finished {
        /// The run that finished.
        run: RunId,
        /// Number of cells it processed.
        cells_filled: usize,
        /// Why it stopped.
        reason: CompletionReason,
    },
    /// A run was cancelled before finishing.
    Cancelled {
        /// The cancelled run.
        run: RunId,
        /// Number of cells it processed before cancellation.
        cells_filled: usize,
    },
    /// The strength field was wiped.
    Cleared,
}

impl RunEvent {
    /// The run this event belongs to, if any.
    pub fn run(&self) -> Option<RunId> {
        match self {
            Self::Started { run, .. }
            | Self::Finished { run, .. }
            | Self::Cancelled { run, .. } => Some(*run),
            Self::CellFilled(filled) => Some(filled.run),
            Self::Cleared => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accessor_covers_all_variants() {
        let run = RunId(3);
        let filled = CellFilled {
            run,
            coord: CellCoord::new(0, 0),
            strength: 1.0,
            distance: 0.0,
        };
        assert_eq!(RunEvent::CellFilled(filled).run(), Some(run));
        assert_eq!(
            RunEvent::Started {
                run,
                origin: CellCoord::new(1, 1),
                prior_output: PriorOutput::Discard,
            }
            .run(),
            Some(run)
        );
        assert_eq!(
            RunEvent::Finished {
                run,
                cells_filled: 4,
                reason: CompletionReason::BudgetReached,
            }
            .run(),
            Some(run)
        );
        assert_eq!(
            RunEvent::Cancelled {
                run,
                cells_filled: 0
            }
            .run(),
            Some(run)
        );
        assert_eq!(RunEvent::Cleared.run(), None);
    }

    #[test]
    fn prior_output_defaults_to_discard() {
        assert_eq!(PriorOutput::default(), PriorOutput::Discard);
    }
}
