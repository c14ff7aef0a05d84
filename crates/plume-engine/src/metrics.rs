//! Per-run counters and step timings.
//!
//! [`RunMetrics`] is reset when a run starts and updated after every
//! [`step()`](crate::DiffusionEngine::step), so hosts can profile or
//! surface it in debug overlays.

/// Counters and timings for the current (or most recent) run.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Cells processed so far.
    pub cells_filled: usize,
    /// Cells inserted into the frontier, origin included.
    pub cells_discovered: usize,
    /// Waves completed (layered order only).
    pub waves: u32,
    /// Steps taken.
    pub steps: u64,
    /// Distinct cells a strength threshold rejected at least once. A cell
    /// offered by several neighbours counts once.
    pub dropped_below_threshold: u64,
    /// Diagonal candidates rejected because a flank was not yet reached.
    pub diagonals_gated: u64,
    /// Largest frontier size observed.
    pub frontier_peak: usize,
    /// Wall-clock time of the most recent step.
    pub last_step_us: u64,
    /// Wall-clock time of all steps of the run.
    pub total_step_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.cells_filled, 0);
        assert_eq!(m.cells_discovered, 0);
        assert_eq!(m.waves, 0);
        assert_eq!(m.steps, 0);
        assert_eq!(m.dropped_below_threshold, 0);
        assert_eq!(m.diagonals_gated, 0);
        assert_eq!(m.frontier_peak, 0);
        assert_eq!(m.last_step_us, 0);
        assert_eq!(m.total_step_us, 0);
    }
}
