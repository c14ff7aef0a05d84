//! Collects a run's cell-filled stream for assertions.

use crossbeam_channel::Receiver;
use indexmap::IndexMap;
use plume_core::{CellCoord, CellFilled, CompletionReason, RunEvent};

/// Cell-filled events keyed by coordinate, kept in expansion order.
///
/// A coordinate filled twice is counted in [`duplicates`](Self::duplicates)
/// and keeps its first position; a correct run never produces one.
#[derive(Debug, Default)]
pub struct EventRecorder {
    filled: IndexMap<CellCoord, CellFilled>,
    duplicates: usize,
    finished: Option<(usize, CompletionReason)>,
    cancelled: bool,
    cleared: usize,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every event currently queued on `rx`.
    pub fn drain(&mut self, rx: &Receiver<RunEvent>) {
        for event in rx.try_iter() {
            self.record(event);
        }
    }

    pub fn record(&mut self, event: RunEvent) {
        match event {
            RunEvent::Started { .. } => {
                self.filled.clear();
                self.duplicates = 0;
                self.finished = None;
                self.cancelled = false;
            }
            RunEvent::CellFilled(f) => self.record_filled(f),
            RunEvent::Finished {
                cells_filled,
                reason,
                ..
            } => self.finished = Some((cells_filled, reason)),
            RunEvent::Cancelled { .. } => self.cancelled = true,
            RunEvent::Cleared => self.cleared += 1,
        }
    }

    pub fn record_filled(&mut self, filled: CellFilled) {
        if self.filled.contains_key(&filled.coord) {
            self.duplicates += 1;
        } else {
            self.filled.insert(filled.coord, filled);
        }
    }

    pub fn len(&self) -> usize {
        self.filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    pub fn get(&self, coord: CellCoord) -> Option<&CellFilled> {
        self.filled.get(&coord)
    }

    /// Filled coordinates in expansion order.
    pub fn coords(&self) -> Vec<CellCoord> {
        self.filled.keys().copied().collect()
    }

    /// Recorded distances in expansion order.
    pub fn distances(&self) -> Vec<f64> {
        self.filled.values().map(|f| f.distance).collect()
    }

    /// Position of `coord` in the expansion order.
    pub fn position(&self, coord: CellCoord) -> Option<usize> {
        self.filled.get_index_of(&coord)
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn finished(&self) -> Option<(usize, CompletionReason)> {
        self.finished
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn clear_count(&self) -> usize {
        self.cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::RunId;

    fn filled(x: i32, distance: f64) -> CellFilled {
        CellFilled {
            run: RunId(1),
            coord: CellCoord::new(x, 0),
            strength: 1.0,
            distance,
        }
    }

    #[test]
    fn keeps_first_position_and_counts_duplicates() {
        let mut r = EventRecorder::new();
        r.record_filled(filled(0, 0.0));
        r.record_filled(filled(1, 1.0));
        r.record_filled(filled(0, 2.0));
        assert_eq!(r.len(), 2);
        assert_eq!(r.duplicates(), 1);
        assert_eq!(r.position(CellCoord::new(1, 0)), Some(1));
        assert_eq!(r.distances(), vec![0.0, 1.0]);
    }

    #[test]
    fn start_event_resets() {
        let mut r = EventRecorder::new();
        r.record_filled(filled(0, 0.0));
        r.record(RunEvent::Started {
            run: RunId(2),
            origin: CellCoord::new(0, 0),
            prior_output: Default::default(),
        });
        assert!(r.is_empty());
    }
}
