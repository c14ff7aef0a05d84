//! Frontier containers for the three expansion orders.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use plume_core::CellCoord;
use plume_space::{CellIndex, Direction};

use crate::config::ExpansionOrder;

/// A discovered cell waiting to be processed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry {
    pub coord: CellCoord,
    pub index: CellIndex,
    pub distance: f64,
    /// Parent cell and the step taken from it. Only depth-first entries
    /// need this, to gate diagonals when they are popped.
    pub via: Option<(CellCoord, Direction)>,
}

/// Heap wrapper: smallest distance first, then earliest insertion.
#[derive(Debug)]
pub(crate) struct Nearest {
    entry: FrontierEntry,
    seq: u64,
}

impl PartialEq for Nearest {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Nearest {}

impl PartialOrd for Nearest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Nearest {
    // Reversed so the max-heap pops the minimum.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .entry
            .distance
            .total_cmp(&self.entry.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub(crate) enum Frontier {
    Greedy { heap: BinaryHeap<Nearest>, seq: u64 },
    /// Children of the wave being processed; the wave itself is taken
    /// out with [`Frontier::take_wave`].
    Layered { next: Vec<FrontierEntry> },
    DepthFirst { stack: Vec<FrontierEntry> },
}

impl Frontier {
    pub fn new(order: ExpansionOrder) -> Self {
        match order {
            ExpansionOrder::GreedyNearest => Self::Greedy {
                heap: BinaryHeap::new(),
                seq: 0,
            },
            ExpansionOrder::LayeredWave => Self::Layered { next: Vec::new() },
            ExpansionOrder::DepthFirstPath => Self::DepthFirst { stack: Vec::new() },
        }
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        match self {
            Self::Greedy { heap, seq } => {
                heap.push(Nearest { entry, seq: *seq });
                *seq += 1;
            }
            Self::Layered { next } => next.push(entry),
            Self::DepthFirst { stack } => stack.push(entry),
        }
    }

    /// Remove the next single entry: nearest for greedy, most recent for
    /// depth-first. Layered frontiers are drained by wave instead.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        match self {
            Self::Greedy { heap, .. } => heap.pop().map(|n| n.entry),
            Self::DepthFirst { stack } => stack.pop(),
            Self::Layered { .. } => None,
        }
    }

    /// Take every queued entry as one wave, leaving the frontier empty.
    pub fn take_wave(&mut self) -> Vec<FrontierEntry> {
        match self {
            Self::Layered { next } => std::mem::take(next),
            Self::Greedy { .. } | Self::DepthFirst { .. } => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Greedy { heap, .. } => heap.len(),
            Self::Layered { next } => next.len(),
            Self::DepthFirst { stack } => stack.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
