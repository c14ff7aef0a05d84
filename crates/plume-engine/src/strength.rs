//! The per-cell strength field read by the visual layer.

use plume_core::{CellCoord, StrengthRead};
use plume_space::{CellField, CellIndex, GridSpace};

/// Strength and filled flag for every cell of one grid.
///
/// Unfilled cells read as strength `0.0`. The field persists after a run
/// finishes or is cancelled, until the next run starts or it is cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct StrengthField {
    strength: CellField<f64>,
    filled: CellField<bool>,
    filled_count: usize,
}

impl StrengthField {
    /// An all-zero, all-unvisited field covering `space`.
    pub fn new(space: &GridSpace) -> Self {
        Self {
            strength: CellField::new(space, 0.0),
            filled: CellField::new(space, false),
            filled_count: 0,
        }
    }

    /// Strength at `(x, y)`; `0.0` if unvisited or out of bounds.
    pub fn strength(&self, x: i32, y: i32) -> f64 {
        self.strength_at(CellCoord::new(x, y))
    }

    /// Strength at `coord`; `0.0` if unvisited or out of bounds.
    pub fn strength_at(&self, coord: CellCoord) -> f64 {
        self.strength.get(coord).copied().unwrap_or(0.0)
    }

    /// Whether `(x, y)` has been processed by the current or last run.
    pub fn is_visited(&self, x: i32, y: i32) -> bool {
        self.is_visited_at(CellCoord::new(x, y))
    }

    /// Whether `coord` has been processed by the current or last run.
    pub fn is_visited_at(&self, coord: CellCoord) -> bool {
        self.filled.get(coord).copied().unwrap_or(false)
    }

    /// Number of visited cells.
    pub fn visited_count(&self) -> usize {
        self.filled_count
    }

    /// Visited cells and their strengths, in row-major order.
    pub fn visited(&self) -> impl Iterator<Item = (CellCoord, f64)> + '_ {
        self.filled
            .iter()
            .zip(self.strength.as_slice())
            .filter(|((_, &filled), _)| filled)
            .map(|((coord, _), &s)| (coord, s))
    }

    /// Reset every cell to unvisited with zero strength.
    pub fn clear(&mut self) {
        self.strength.fill(0.0);
        self.filled.fill(false);
        self.filled_count = 0;
    }

    pub(crate) fn is_filled(&self, index: CellIndex) -> bool {
        self.filled[index]
    }

    pub(crate) fn set(&mut self, index: CellIndex, strength: f64) {
        if !self.filled[index] {
            self.filled[index] = true;
            self.filled_count += 1;
        }
        self.strength[index] = strength;
    }
}

impl StrengthRead for StrengthField {
    fn strength(&self, x: i32, y: i32) -> f64 {
        StrengthField::strength(self, x, y)
    }

    fn is_visited(&self, x: i32, y: i32) -> bool {
        StrengthField::is_visited(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_space::WorldPoint;

    fn space() -> GridSpace {
        GridSpace::new(4, 3, 1.0, WorldPoint::ZERO).unwrap()
    }

    #[test]
    fn fresh_field_is_empty() {
        let f = StrengthField::new(&space());
        assert_eq!(f.strength(1, 1), 0.0);
        assert!(!f.is_visited(1, 1));
        assert_eq!(f.visited_count(), 0);
    }

    #[test]
    fn out_of_bounds_reads_zero() {
        let f = StrengthField::new(&space());
        assert_eq!(f.strength(-1, 0), 0.0);
        assert_eq!(f.strength(4, 0), 0.0);
        assert!(!f.is_visited(0, 3));
    }

    #[test]
    fn set_marks_visited_once() {
        let s = space();
        let mut f = StrengthField::new(&s);
        let idx = s.index_of(CellCoord::new(2, 1)).unwrap();
        f.set(idx, 0.7);
        f.set(idx, 0.6);
        assert_eq!(f.visited_count(), 1);
        assert_eq!(f.strength(2, 1), 0.6);
        assert!(f.is_filled(idx));
        let listed: Vec<_> = f.visited().collect();
        assert_eq!(listed, vec![(CellCoord::new(2, 1), 0.6)]);
    }

    #[test]
    fn clear_resets_everything_and_is_idempotent() {
        let s = space();
        let mut f = StrengthField::new(&s);
        f.set(s.index_of(CellCoord::new(0, 0)).unwrap(), 1.0);
        f.clear();
        let once = f.clone();
        f.clear();
        assert_eq!(f, once);
        assert_eq!(f, StrengthField::new(&s));
    }

    #[test]
    fn reads_through_trait() {
        let s = space();
        let mut f = StrengthField::new(&s);
        f.set(s.index_of(CellCoord::new(3, 2)).unwrap(), 0.25);
        let r: &dyn StrengthRead = &f;
        assert_eq!(r.strength(3, 2), 0.25);
        assert!(r.is_visited(3, 2));
    }
}
