//! Strongly-typed identifiers and the [`CellCoord`] type.

use std::fmt;

/// Integer coordinates of a grid cell.
///
/// `x` grows east and `y` grows north. Components are signed so that
/// neighbour arithmetic can step off the grid and be rejected by a bounds
/// check afterwards instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellCoord {
    /// Column, growing east.
    pub x: i32,
    /// Row, growing north.
    pub y: i32,
}

impl CellCoord {
    /// Create a coordinate from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate displaced by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns `true` if `other` touches `self` only at a corner.
    pub fn is_diagonal_to(self, other: CellCoord) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<CellCoord> for (i32, i32) {
    fn from(c: CellCoord) -> Self {
        (c.x, c.y)
    }
}

/// Identifies one diffusion run on an engine.
///
/// Allocated sequentially by the engine that owns the run, starting at 1.
/// Events carry the id of the run that produced them so consumers can
/// discard output from a run that has since been replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

impl RunId {
    /// The id that follows `self`.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RunId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
