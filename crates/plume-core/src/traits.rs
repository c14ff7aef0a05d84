//! Consumed and exposed traits at the engine boundary.

use crate::id::CellCoord;

/// Static obstacle predicate over grid cells.
///
/// Implemented by whatever knows the scene layout (collider overlap,
/// a tile map, a hand-authored mask). The engine queries it exactly once
/// per cell before the first run and never again, so later scene changes
/// are not observed.
///
/// Closures of type `Fn(CellCoord) -> bool` implement this trait.
pub trait ObstacleOracle {
    /// Returns `true` if the cell at `coord` blocks diffusion.
    fn obstacle_at(&self, coord: CellCoord) -> bool;
}

impl<F> ObstacleOracle for F
where
    F: Fn(CellCoord) -> bool,
{
    fn obstacle_at(&self, coord: CellCoord) -> bool {
        self(coord)
    }
}

/// Read-only access to the per-cell strength output.
///
/// Out-of-bounds coordinates are not an error: they read as unvisited
/// with zero strength.
pub trait StrengthRead {
    /// Strength at `(x, y)`; `0.0` if unvisited or out of bounds.
    fn strength(&self, x: i32, y: i32) -> f64;

    /// Whether `(x, y)` was processed by the current or last run.
    fn is_visited(&self, x: i32, y: i32) -> bool;
}
