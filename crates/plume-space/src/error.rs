//! Error types for grid construction and coordinate queries.

use plume_core::CellCoord;
use std::fmt;

/// Errors arising from grid construction or coordinate lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A dimension exceeds the maximum supported size.
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The value provided.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
    /// Cell size is zero, negative, or not finite.
    InvalidCellSize {
        /// The value provided.
        value: f64,
    },
    /// The world origin has a NaN or infinite component.
    InvalidOrigin,
    /// A coordinate lies outside the grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: CellCoord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A per-cell structure was built for a grid of different dimensions.
    ShapeMismatch {
        /// `(width, height)` of the grid.
        expected: (u32, u32),
        /// `(width, height)` the structure was built for.
        actual: (u32, u32),
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum {max}")
            }
            Self::InvalidCellSize { value } => {
                write!(f, "cell size must be finite and positive, got {value}")
            }
            Self::InvalidOrigin => write!(f, "grid origin must be finite"),
            Self::CoordOutOfBounds { coord, bounds } => {
                write!(f, "coordinate {coord} out of bounds: {bounds}")
            }
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "shape mismatch: grid is {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

impl std::error::Error for SpaceError {}
