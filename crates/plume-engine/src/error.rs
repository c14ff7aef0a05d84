//! Errors returned when a run cannot be started.

use std::error::Error;
use std::fmt;

use plume_core::CellCoord;

use crate::config::ConfigError;

/// Why a start cell was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidStartReason {
    /// The cell lies outside the grid.
    OutOfBounds,
    /// The cell is an obstacle.
    Obstacle,
}

impl fmt::Display for InvalidStartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::Obstacle => write!(f, "an obstacle"),
        }
    }
}

/// Errors from [`DiffusionEngine::start`](crate::DiffusionEngine::start).
///
/// Either way, nothing was mutated: an active run keeps running and the
/// strength field is untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum StartError {
    /// The origin cannot host a source.
    InvalidStart {
        /// The requested origin.
        coord: CellCoord,
        /// What is wrong with it.
        reason: InvalidStartReason,
    },
    /// The run parameters are invalid.
    Config(ConfigError),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart { coord, reason } => {
                write!(f, "cannot start at {coord}: cell is {reason}")
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for StartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::InvalidStart { .. } => None,
        }
    }
}

impl From<ConfigError> for StartError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_cell_and_reason() {
        let err = StartError::InvalidStart {
            coord: CellCoord::new(3, -1),
            reason: InvalidStartReason::OutOfBounds,
        };
        assert_eq!(err.to_string(), "cannot start at (3, -1): cell is out of bounds");
        assert!(err.source().is_none());
    }

    #[test]
    fn config_errors_chain() {
        let err: StartError = ConfigError::ZeroCellBudget.into();
        assert_eq!(err.to_string(), "config: cell budget must be at least 1");
        assert!(err.source().is_some());
    }
}
