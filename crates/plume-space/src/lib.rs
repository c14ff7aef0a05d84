//! Grid geometry and dense per-cell storage for Plume.
//!
//! [`GridSpace`] fixes the grid's dimensions, cell size and world origin
//! once at construction and converts between world points and cell
//! coordinates. Everything that stores one value per cell goes through
//! [`CellField`], indexed by a [`CellIndex`] that can only be obtained by
//! bounds-checking a coordinate against the grid.
//!
//! [`ObstacleMask`] is the one-shot snapshot of an
//! [`ObstacleOracle`](plume_core::ObstacleOracle): taken before the first
//! run and never refreshed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod field;
pub mod grid;
pub mod obstacle;
pub mod point;

pub use direction::Direction;
pub use error::SpaceError;
pub use field::{CellField, CellIndex};
pub use grid::GridSpace;
pub use obstacle::ObstacleMask;
pub use point::WorldPoint;
