//! Core types and traits for the Plume grid diffusion engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: cell coordinates,
//! run identifiers, the cell-filled event stream, and the two traits
//! through which the engine meets the outside world
//! ([`ObstacleOracle`] on the way in, [`StrengthRead`] on the way out).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod event;
pub mod id;
pub mod traits;

pub use event::{CellFilled, CompletionReason, PriorOutput, RunEvent};
pub use id::{CellCoord, RunId};
pub use traits::{ObstacleOracle, StrengthRead};
