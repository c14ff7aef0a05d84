//! Test utilities for Plume development.
//!
//! - [`parse_layout`] turns an ASCII picture into a grid and obstacle mask.
//! - [`EventRecorder`] collects the cell-filled stream in expansion order.
//! - [`fixtures`] holds seeded random layouts and a counting oracle.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
mod layout;
mod recorder;

pub use layout::{parse_layout, Layout, LayoutError};
pub use recorder::EventRecorder;
