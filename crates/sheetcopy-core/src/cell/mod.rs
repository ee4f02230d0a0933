//! Cell-related types
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`Cell`] - A raw cell payload with its [`CellKind`] tag

mod address;
mod value;

pub use address::CellAddress;
pub use value::{Cell, CellKind};
