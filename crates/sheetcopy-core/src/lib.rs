//! # sheetcopy-core
//!
//! In-memory workbook model for the sheetcopy spreadsheet engine.
//!
//! The model is a strict ownership tree: a [`Workbook`] owns its [`Sheet`]s,
//! a sheet owns its [`Row`]s and a row owns its [`Cell`]s. Rows are kept
//! ascending by index and cells ascending by column at all times.
//!
//! This crate provides:
//! - [`CellAddress`] - A cell's location (e.g., "B7") with numeric ordering
//! - [`Cell`], [`CellKind`] - Raw cell payloads and their type tags
//! - [`Row`], [`Sheet`] - The ordered row/cell store with insert-or-update
//! - [`SharedStrings`] and [`resolve`] - Shared-text interning and value resolution
//! - [`Workbook`] - The sheet directory
//!
//! ## Example
//!
//! ```rust
//! use sheetcopy_core::{CellAddress, CellKind, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.sheet_by_name_mut("Sheet1").unwrap();
//!
//! sheet.upsert(&CellAddress::parse("D1").unwrap(), "last", CellKind::Text);
//! sheet.upsert(&CellAddress::parse("B1").unwrap(), "first", CellKind::Text);
//!
//! let refs: Vec<String> = sheet.cells().map(|c| c.address().to_string()).collect();
//! assert_eq!(refs, ["B1", "D1"]);
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod shared_text;
pub mod sheet;
pub mod workbook;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellKind};
pub use error::{Error, Result};
pub use row::Row;
pub use shared_text::{resolve, SharedStrings};
pub use sheet::Sheet;
pub use workbook::Workbook;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Name given to the sheet every new workbook starts with
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
