//! # sheetcopy-xlsx
//!
//! XLSX (Office Open XML) package store for sheetcopy.
//!
//! [`XlsxDocument`] is the handle callers work with: it is created or opened
//! from a path, exposes the in-memory [`Workbook`](sheetcopy_core::Workbook),
//! the raw [`SheetPart`]s as read from the package and the shared string
//! table, and writes everything back on [`XlsxDocument::save`].

pub mod document;
pub mod error;
pub mod part;
pub mod reader;
pub mod writer;

pub use document::XlsxDocument;
pub use error::{XlsxError, XlsxResult};
pub use part::{CellRecord, SheetPart};
pub use reader::{Package, XlsxReader};
pub use writer::XlsxWriter;
