//! # sheetcopy
//!
//! Create, inspect and copy XLSX workbooks.
//!
//! The main entry point is [`copy_workbook`], which builds a fresh document
//! with as many sheets as the source and copies every cell's resolved value
//! into it. Smaller operations cover what the copy is made of: creating a
//! document, adding sheets, writing values and reading them back.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetcopy::{copy_workbook, get_cell, list_sheets};
//!
//! copy_workbook("CopyOfHello.xlsx", "Hello.xlsx")?;
//!
//! for (id, name) in list_sheets("CopyOfHello.xlsx")? {
//!     println!("{id}\t{name}");
//! }
//! let a1 = get_cell("CopyOfHello.xlsx", "Sheet1", "A1")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod copy;
pub mod edit;
pub mod error;
pub mod query;

pub use copy::{copy_workbook, copy_workbook_with, CopyOptions, CopyStats};
pub use edit::{add_worksheet, create_workbook, insert_values};
pub use error::{CopyError, CopyStep, Error, LookupError, ReadError, Result};
pub use query::{
    cell_references, get_cell, list_sheets, read_cells, read_values, sheet_count,
};

// Re-export core types
pub use sheetcopy_core::{
    resolve, Cell, CellAddress, CellKind, Row, SharedStrings, Sheet, Workbook,
    DEFAULT_SHEET_NAME, MAX_COLS, MAX_ROWS,
};

// Re-export I/O types
pub use sheetcopy_xlsx::{CellRecord, SheetPart, XlsxDocument, XlsxError};

/// Resolve a payload, optionally reading a shared-text index as its value
/// when the document has no shared string table
pub(crate) fn resolve_value(
    raw_value: &str,
    kind: CellKind,
    intern_table: Option<&SharedStrings>,
    lenient: bool,
) -> sheetcopy_core::Result<String> {
    match resolve(raw_value, kind, intern_table) {
        Err(sheetcopy_core::Error::MissingInternTable(index)) if lenient => {
            log::warn!(
                "No shared string table; using raw index '{}' as the value",
                index
            );
            Ok(index)
        }
        other => other,
    }
}
