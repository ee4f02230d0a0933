//! Error types for sheetcopy-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetcopy-core
#[derive(Debug, Error)]
pub enum Error {
    /// Text is not a `[letters][digits]` cell address with a positive row
    #[error("Malformed cell address: {0}")]
    MalformedAddress(String),

    /// No sheet carries the requested name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// No sheet carries the requested id
    #[error("Sheet id not found: {0}")]
    SheetIdNotFound(u32),

    /// A sheet name is already used in the workbook
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// A sheet id is already used in the workbook
    #[error("Sheet id already exists: {0}")]
    DuplicateSheetId(u32),

    /// The largest sheet id is already `u32::MAX`, so no new id can follow it
    #[error("No sheet id left after {}", u32::MAX)]
    SheetIdExhausted,

    /// The source of a copy has no sheets at all
    #[error("Source workbook contains no sheets")]
    EmptySourceWorkbook,

    /// A shared-text cell points outside the intern table
    #[error("Shared text index '{index}' cannot be resolved (table holds {len} entries)")]
    UnresolvedSharedText {
        /// Raw payload of the cell
        index: String,
        /// Number of entries in the intern table
        len: usize,
    },

    /// A shared-text cell exists but the document has no intern table
    #[error("Shared text index '{0}' found but the document has no shared string table")]
    MissingInternTable(String),
}
