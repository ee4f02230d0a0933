//! XLSX error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The document location cannot be created or written
    #[error("Cannot write document at {path}: {source}")]
    PathUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No document exists at the path
    #[error("Document not found: {0}")]
    DocumentNotFound(PathBuf),

    /// The file exists but is not a readable workbook package
    #[error("Corrupt document: {0}")]
    DocumentCorrupt(String),

    /// Save was requested on a handle opened read-only
    #[error("Document was opened read-only: {0}")]
    ReadOnly(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sheetcopy_core::Error),
}

impl XlsxError {
    /// Create a new "corrupt document" error with a message
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        XlsxError::DocumentCorrupt(msg.into())
    }
}
