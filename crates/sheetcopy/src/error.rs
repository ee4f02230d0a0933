//! Error types for the sheetcopy operations

use std::fmt;
use std::path::PathBuf;

use sheetcopy_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by [`crate::get_cell`]
pub type LookupError = Error;

/// Error returned by the read-only document queries
pub type ReadError = Error;

/// Errors from the document operations
#[derive(Debug, Error)]
pub enum Error {
    /// Workbook model error
    #[error(transparent)]
    Core(#[from] sheetcopy_core::Error),

    /// Package store error
    #[error(transparent)]
    Package(#[from] XlsxError),

    /// A copy was asked to write over its own source
    #[error("Destination is the source document itself: {}", .0.display())]
    SameDocument(PathBuf),

    /// Addresses and values passed to an insert differ in length
    #[error("{addresses} cell addresses given for {values} values")]
    ValueCountMismatch { addresses: usize, values: usize },
}

impl Error {
    /// The workbook model error behind this error, if any
    pub fn core(&self) -> Option<&sheetcopy_core::Error> {
        match self {
            Error::Core(e) | Error::Package(XlsxError::Core(e)) => Some(e),
            _ => None,
        }
    }
}

/// Step of [`crate::copy_workbook`] during which a failure happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStep {
    /// Creating the destination document
    Create,
    /// Opening and counting the source sheets
    Measure,
    /// Adding sheets to the destination
    Grow,
    /// Copying the cells of the named sheet
    CopySheet(String),
    /// Saving the destination document
    Finalize,
}

impl fmt::Display for CopyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyStep::Create => write!(f, "creating the destination"),
            CopyStep::Measure => write!(f, "reading the source"),
            CopyStep::Grow => write!(f, "adding destination sheets"),
            CopyStep::CopySheet(name) => write!(f, "copying sheet '{}'", name),
            CopyStep::Finalize => write!(f, "saving the destination"),
        }
    }
}

/// A failed workbook copy: the first error and the step it happened in
#[derive(Debug, Error)]
#[error("Copy failed while {step}: {source}")]
pub struct CopyError {
    /// Step that failed
    pub step: CopyStep,
    /// Underlying error
    #[source]
    pub source: Error,
}

impl CopyError {
    /// Create a new copy error
    pub fn new<E: Into<Error>>(step: CopyStep, source: E) -> Self {
        Self {
            step,
            source: source.into(),
        }
    }

    /// The workbook model error behind this failure, if any
    pub fn core(&self) -> Option<&sheetcopy_core::Error> {
        self.source.core()
    }
}
