//! Workbook copy engine
//!
//! A copy runs in one pass and stops at the first failure:
//!
//! 1. create the destination with its default sheet, unless it is the source
//! 2. open the source and count its sheets
//! 3. add sheets to the destination until the counts match
//! 4. copy `Sheet1`..`SheetN` cell by cell, values resolved and written as text
//! 5. save the destination
//!
//! Sheets are paired by the name pattern `Sheet<i>` on both sides, not by the
//! source's own sheet names. Nothing is rolled back on failure: a destination
//! created in step 1 stays on disk as it was last saved.

use std::path::Path;

use sheetcopy_core::{CellAddress, CellKind, Error as CoreError};
use sheetcopy_xlsx::XlsxDocument;

use crate::error::{CopyError, CopyStep, Error, Result};
use crate::resolve_value;

/// Options for [`copy_workbook_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Copy the raw index of shared-text cells when the source has no shared
    /// string table, instead of failing
    pub lenient_shared_text: bool,
}

/// Summary of a finished copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Sheets in the destination
    pub sheets: usize,
    /// Cells read from the source
    pub cells: usize,
}

/// Copy every sheet of `source` into a new document at `destination`
///
/// # Example
/// ```no_run
/// sheetcopy::copy_workbook("CopyOfHello.xlsx", "Hello.xlsx").unwrap();
/// ```
pub fn copy_workbook<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    source: Q,
) -> std::result::Result<(), CopyError> {
    copy_workbook_with(destination, source, &CopyOptions::default()).map(|_| ())
}

/// Copy every sheet of `source` into a new document at `destination`, with options
pub fn copy_workbook_with<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    source: Q,
    options: &CopyOptions,
) -> std::result::Result<CopyStats, CopyError> {
    let destination = destination.as_ref();
    let source = source.as_ref();

    if is_same_document(destination, source) {
        return Err(CopyError::new(
            CopyStep::Create,
            Error::SameDocument(destination.to_path_buf()),
        ));
    }

    let mut dest =
        XlsxDocument::create(destination).map_err(|e| CopyError::new(CopyStep::Create, e))?;
    log::debug!("Copy: created {}", destination.display());

    let src =
        XlsxDocument::open(source, false).map_err(|e| CopyError::new(CopyStep::Measure, e))?;
    let sheet_count = src.workbook().sheet_count();
    if sheet_count == 0 {
        return Err(CopyError::new(
            CopyStep::Measure,
            CoreError::EmptySourceWorkbook,
        ));
    }
    log::debug!("Copy: {} has {} sheets", source.display(), sheet_count);

    for _ in 1..sheet_count {
        dest.workbook_mut()
            .add_sheet()
            .map_err(|e| CopyError::new(CopyStep::Grow, e))?;
    }

    let mut stats = CopyStats {
        sheets: sheet_count,
        cells: 0,
    };
    for i in 1..=sheet_count {
        let name = format!("Sheet{}", i);
        let copied = copy_sheet(&src, &mut dest, &name, options)
            .map_err(|e| CopyError::new(CopyStep::CopySheet(name.clone()), e))?;
        log::debug!("Copy: {} cells in '{}'", copied, name);
        stats.cells += copied;
    }

    dest.save().map_err(|e| CopyError::new(CopyStep::Finalize, e))?;
    dest.close();
    src.close();

    Ok(stats)
}

/// Check if `destination` resolves to the existing file at `source`
fn is_same_document(destination: &Path, source: &Path) -> bool {
    let Ok(source) = source.canonicalize() else {
        return false;
    };
    if destination.canonicalize().map_or(false, |d| d == source) {
        return true;
    }

    // Destination may not exist yet; resolve its directory instead
    let Some(file_name) = destination.file_name() else {
        return false;
    };
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent
        .canonicalize()
        .map_or(false, |dir| dir.join(file_name) == source)
}

/// Copy one sheet's cells in source document order; returns the cell count
fn copy_sheet(
    src: &XlsxDocument,
    dest: &mut XlsxDocument,
    name: &str,
    options: &CopyOptions,
) -> Result<usize> {
    let source_sheet = src.workbook().require_sheet(name)?;
    let part = src.sheet_part(source_sheet.id())?;
    let target = dest.workbook_mut().require_sheet_mut(name)?;

    for record in &part.cells {
        let address = CellAddress::parse(&record.reference)?;
        let value = resolve_value(
            &record.raw_value,
            record.kind,
            src.intern_table(),
            options.lenient_shared_text,
        )?;
        target.upsert(&address, &value, CellKind::Text);
    }

    Ok(part.len())
}
