//! Read-only document queries

use std::path::Path;

use sheetcopy_core::CellAddress;
use sheetcopy_xlsx::XlsxDocument;

use crate::error::{LookupError, ReadError};
use crate::resolve_value;

/// Get the resolved value of one cell
///
/// Returns `Ok(None)` when the sheet exists but holds no cell at `address`.
/// Shared-text cells in a document without a shared string table yield their
/// raw index.
pub fn get_cell<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    address: &str,
) -> Result<Option<String>, LookupError> {
    let address = CellAddress::parse(address)?;
    let doc = XlsxDocument::open(path, false)?;
    let sheet = doc.workbook().require_sheet(sheet_name)?;

    let value = match sheet.get(&address) {
        Some(cell) => Some(resolve_value(
            cell.raw_value(),
            cell.kind(),
            doc.intern_table(),
            true,
        )?),
        None => None,
    };
    Ok(value)
}

/// `(id, name)` of every sheet, in workbook order
pub fn list_sheets<P: AsRef<Path>>(path: P) -> Result<Vec<(u32, String)>, ReadError> {
    let doc = XlsxDocument::open(path, false)?;
    Ok(doc.workbook().sheet_list())
}

/// Number of sheets in a document
pub fn sheet_count<P: AsRef<Path>>(path: P) -> Result<usize, ReadError> {
    let doc = XlsxDocument::open(path, false)?;
    Ok(doc.workbook().sheet_count())
}

/// Cell references of a sheet, in the order the document lists them
pub fn cell_references<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
) -> Result<Vec<String>, ReadError> {
    let doc = XlsxDocument::open(path, false)?;
    let sheet = doc.workbook().require_sheet(sheet_name)?;
    let part = doc.sheet_part(sheet.id())?;
    Ok(part.references().map(str::to_string).collect())
}

/// Resolved values of a sheet, in the order the document lists its cells
pub fn read_values<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Vec<String>, ReadError> {
    Ok(read_cells(path, sheet_name)?
        .into_iter()
        .map(|(_, value)| value)
        .collect())
}

/// `(reference, resolved value)` of every cell of a sheet, in document order
pub fn read_cells<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
) -> Result<Vec<(String, String)>, ReadError> {
    let doc = XlsxDocument::open(path, false)?;
    let sheet = doc.workbook().require_sheet(sheet_name)?;
    let part = doc.sheet_part(sheet.id())?;

    part.cells
        .iter()
        .map(|record| {
            let value =
                resolve_value(&record.raw_value, record.kind, doc.intern_table(), true)?;
            Ok::<_, ReadError>((record.reference.clone(), value))
        })
        .collect()
}
