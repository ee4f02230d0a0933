//! Document edits: each opens the document, changes it in memory and saves once

use std::path::Path;

use sheetcopy_core::{CellAddress, CellKind};
use sheetcopy_xlsx::XlsxDocument;

use crate::error::{Error, Result};

/// Create a new document holding only `Sheet1`
pub fn create_workbook<P: AsRef<Path>>(path: P) -> Result<()> {
    XlsxDocument::create(path)?.close();
    Ok(())
}

/// Add a sheet named after its new id; returns `(id, name)`
pub fn add_worksheet<P: AsRef<Path>>(path: P) -> Result<(u32, String)> {
    let mut doc = XlsxDocument::open(path, true)?;
    let sheet = doc.workbook_mut().add_sheet()?;
    let added = (sheet.id(), sheet.name().to_string());
    doc.save()?;
    doc.close();
    Ok(added)
}

/// Write text values to a sheet, pairing `addresses[i]` with `values[i]`
///
/// Existing cells are overwritten in place. Returns the number of cells written.
pub fn insert_values<P, A, V>(
    path: P,
    sheet_name: &str,
    addresses: &[A],
    values: &[V],
) -> Result<usize>
where
    P: AsRef<Path>,
    A: AsRef<str>,
    V: AsRef<str>,
{
    if addresses.len() != values.len() {
        return Err(Error::ValueCountMismatch {
            addresses: addresses.len(),
            values: values.len(),
        });
    }

    let mut doc = XlsxDocument::open(path, true)?;
    let sheet = doc.workbook_mut().require_sheet_mut(sheet_name)?;
    for (address, value) in addresses.iter().zip(values) {
        let address = CellAddress::parse(address.as_ref())?;
        sheet.upsert(&address, value.as_ref(), CellKind::Text);
    }
    doc.save()?;
    doc.close();

    Ok(addresses.len())
}
