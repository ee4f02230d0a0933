//! Document handle: the package store seen by the rest of sheetcopy
//!
//! A document is read completely on open, worked on in memory and written
//! back only on [`XlsxDocument::save`].

use std::path::{Path, PathBuf};

use crate::error::{XlsxError, XlsxResult};
use crate::part::SheetPart;
use crate::reader::XlsxReader;
use crate::writer::XlsxWriter;
use sheetcopy_core::{Error, SharedStrings, Workbook};

/// An open workbook document
#[derive(Debug)]
pub struct XlsxDocument {
    path: PathBuf,
    writable: bool,
    workbook: Workbook,
    /// Parts as of the last open or save
    sheet_parts: Vec<SheetPart>,
    shared_strings: Option<SharedStrings>,
}

impl XlsxDocument {
    /// Create a new document holding the default sheet and persist it
    ///
    /// Fails with [`XlsxError::PathUnwritable`] when the location cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let mut doc = Self {
            path: path.as_ref().to_path_buf(),
            writable: true,
            workbook: Workbook::new(),
            sheet_parts: Vec::new(),
            shared_strings: None,
        };
        doc.save()?;
        log::debug!("Created document {}", doc.path.display());
        Ok(doc)
    }

    /// Open an existing document
    ///
    /// Fails with [`XlsxError::DocumentNotFound`] or [`XlsxError::DocumentCorrupt`].
    pub fn open<P: AsRef<Path>>(path: P, writable: bool) -> XlsxResult<Self> {
        let path = path.as_ref();
        let package = XlsxReader::read_file(path)?;
        log::debug!(
            "Opened document {} ({})",
            path.display(),
            if writable { "read-write" } else { "read-only" }
        );

        Ok(Self {
            path: path.to_path_buf(),
            writable,
            workbook: package.workbook,
            sheet_parts: package.sheet_parts,
            shared_strings: package.shared_strings,
        })
    }

    /// Location of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the document may be saved
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// The in-memory workbook
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// The in-memory workbook, mutably
    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    /// The part backing a sheet, as of the last open or save
    pub fn sheet_part(&self, sheet_id: u32) -> XlsxResult<&SheetPart> {
        self.sheet_parts
            .iter()
            .find(|p| p.sheet_id == sheet_id)
            .ok_or(XlsxError::Core(Error::SheetIdNotFound(sheet_id)))
    }

    /// The shared string table, if the document has one
    pub fn intern_table(&self) -> Option<&SharedStrings> {
        self.shared_strings.as_ref()
    }

    /// Get the shared string index of a text, adding it (and the table) if needed
    pub fn intern<S: AsRef<str>>(&mut self, text: S) -> u32 {
        self.shared_strings
            .get_or_insert_with(SharedStrings::new)
            .intern(text)
    }

    /// Write the workbook to its path
    ///
    /// The sheet parts are refreshed from the in-memory tree afterwards.
    pub fn save(&mut self) -> XlsxResult<()> {
        if !self.writable {
            return Err(XlsxError::ReadOnly(self.path.clone()));
        }

        XlsxWriter::write_file(&self.workbook, self.shared_strings.as_ref(), &self.path)?;
        self.sheet_parts = self.workbook.sheets().map(SheetPart::from_sheet).collect();

        log::debug!(
            "Saved document {} ({} sheets)",
            self.path.display(),
            self.workbook.sheet_count()
        );
        Ok(())
    }

    /// Release the document
    ///
    /// Unsaved changes are discarded. Dropping the handle has the same effect.
    pub fn close(self) {
        log::debug!("Closed document {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcopy_core::{CellAddress, CellKind};

    #[test]
    fn test_create_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.xlsx");

        let doc = XlsxDocument::create(&path).unwrap();
        assert!(path.exists());
        assert!(doc.sheet_part(1).unwrap().is_empty());
        doc.close();

        let doc = XlsxDocument::open(&path, false).unwrap();
        assert_eq!(doc.workbook().sheet_list(), vec![(1, "Sheet1".to_string())]);
        assert!(doc.intern_table().is_none());
    }

    #[test]
    fn test_open_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = XlsxDocument::open(dir.path().join("nope.xlsx"), false).unwrap_err();
        assert!(matches!(err, XlsxError::DocumentNotFound(_)));
    }

    #[test]
    fn test_open_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xlsx");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        let err = XlsxDocument::open(&path, false).unwrap_err();
        assert!(matches!(err, XlsxError::DocumentCorrupt(_)));
    }

    #[test]
    fn test_create_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("new.xlsx");

        let err = XlsxDocument::create(&path).unwrap_err();
        assert!(matches!(err, XlsxError::PathUnwritable { .. }));
    }

    #[test]
    fn test_read_only_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.xlsx");
        XlsxDocument::create(&path).unwrap();

        let mut doc = XlsxDocument::open(&path, false).unwrap();
        assert!(matches!(doc.save(), Err(XlsxError::ReadOnly(_))));
    }

    #[test]
    fn test_intern_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interned.xlsx");

        let mut doc = XlsxDocument::create(&path).unwrap();
        let index = doc.intern("hello");
        assert_eq!(doc.intern("hello"), index);

        let address = CellAddress::parse("B1").unwrap();
        doc.workbook_mut()
            .sheet_by_name_mut("Sheet1")
            .unwrap()
            .upsert(&address, &index.to_string(), CellKind::SharedText);
        doc.save().unwrap();
        assert_eq!(doc.sheet_part(1).unwrap().len(), 1);

        let doc = XlsxDocument::open(&path, false).unwrap();
        let cell = doc.workbook().sheet(0).unwrap().get(&address).unwrap();
        assert_eq!(cell.resolve(doc.intern_table()).unwrap(), "hello");
    }
}
