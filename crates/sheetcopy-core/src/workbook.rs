//! Workbook type - the sheet directory

use crate::error::{Error, Result};
use crate::sheet::Sheet;
use crate::DEFAULT_SHEET_NAME;

/// A workbook (spreadsheet document)
///
/// Sheets are kept in creation order and are only ever appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a new workbook holding one default sheet (`Sheet1`, id 1)
    pub fn new() -> Self {
        Self {
            sheets: vec![Sheet::new(1, DEFAULT_SHEET_NAME)],
        }
    }

    /// Create an empty workbook with no sheets
    pub fn empty() -> Self {
        Self { sheets: Vec::new() }
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Iterate over sheets in creation order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Get a sheet by position
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get the first sheet with the given name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get the first sheet with the given name, mutably
    pub fn sheet_by_name_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// Get a sheet by name, failing with [`Error::SheetNotFound`]
    pub fn require_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheet_by_name(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Get a sheet by name mutably, failing with [`Error::SheetNotFound`]
    pub fn require_sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheet_by_name_mut(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Get a sheet by id
    pub fn sheet_by_id(&self, id: u32) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id() == id)
    }

    /// Get a sheet by id, mutably
    pub fn sheet_by_id_mut(&mut self, id: u32) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.id() == id)
    }

    /// `(id, name)` of every sheet in creation order
    pub fn sheet_list(&self) -> Vec<(u32, String)> {
        self.sheets
            .iter()
            .map(|s| (s.id(), s.name().to_string()))
            .collect()
    }

    /// Id the next added sheet will receive: one more than the largest id
    ///
    /// This is not a count, so gaps left in the id sequence are never reused.
    /// Fails with [`Error::SheetIdExhausted`] once the largest id is `u32::MAX`.
    pub fn next_sheet_id(&self) -> Result<u32> {
        match self.sheets.iter().map(Sheet::id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(Error::SheetIdExhausted),
        }
    }

    /// Add a new sheet named `Sheet<id>` with the next free id
    ///
    /// # Example
    /// ```
    /// use sheetcopy_core::Workbook;
    ///
    /// let mut wb = Workbook::new();
    /// let sheet = wb.add_sheet().unwrap();
    /// assert_eq!((sheet.id(), sheet.name()), (2, "Sheet2"));
    /// ```
    pub fn add_sheet(&mut self) -> Result<&mut Sheet> {
        let id = self.next_sheet_id()?;
        self.push_sheet(id, format!("Sheet{}", id))
    }

    /// Append a sheet with an explicit id and name
    ///
    /// Used when loading a document whose directory is already assigned.
    pub fn push_sheet<S: Into<String>>(&mut self, id: u32, name: S) -> Result<&mut Sheet> {
        let name = name.into();
        if self.sheet_by_id(id).is_some() {
            return Err(Error::DuplicateSheetId(id));
        }
        if self.sheet_by_name(&name).is_some() {
            return Err(Error::DuplicateSheetName(name));
        }

        let index = self.sheets.len();
        self.sheets.push(Sheet::new(id, name));
        Ok(&mut self.sheets[index])
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}
