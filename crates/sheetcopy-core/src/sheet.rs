//! Sheet type: the ordered row/cell store

use crate::cell::{Cell, CellAddress, CellKind};
use crate::row::Row;

/// A sheet in a workbook
///
/// Rows are kept unique and ascending by index. Rows and cells are created
/// on the first write to an address and overwritten in place afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Unique within the workbook
    id: u32,
    /// Unique within the workbook
    name: String,
    rows: Vec<Row>,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new<S: Into<String>>(id: u32, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Sheet id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows in ascending order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by its 1-based index
    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows
            .binary_search_by_key(&index, Row::index)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Iterate over all cells, row by row, each row in column order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.cells().iter())
    }

    /// Insert a cell, or overwrite the payload of the cell already at `address`
    ///
    /// Returns `true` if a new cell was created.
    pub fn upsert(&mut self, address: &CellAddress, raw_value: &str, kind: CellKind) -> bool {
        let pos = match self
            .rows
            .binary_search_by_key(&address.row(), Row::index)
        {
            Ok(pos) => pos,
            Err(pos) => {
                self.rows.insert(pos, Row::new(address.row()));
                pos
            }
        };
        self.rows[pos].upsert(address, raw_value, kind)
    }

    /// Get the cell at an exact address
    pub fn get(&self, address: &CellAddress) -> Option<&Cell> {
        self.row(address.row()).and_then(|row| row.cell(address))
    }

    /// Number of rows holding at least one cell
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in the sheet
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Row::cell_count).sum()
    }

    /// Check if the sheet has no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
