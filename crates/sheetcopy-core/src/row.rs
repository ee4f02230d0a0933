//! Row type

use std::cmp::Ordering;

use crate::cell::{Cell, CellAddress, CellKind};

/// A row of cells, kept unique and ascending by column
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row number (1-based)
    index: u32,
    cells: Vec<Cell>,
}

impl Row {
    /// Create a new empty row
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Row number (1-based)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Cells in ascending column order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cell in the same column as `address`
    pub fn cell(&self, address: &CellAddress) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.address().cmp_column(address) == Ordering::Equal)
    }

    /// Insert a cell or overwrite the one already in its column
    ///
    /// A new cell goes immediately before the first cell whose column is
    /// greater, or at the end when there is none. Returns `true` if a cell
    /// was inserted, `false` if an existing one was overwritten.
    pub fn upsert(&mut self, address: &CellAddress, raw_value: &str, kind: CellKind) -> bool {
        let mut insert_at = self.cells.len();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            match cell.address().cmp_column(address) {
                Ordering::Less => {}
                Ordering::Equal => {
                    cell.set(raw_value, kind);
                    return false;
                }
                Ordering::Greater => {
                    insert_at = i;
                    break;
                }
            }
        }

        self.cells
            .insert(insert_at, Cell::new(address.clone(), raw_value, kind));
        true
    }

    /// Check if row has any cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells in row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    fn columns(row: &Row) -> Vec<String> {
        row.cells().iter().map(|c| c.address().to_string()).collect()
    }

    #[test]
    fn test_insert_keeps_column_order() {
        let mut row = Row::new(1);
        assert!(row.upsert(&addr("B1"), "b", CellKind::Text));
        assert!(row.upsert(&addr("D1"), "d", CellKind::Text));
        assert!(row.upsert(&addr("C1"), "c", CellKind::Text));
        assert!(row.upsert(&addr("A1"), "a", CellKind::Text));

        assert_eq!(columns(&row), ["A1", "B1", "C1", "D1"]);
    }

    #[test]
    fn test_insert_uses_numeric_columns() {
        let mut row = Row::new(3);
        row.upsert(&addr("AA3"), "", CellKind::Text);
        row.upsert(&addr("Z3"), "", CellKind::Text);
        row.upsert(&addr("B3"), "", CellKind::Text);

        assert_eq!(columns(&row), ["B3", "Z3", "AA3"]);
    }

    #[test]
    fn test_overwrite_in_place() {
        let mut row = Row::new(3);
        row.upsert(&addr("B3"), "b", CellKind::Text);
        row.upsert(&addr("C3"), "v1", CellKind::Boolean);
        row.upsert(&addr("D3"), "d", CellKind::Text);

        assert!(!row.upsert(&addr("C3"), "v2", CellKind::Text));
        assert_eq!(row.cell_count(), 3);
        assert_eq!(columns(&row), ["B3", "C3", "D3"]);

        let cell = row.cell(&addr("C3")).unwrap();
        assert_eq!(cell.raw_value(), "v2");
        assert_eq!(cell.kind(), CellKind::Text);
    }

    #[test]
    fn test_overwrite_ignores_letter_case() {
        let mut row = Row::new(1);
        row.upsert(&addr("c1"), "lower", CellKind::Text);
        row.upsert(&addr("C1"), "upper", CellKind::Text);

        assert_eq!(row.cell_count(), 1);
        assert_eq!(columns(&row), ["c1"]);
        assert_eq!(row.cell(&addr("C1")).unwrap().raw_value(), "upper");
    }
}
