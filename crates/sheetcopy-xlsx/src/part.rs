//! Raw sheet parts as stored in the package

use sheetcopy_core::{CellKind, Sheet};

/// One `<c>` element of a worksheet part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRecord {
    /// Cell reference exactly as written (e.g., "B7")
    pub reference: String,
    /// Type tag derived from the `t` attribute
    pub kind: CellKind,
    /// Text of the `<v>` element, or of the inline string
    pub raw_value: String,
}

impl CellRecord {
    /// Create a new record
    pub fn new<R, V>(reference: R, kind: CellKind, raw_value: V) -> Self
    where
        R: Into<String>,
        V: Into<String>,
    {
        Self {
            reference: reference.into(),
            kind,
            raw_value: raw_value.into(),
        }
    }
}

/// The cells of one worksheet part, in the order the package lists them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetPart {
    /// Id of the sheet this part backs
    pub sheet_id: u32,
    /// Cells in document order
    pub cells: Vec<CellRecord>,
}

impl SheetPart {
    /// Create an empty part for a sheet
    pub fn new(sheet_id: u32) -> Self {
        Self {
            sheet_id,
            cells: Vec::new(),
        }
    }

    /// Snapshot an in-memory sheet, in row/column order
    pub fn from_sheet(sheet: &Sheet) -> Self {
        Self {
            sheet_id: sheet.id(),
            cells: sheet
                .cells()
                .map(|c| CellRecord::new(c.address().to_string(), c.kind(), c.raw_value()))
                .collect(),
        }
    }

    /// Cell references in document order
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.reference.as_str())
    }

    /// First record with exactly this reference
    pub fn find(&self, reference: &str) -> Option<&CellRecord> {
        self.cells.iter().find(|c| c.reference == reference)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the part has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Map a cell's `t` attribute to its type tag
///
/// Absent and `n` are numbers; formula strings, inline strings, errors and
/// ISO dates carry their payload as text.
pub fn kind_from_type_attr(t: Option<&str>) -> CellKind {
    match t {
        Some("s") => CellKind::SharedText,
        Some("b") => CellKind::Boolean,
        Some("str") | Some("inlineStr") | Some("e") | Some("d") => CellKind::Text,
        _ => CellKind::Number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcopy_core::CellAddress;

    #[test]
    fn test_kind_from_type_attr() {
        assert_eq!(kind_from_type_attr(None), CellKind::Number);
        assert_eq!(kind_from_type_attr(Some("n")), CellKind::Number);
        assert_eq!(kind_from_type_attr(Some("s")), CellKind::SharedText);
        assert_eq!(kind_from_type_attr(Some("b")), CellKind::Boolean);
        assert_eq!(kind_from_type_attr(Some("inlineStr")), CellKind::Text);
        assert_eq!(kind_from_type_attr(Some("str")), CellKind::Text);
    }

    #[test]
    fn test_from_sheet_uses_store_order() {
        let mut sheet = Sheet::new(2, "Sheet2");
        for r in ["C2", "A2", "B1"] {
            sheet.upsert(&CellAddress::parse(r).unwrap(), r, CellKind::Text);
        }

        let part = SheetPart::from_sheet(&sheet);
        assert_eq!(part.sheet_id, 2);
        assert_eq!(part.references().collect::<Vec<_>>(), ["B1", "A2", "C2"]);
        assert_eq!(part.find("A2").unwrap().raw_value, "A2");
        assert!(part.find("a2").is_none());
    }
}
