//! Cell payload types

use std::fmt;

use super::CellAddress;
use crate::error::Result;
use crate::shared_text::{self, SharedStrings};

/// Type tag of a cell payload
///
/// The tag decides how the raw payload turns into the value a user sees,
/// see [`crate::shared_text::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellKind {
    /// Literal text
    #[default]
    Text,
    /// Index into the document's shared string table
    SharedText,
    /// `"0"` is FALSE, anything else TRUE
    Boolean,
    /// Numeric text, passed through unchanged
    Number,
}

impl CellKind {
    /// Get the type name for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Text => "text",
            CellKind::SharedText => "shared_text",
            CellKind::Boolean => "boolean",
            CellKind::Number => "number",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell: its address, raw payload and type tag
///
/// Cells are owned by their [`crate::Row`]. Writing to an existing cell
/// replaces payload and tag but never moves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    address: CellAddress,
    raw_value: String,
    kind: CellKind,
}

impl Cell {
    /// Create a new cell
    pub fn new<S: Into<String>>(address: CellAddress, raw_value: S, kind: CellKind) -> Self {
        Self {
            address,
            raw_value: raw_value.into(),
            kind,
        }
    }

    /// The cell's address
    pub fn address(&self) -> &CellAddress {
        &self.address
    }

    /// The raw payload as stored
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// The payload's type tag
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Replace payload and tag in place
    pub fn set<S: Into<String>>(&mut self, raw_value: S, kind: CellKind) {
        self.raw_value = raw_value.into();
        self.kind = kind;
    }

    /// Resolve the user-visible value of this cell
    pub fn resolve(&self, intern_table: Option<&SharedStrings>) -> Result<String> {
        shared_text::resolve(&self.raw_value, self.kind, intern_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_address() {
        let addr = CellAddress::parse("C3").unwrap();
        let mut cell = Cell::new(addr.clone(), "1", CellKind::Boolean);
        cell.set("v2", CellKind::Text);

        assert_eq!(cell.address(), &addr);
        assert_eq!(cell.raw_value(), "v2");
        assert_eq!(cell.kind(), CellKind::Text);
    }

    #[test]
    fn test_resolve_boolean() {
        let cell = Cell::new(CellAddress::parse("A1").unwrap(), "1", CellKind::Boolean);
        assert_eq!(cell.resolve(None).unwrap(), "TRUE");
    }
}
