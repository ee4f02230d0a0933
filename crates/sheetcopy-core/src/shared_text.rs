//! Shared-text interning and cell value resolution
//!
//! A document may carry an intern table of text values that `SharedText`
//! cells reference by 0-based index. [`resolve`] turns a raw payload and its
//! [`CellKind`] into the text a user sees.

use ahash::AHashMap;

use crate::cell::CellKind;
use crate::error::{Error, Result};

/// An ordered table of interned text values
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    /// First index of each distinct text
    lookup: AHashMap<String, u32>,
}

impl SharedStrings {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries in document order
    ///
    /// Duplicate entries keep their positions; interning reuses the first.
    pub fn from_vec(strings: Vec<String>) -> Self {
        let mut lookup = AHashMap::with_capacity(strings.len());
        for (i, s) in strings.iter().enumerate() {
            lookup.entry(s.clone()).or_insert(i as u32);
        }
        Self { strings, lookup }
    }

    /// Get the index of a text value, appending it if not yet present
    pub fn intern<S: AsRef<str>>(&mut self, s: S) -> u32 {
        let s = s.as_ref();
        if let Some(&index) = self.lookup.get(s) {
            return index;
        }
        let index = self.strings.len() as u32;
        self.strings.push(s.to_string());
        self.lookup.insert(s.to_string(), index);
        index
    }

    /// Get the text at an index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Iterate over entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl PartialEq for SharedStrings {
    fn eq(&self, other: &Self) -> bool {
        self.strings == other.strings
    }
}

/// Resolve a raw cell payload to its user-visible text
///
/// - `Text` and `Number` payloads are returned unchanged.
/// - `Boolean` is `"FALSE"` for exactly `"0"` and `"TRUE"` for anything else.
/// - `SharedText` is looked up in `intern_table`. An absent table yields
///   [`Error::MissingInternTable`]; an index that does not parse or is out of
///   range yields [`Error::UnresolvedSharedText`].
///
/// # Examples
/// ```
/// use sheetcopy_core::{resolve, CellKind, SharedStrings};
///
/// let table = SharedStrings::from_vec(vec!["hello".to_string()]);
/// assert_eq!(resolve("0", CellKind::SharedText, Some(&table)).unwrap(), "hello");
/// assert_eq!(resolve("0", CellKind::Boolean, None).unwrap(), "FALSE");
/// assert_eq!(resolve("yes", CellKind::Boolean, None).unwrap(), "TRUE");
/// ```
pub fn resolve(
    raw_value: &str,
    kind: CellKind,
    intern_table: Option<&SharedStrings>,
) -> Result<String> {
    match kind {
        CellKind::Text | CellKind::Number => Ok(raw_value.to_string()),
        CellKind::Boolean => Ok(if raw_value == "0" { "FALSE" } else { "TRUE" }.to_string()),
        CellKind::SharedText => {
            let table =
                intern_table.ok_or_else(|| Error::MissingInternTable(raw_value.to_string()))?;
            raw_value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|index| table.get(index))
                .map(str::to_string)
                .ok_or_else(|| Error::UnresolvedSharedText {
                    index: raw_value.to_string(),
                    len: table.len(),
                })
        }
    }
}
