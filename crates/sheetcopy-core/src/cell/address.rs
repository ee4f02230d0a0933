//! Cell address type

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A cell address (e.g., "A1", "B7", "AA10")
///
/// The column letters are kept exactly as written so the address formats back
/// to the text it was parsed from. Comparison and equality use the numeric
/// column value (A=1, Z=26, AA=27, ...) and ignore letter case, so `"b2"` and
/// `"B2"` name the same cell and `"B10"` sorts after `"B2"`.
#[derive(Debug, Clone)]
pub struct CellAddress {
    /// Column letters as given
    letters: String,
    /// Column number (1-based, A=1)
    col: u32,
    /// Row number (1-based)
    row: u32,
}

impl CellAddress {
    /// Create an address from 1-based row and column numbers
    ///
    /// Returns `None` when either coordinate is zero or beyond the sheet limits.
    pub fn new(row: u32, col: u32) -> Option<Self> {
        if row == 0 || row > MAX_ROWS || col == 0 || col > MAX_COLS {
            return None;
        }
        Some(Self {
            letters: Self::column_to_letters(col),
            col,
            row,
        })
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sheetcopy_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B7").unwrap();
    /// assert_eq!(addr.row(), 7);
    /// assert_eq!(addr.col(), 2);
    /// assert_eq!(addr.to_string(), "B7");
    ///
    /// assert!(CellAddress::parse("B0").is_err());
    /// assert!(CellAddress::parse("7B").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() {
            return Err(Error::MalformedAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if digits.is_empty() {
            return Err(Error::MalformedAddress(format!("no row number in '{}'", s)));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| Error::MalformedAddress(format!("row number too large in '{}'", s)))?;
        if row == 0 {
            return Err(Error::MalformedAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::MalformedAddress(format!(
                "row number exceeds {} in '{}'",
                MAX_ROWS, s
            )));
        }

        let col = Self::letters_to_column(letters)?;

        Ok(Self {
            letters: letters.to_string(),
            col,
            row,
        })
    }

    /// Row number (1-based)
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column number (1-based, A=1)
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Column letters exactly as written
    pub fn column_letters(&self) -> &str {
        &self.letters
    }

    /// Compare only the column part of two addresses
    pub fn cmp_column(&self, other: &Self) -> Ordering {
        self.col.cmp(&other.col)
    }

    /// Convert a column number to letters (1 = A, 26 = Z, 27 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a number (A = 1, Z = 26, AA = 27, etc.)
    ///
    /// Letters are case-insensitive.
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::MalformedAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::MalformedAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS {
                return Err(Error::MalformedAddress(format!(
                    "column '{}' exceeds the sheet width",
                    letters
                )));
            }
        }

        Ok(col)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", self.letters, self.row)
    }
}

impl PartialEq for CellAddress {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for CellAddress {}

impl Hash for CellAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
    }
}

impl Ord for CellAddress {
    /// Row first, then column
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.cmp_column(other))
    }
}

impl PartialOrd for CellAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letters, self.row)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(1), "A");
        assert_eq!(CellAddress::column_to_letters(2), "B");
        assert_eq!(CellAddress::column_to_letters(26), "Z");
        assert_eq!(CellAddress::column_to_letters(27), "AA");
        assert_eq!(CellAddress::column_to_letters(702), "ZZ");
        assert_eq!(CellAddress::column_to_letters(703), "AAA");
        assert_eq!(CellAddress::column_to_letters(16384), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 1);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 27);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16384);

        // Case insensitive
        assert_eq!(CellAddress::letters_to_column("aa").unwrap(), 27);

        assert!(CellAddress::letters_to_column("XFE").is_err());
    }

    #[test]
    fn test_parse() {
        let a = addr("B7");
        assert_eq!((a.col(), a.row()), (2, 7));
        assert_eq!(a.column_letters(), "B");

        let a = addr("XFD1048576");
        assert_eq!((a.col(), a.row()), (16384, 1_048_576));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "A", "7", "7B", "A0", "A00", "B-1", "B+1", "A1B", " A1", "A1048577"] {
            assert!(
                matches!(CellAddress::parse(bad), Err(Error::MalformedAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_preserves_case_and_drops_leading_zeros() {
        assert_eq!(addr("ab12").to_string(), "ab12");
        assert_eq!(addr("C007").to_string(), "C7");
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(addr("B10") > addr("B2"));
        assert!(addr("AA1") > addr("Z1"));
        assert!(addr("Z1") < addr("A2"));
        assert_eq!(addr("b2").cmp(&addr("B2")), Ordering::Equal);
        assert_eq!(addr("b2"), addr("B2"));
    }

    #[test]
    fn test_new() {
        assert_eq!(CellAddress::new(3, 28).unwrap().to_string(), "AB3");
        assert!(CellAddress::new(0, 1).is_none());
        assert!(CellAddress::new(1, 0).is_none());
    }

    proptest! {
        #[test]
        fn prop_round_trips_through_text(row in 1u32..=MAX_ROWS, col in 1u32..=MAX_COLS) {
            let text = format!("{}{}", CellAddress::column_to_letters(col), row);
            let parsed = CellAddress::parse(&text).unwrap();
            prop_assert_eq!(parsed.to_string(), text);
            prop_assert_eq!((parsed.row(), parsed.col()), (row, col));
        }

        #[test]
        fn prop_order_matches_numeric_coordinates(
            r1 in 1u32..500, c1 in 1u32..800,
            r2 in 1u32..500, c2 in 1u32..800,
        ) {
            let a = CellAddress::new(r1, c1).unwrap();
            let b = CellAddress::new(r2, c2).unwrap();
            prop_assert_eq!(a.cmp(&b), (r1, c1).cmp(&(r2, c2)));
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }
    }
}
