//! Column codec and cell references
//!
//! Column letters use bijective base-26: there is no zero digit, so `A` = 1,
//! `Z` = 26, `AA` = 27, `AZ` = 52, `BA` = 53, ... Every positive integer maps to
//! exactly one letter sequence.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, etc.)
///
/// Lower-case letters are accepted and folded to upper case.
///
/// # Examples
/// ```
/// use sheet_reader_core::column_to_index;
///
/// assert_eq!(column_to_index("A").unwrap(), 1);
/// assert_eq!(column_to_index("AA").unwrap(), 27);
/// assert!(column_to_index("A1").is_err());
/// ```
pub fn column_to_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        index = index
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| Error::InvalidAddress(format!("column '{}' is too large", letters)))?;
    }

    Ok(index)
}

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
pub fn index_to_column(index: u32) -> Result<String> {
    if index < 1 {
        return Err(Error::InvalidAddress(format!(
            "column index must be >= 1, got {}",
            index
        )));
    }

    Ok(encode_letters(index))
}

fn encode_letters(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        n -= 1;
        letters.push((n % 26) as u8 + b'A');
        n /= 26;
    }
    letters.into_iter().rev().map(char::from).collect()
}

/// A worksheet column, compared and ordered by its numeric index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u32);

impl Column {
    /// Create a column from a 1-based index
    pub fn new(index: u32) -> Result<Self> {
        if index < 1 {
            return Err(Error::InvalidAddress(format!(
                "column index must be >= 1, got {}",
                index
            )));
        }
        Ok(Self(index))
    }

    /// Parse a column from its letters
    pub fn parse(letters: &str) -> Result<Self> {
        column_to_index(letters).map(Self)
    }

    /// 1-based index
    pub fn index(self) -> u32 {
        self.0
    }

    /// Column letters
    pub fn letters(self) -> String {
        encode_letters(self.0)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<u32> for Column {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self> {
        Self::new(index)
    }
}

/// Anything a caller may use to name a column: an index, letters or a [`Column`]
pub trait IntoColumn {
    /// Convert into a validated [`Column`]
    fn into_column(self) -> Result<Column>;
}

impl IntoColumn for Column {
    fn into_column(self) -> Result<Column> {
        Ok(self)
    }
}

impl IntoColumn for u32 {
    fn into_column(self) -> Result<Column> {
        Column::new(self)
    }
}

impl IntoColumn for &str {
    fn into_column(self) -> Result<Column> {
        Column::parse(self)
    }
}

impl IntoColumn for &String {
    fn into_column(self) -> Result<Column> {
        Column::parse(self)
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Result<Column> {
        Column::parse(&self)
    }
}

/// A cell reference: column and 1-based row (e.g., "B7")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    /// Column
    pub column: Column,
    /// Row number (1-based)
    pub row: u32,
}

impl CellRef {
    /// Create a reference from any column form and a 1-based row
    pub fn new<C: IntoColumn>(column: C, row: u32) -> Result<Self> {
        let column = column.into_column()?;
        if row < 1 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1, got {}",
                row
            )));
        }
        Ok(Self { column, row })
    }

    /// Parse a reference from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sheet_reader_core::CellRef;
    ///
    /// let cell = CellRef::parse("AC12").unwrap();
    /// assert_eq!(cell.column.index(), 29);
    /// assert_eq!(cell.row, 12);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(|| Error::InvalidAddress(format!("no row number in '{}'", s)))?;

        let (letters, digits) = s.split_at(split);
        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        Self::new(letters, row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
