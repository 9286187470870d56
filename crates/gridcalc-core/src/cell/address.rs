//! Cell position type

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A zero-based (row, column) coordinate on the grid.
///
/// Positions order row-major, so sorting a list of positions walks the grid
/// top to bottom, left to right. [`Position::NONE`] is the invalid sentinel;
/// any coordinate that is negative or beyond the grid bounds is invalid too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index (0-based internally, 1-based in display)
    pub row: i32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: i32,
}

impl Position {
    /// The invalid position sentinel
    pub const NONE: Position = Position { row: -1, col: -1 };

    /// Create a new position
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether this position lies on the grid
    pub fn is_valid(&self) -> bool {
        (0..MAX_ROWS).contains(&self.row) && (0..MAX_COLS).contains(&self.col)
    }

    /// Parse a position from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::Position;
    ///
    /// let pos = Position::parse("B3").unwrap();
    /// assert_eq!(pos, Position::new(2, 1));
    /// assert!(Position::parse("3B").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let col = Self::letters_to_column(letters)?;
        let row: i32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based in A1 notation
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        let pos = Self::new(row - 1, col);
        if !pos.is_valid() {
            return Err(Error::InvalidAddress(format!("'{}' is outside the grid", s)));
        }
        Ok(pos)
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: i32) -> String {
        let mut result = String::new();
        let mut n = col as i64 + 1;

        while n > 0 {
            n -= 1;
            result.insert(0, ((n % 26) as u8 + b'A') as char);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<i32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: i64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as i64 - 'A' as i64 + 1);
            if col > MAX_COLS as i64 {
                return Err(Error::InvalidAddress(format!(
                    "column '{}' is beyond the grid",
                    letters
                )));
            }
        }

        Ok((col - 1) as i32)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::NONE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("#REF!");
        }
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Dimensions of a rectangular region, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub rows: i32,
    pub cols: i32,
}

impl Size {
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }
}
