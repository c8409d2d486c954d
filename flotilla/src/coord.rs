//! Grid coordinates and the human-readable label codec.
//!
//! Labels are the classic battleship call signs: one or more row letters
//! followed by a 1-based column number, e.g. `"D10"`. Internally everything
//! is a zero-based `(row, col)` pair. Parsing only validates the *format*;
//! whether the coordinate actually fits a particular board is a separate
//! check made by whichever operation consumes it.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Matcher for coordinate labels: letters then digits, nothing else.
static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<row>[A-Za-z]+)(?P<col>[0-9]+)$").unwrap());

/// Error returned when a coordinate label cannot be parsed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ParseLabelError {
    /// The label was not row letters followed by a 1-based column number.
    #[error("expected row letters followed by a column number, like \"D5\"")]
    InvalidFormat,
}

/// The position of a single cell in the board, zero-based.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Vertical position of the cell (labelled with letters, `A` = 0).
    pub row: usize,
    /// Horizontal position of the cell (labelled 1-based).
    pub col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a label such as `"D10"` into a [`Coordinate`].
    ///
    /// Accepts lower or upper case letters. Row letters decode like
    /// spreadsheet columns (`A` = 0, `Z` = 25, `AA` = 26) so the codec does
    /// not depend on any particular board size; range checking against a
    /// board is the caller's job.
    pub fn parse_label(label: &str) -> Result<Self, ParseLabelError> {
        let caps = LABEL.captures(label).ok_or(ParseLabelError::InvalidFormat)?;

        let mut row: usize = 0;
        for b in caps["row"].bytes() {
            let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
            row = row
                .checked_mul(26)
                .and_then(|r| r.checked_add(digit))
                .ok_or(ParseLabelError::InvalidFormat)?;
        }

        let col: usize = caps["col"]
            .parse()
            .map_err(|_| ParseLabelError::InvalidFormat)?;
        if col == 0 {
            // Column numbers are 1-based; there is no column 0.
            return Err(ParseLabelError::InvalidFormat);
        }

        Ok(Self::new(row - 1, col - 1))
    }

    /// Render this coordinate as a label, the inverse of
    /// [`parse_label`][Self::parse_label].
    pub fn label(&self) -> String {
        format!("{}{}", row_letters(self.row), self.col + 1)
    }
}

/// Get the letter part of a row's label (`0` = `"A"`, `25` = `"Z"`,
/// `26` = `"AA"`).
pub fn row_letters(row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = row + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    // Only ASCII uppercase bytes were pushed.
    String::from_utf8(letters).unwrap()
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.label())
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(row, col)` pair.
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}
