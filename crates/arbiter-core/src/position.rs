//! Board coordinates.
//!
//! Two coordinate systems describe the same square:
//! - [`Position`] is the engine's internal `(row, column)` pair. Row 0 is
//!   Black's back rank (the top of a rendered board) and column 0 is the
//!   a-file.
//! - [`ChessPosition`] is the algebraic coordinate a player types (`e4`).
//!   Rank 1 is White's back rank.
//!
//! The mapping between them is `row = 8 - rank` and `column = file - 'a'`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of rows on the board.
pub const ROWS: u8 = 8;
/// Number of columns on the board.
pub const COLUMNS: u8 = 8;

/// Errors that can occur when building or parsing a coordinate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("invalid coordinate '{0}': expected a column letter followed by a row number, e.g. e4")]
    InvalidLength(String),
    #[error("invalid column '{0}': expected a-h")]
    InvalidColumn(char),
    #[error("invalid row '{0}': expected 1-8")]
    InvalidRow(char),
}

/// A square in internal `(row, column)` form, always on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    /// Creates a position, returning `None` when it is off the board.
    #[inline]
    pub const fn new(row: u8, column: u8) -> Option<Self> {
        if row < ROWS && column < COLUMNS {
            Some(Position { row, column })
        } else {
            None
        }
    }

    /// Creates a position from its index (`row * 8 + column`, 0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < ROWS * COLUMNS {
            Some(Position {
                row: index / COLUMNS,
                column: index % COLUMNS,
            })
        } else {
            None
        }
    }

    /// Returns the row (0-7, 0 at the top).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7, 0 for the a-file).
    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Returns the index (`row * 8 + column`, 0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.row * COLUMNS + self.column
    }

    /// Returns the position shifted by the given deltas, or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, rows: i8, columns: i8) -> Option<Self> {
        let row = self.row as i8 + rows;
        let column = self.column as i8 + columns;
        if row < 0 || column < 0 {
            return None;
        }
        Position::new(row as u8, column as u8)
    }

    /// Returns the position on the same row in another column.
    #[inline]
    pub const fn with_column(self, column: u8) -> Option<Self> {
        Position::new(self.row, column)
    }

    /// Iterates over all 64 positions, row by row from the top.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS * COLUMNS).filter_map(Position::from_index)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position({}, {} = {})",
            self.row,
            self.column,
            ChessPosition::from_position(*self)
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ChessPosition::from_position(*self))
    }
}

/// A square in algebraic form: column `'a'..='h'`, row `1..=8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPosition {
    column: char,
    row: u8,
}

impl ChessPosition {
    /// Creates an algebraic coordinate, validating both parts.
    pub fn new(column: char, row: u8) -> Result<Self, CoordinateError> {
        let column = column.to_ascii_lowercase();
        if !('a'..='h').contains(&column) {
            return Err(CoordinateError::InvalidColumn(column));
        }
        if !(1..=ROWS).contains(&row) {
            return Err(CoordinateError::InvalidRow(
                char::from_digit(u32::from(row), 10).unwrap_or('?'),
            ));
        }
        Ok(ChessPosition { column, row })
    }

    /// Returns the column letter.
    #[inline]
    pub const fn column(self) -> char {
        self.column
    }

    /// Returns the row number (1-8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Converts to the internal coordinate.
    pub fn to_position(self) -> Position {
        let row = ROWS - self.row;
        let column = self.column as u8 - b'a';
        Position { row, column }
    }

    /// Converts from the internal coordinate.
    pub fn from_position(position: Position) -> Self {
        ChessPosition {
            column: (b'a' + position.column) as char,
            row: ROWS - position.row,
        }
    }
}

impl From<Position> for ChessPosition {
    fn from(position: Position) -> Self {
        ChessPosition::from_position(position)
    }
}

impl From<ChessPosition> for Position {
    fn from(position: ChessPosition) -> Self {
        position.to_position()
    }
}

impl FromStr for ChessPosition {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let (Some(column), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CoordinateError::InvalidLength(trimmed.to_string()));
        };
        let digit = row
            .to_digit(10)
            .ok_or(CoordinateError::InvalidRow(row))?;
        if !(1..=u32::from(ROWS)).contains(&digit) {
            return Err(CoordinateError::InvalidRow(row));
        }
        ChessPosition::new(column, digit as u8)
    }
}

impl fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChessPosition({}{})", self.column, self.row)
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl Serialize for ChessPosition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChessPosition::from_position(*self).serialize(serializer)
    }
}
