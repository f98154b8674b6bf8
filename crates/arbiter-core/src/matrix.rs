//! Destination matrices.
//!
//! A [`MoveMatrix`] answers "can this piece go to that square" for every
//! square of the board. It is stored as a 64-bit set where bit
//! `row * 8 + column` stands for the square at `(row, column)`.

use crate::{Position, COLUMNS, ROWS};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// The set of squares a piece may move to, viewed as an 8x8 boolean matrix.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct MoveMatrix(u64);

impl MoveMatrix {
    /// No squares marked.
    pub const EMPTY: MoveMatrix = MoveMatrix(0);

    /// Returns true if the given square is marked.
    #[inline]
    pub const fn get(self, position: Position) -> bool {
        (self.0 >> position.index()) & 1 == 1
    }

    /// Marks the given square.
    #[inline]
    pub fn set(&mut self, position: Position) {
        self.0 |= 1u64 << position.index();
    }

    /// Returns true if any square is marked.
    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    /// Returns true if no square is marked.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of marked squares.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the marked squares as a row-major boolean grid.
    pub fn to_rows(self) -> [[bool; COLUMNS as usize]; ROWS as usize] {
        let mut rows = [[false; COLUMNS as usize]; ROWS as usize];
        for position in self {
            rows[position.row() as usize][position.column() as usize] = true;
        }
        rows
    }

    /// Iterates over the marked squares, row by row from the top.
    #[inline]
    pub fn iter(self) -> MoveMatrixIter {
        MoveMatrixIter(self.0)
    }
}

impl BitAnd for MoveMatrix {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        MoveMatrix(self.0 & rhs.0)
    }
}

impl BitOr for MoveMatrix {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        MoveMatrix(self.0 | rhs.0)
    }
}

impl FromIterator<Position> for MoveMatrix {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut matrix = MoveMatrix::EMPTY;
        for position in iter {
            matrix.set(position);
        }
        matrix
    }
}

impl fmt::Debug for MoveMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MoveMatrix({:#018x})", self.0)?;
        for row in 0..ROWS {
            write!(f, "{} ", ROWS - row)?;
            for column in 0..COLUMNS {
                let marked = Position::new(row, column).is_some_and(|p| self.get(p));
                write!(f, "{} ", if marked { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over the marked squares of a [`MoveMatrix`].
pub struct MoveMatrixIter(u64);

impl Iterator for MoveMatrixIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Position::from_index(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for MoveMatrix {
    type Item = Position;
    type IntoIter = MoveMatrixIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
