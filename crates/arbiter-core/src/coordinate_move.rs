//! Coordinate move notation.
//!
//! A move is written as its source and target squares, optionally followed
//! by a promotion code: `e2e4`, `e2 e4`, `e7e8q`, `e7e8C`.

use crate::{ChessPosition, CoordinateError, PieceKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a coordinate move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move '{0}': expected source and target squares, e.g. e2e4")]
    InvalidLength(String),
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    #[error("invalid promotion code '{0}': expected one of B, C, N, Q, R")]
    InvalidPromotion(char),
}

/// A source/target pair with an optional promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateMove {
    pub source: ChessPosition,
    pub target: ChessPosition,
    pub promotion: Option<PieceKind>,
}


impl FromStr for CoordinateMove {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
            return Err(MoveParseError::InvalidLength(s.trim().to_string()));
        }
        let source = compact[0..2].parse()?;
        let target = compact[2..4].parse()?;
        let promotion = match compact[4..].chars().next() {
            Some(code) => Some(
                PieceKind::from_promotion_code(&code.to_string())
                    .ok_or(MoveParseError::InvalidPromotion(code))?,
            ),
            None => None,
        };
        Ok(CoordinateMove {
            source,
            target,
            promotion,
        })
    }
}

impl fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
