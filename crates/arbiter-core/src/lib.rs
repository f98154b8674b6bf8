//! Core types for the chess match arbiter.
//!
//! This crate provides the fundamental types shared by the engine and any
//! presentation layer:
//! - [`Color`] and [`PieceKind`] for piece representation
//! - [`Position`] (internal row/column) and [`ChessPosition`] (algebraic
//!   `e4`-style coordinates) for board coordinates
//! - [`MoveMatrix`] for the set of destinations a piece can reach
//! - [`CoordinateMove`] for `e2e4`-style coordinate pairs

mod color;
mod coordinate_move;
mod matrix;
mod piece;
mod position;

pub use color::Color;
pub use coordinate_move::{CoordinateMove, MoveParseError};
pub use matrix::{MoveMatrix, MoveMatrixIter};
pub use piece::PieceKind;
pub use position::{ChessPosition, CoordinateError, Position, COLUMNS, ROWS};
