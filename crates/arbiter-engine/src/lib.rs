//! Chess match engine: the rules arbiter behind a two-player game.
//!
//! This crate provides:
//! - [`Board`] - an 8×8 grid owning the pieces in play
//! - [`ChessMatch`] - turn order, move validation, castling, en passant,
//!   promotion, check and checkmate
//! - [`pseudo_legal_moves`] - per-piece movement geometry as a [`MoveMatrix`]
//! - [`apply_move`] / [`undo_move`] - tentative execution with exact reversal
//! - [`PieceView`] and [`MatchSnapshot`] - read-only views for presentation layers
//!
//! # Architecture
//!
//! Movement geometry is pseudo-legal: it ignores whether a move exposes the
//! mover's own king. [`ChessMatch`] filters self-check by applying a move,
//! testing for check, and undoing it when needed. Checkmate is found the
//! same way, by trying every pseudo-legal move of the side in check.
//!
//! # Example
//!
//! ```
//! use arbiter_core::{ChessPosition, Color};
//! use arbiter_engine::ChessMatch;
//!
//! let sq = |s: &str| s.parse::<ChessPosition>().unwrap();
//!
//! let mut chess_match = ChessMatch::new();
//! let moves = chess_match.possible_moves(sq("e2")).unwrap();
//! assert_eq!(moves.count(), 2);
//!
//! chess_match.perform_move(sq("e2"), sq("e4")).unwrap();
//! assert_eq!(chess_match.turn(), 2);
//! assert_eq!(chess_match.current_player(), Color::Black);
//! assert_eq!(chess_match.en_passant_vulnerable(), Some(sq("e4")));
//! ```
//!
//! [`MoveMatrix`]: arbiter_core::MoveMatrix

mod board;
mod check;
mod chess_match;
mod error;
mod execute;
pub mod movegen;
mod piece;
mod view;

#[cfg(test)]
mod testing;

pub use board::Board;
pub use check::{is_in_check, is_in_checkmate};
pub use chess_match::ChessMatch;
pub use error::{BoardError, MatchError};
pub use execute::{apply_move, undo_move, AppliedMove, Capture, RookShift};
pub use movegen::{attacked_squares, pseudo_legal_moves};
pub use piece::{Piece, PieceId};
pub use view::{MatchSnapshot, PieceGrid, PieceView};
