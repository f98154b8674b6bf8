//! Error types for board and match operations.

use arbiter_core::{ChessPosition, Color, Position};
use thiserror::Error;

/// Errors raised by raw board manipulation.
///
/// These never arise from legitimate play; they indicate that the board and
/// the caller's bookkeeping disagree about where pieces are.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    SquareOccupied(Position),
    #[error("square {0} is empty")]
    SquareEmpty(Position),
}

/// Errors returned by [`ChessMatch`](crate::ChessMatch) operations.
///
/// Every variant except [`MatchError::MissingKing`],
/// [`MatchError::DuplicateKing`], [`MatchError::OpponentInCheck`] and
/// [`MatchError::Board`] is a
/// caller-correctable validation failure. A failed operation leaves the
/// match exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// No piece on the source square.
    #[error("there is no piece on {0}")]
    InvalidSource(ChessPosition),
    /// The piece on the source square belongs to the opponent.
    #[error("the piece on {0} is not yours")]
    WrongOwner(ChessPosition),
    /// The piece on the source square has no moves at all.
    #[error("the piece on {0} has no possible moves")]
    NoLegalMoves(ChessPosition),
    /// The target square is not reachable by the piece on the source square.
    #[error("the piece on {from} cannot move to {target}")]
    IllegalTarget {
        from: ChessPosition,
        target: ChessPosition,
    },
    /// The move would leave the mover's own king in check.
    #[error("you cannot put yourself in check")]
    SelfCheck,
    /// A promotion was chosen while no pawn is waiting to be promoted.
    #[error("there is no piece to be promoted")]
    NoPendingPromotion,
    /// The promotion code does not name Bishop, Knight, Queen or Rook.
    #[error("invalid promotion type '{0}': expected one of B, C, N, Q, R")]
    InvalidPromotionType(String),
    /// The match has ended in checkmate.
    #[error("the match is over")]
    MatchOver,
    /// A color has no king on the board.
    #[error("there is no {0} king on the board")]
    MissingKing(Color),
    /// A color has more than one king on the board.
    #[error("there is more than one {0} king on the board")]
    DuplicateKing(Color),
    /// The side not to move is in check, so its king could be captured.
    #[error("the {0} king is in check but it is not their turn")]
    OpponentInCheck(Color),
    #[error(transparent)]
    Board(#[from] BoardError),
}
