//! Tentative move execution and its exact reversal.
//!
//! [`apply_move`] performs a move on the board with every side effect of
//! castling and en passant, and returns an [`AppliedMove`] record.
//! [`undo_move`] consumes that record and puts the board back exactly as
//! it was, move counters included. Legality testing and the checkmate
//! search rely on this pair being inverses.

use crate::{Board, BoardError, Piece};
use arbiter_core::{PieceKind, Position};

/// A piece removed from the board by a move, and the square it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub piece: Piece,
    pub square: Position,
}

/// The rook relocation that accompanies a castling king move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RookShift {
    pub from: Position,
    pub to: Position,
}

/// Everything needed to reverse a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub source: Position,
    pub target: Position,
    /// The captured piece. For en passant its square differs from `target`.
    pub captured: Option<Capture>,
    pub rook: Option<RookShift>,
}

/// Moves the piece on `source` to `target`, with castling and en passant side effects.
///
/// The move is not validated: callers pass squares taken from a pseudo-legal
/// matrix.
pub fn apply_move(
    board: &mut Board,
    source: Position,
    target: Position,
) -> Result<AppliedMove, BoardError> {
    let mut piece = board.remove(source).ok_or(BoardError::SquareEmpty(source))?;
    piece.increase_move_count();
    let mut captured = board
        .remove(target)
        .map(|piece| Capture { piece, square: target });
    board.place(piece, target)?;

    let column_delta = i16::from(target.column()) - i16::from(source.column());

    // Castling: the rook jumps to the square the king passed over
    let mut rook = None;
    if piece.kind() == PieceKind::King && column_delta.abs() == 2 {
        let (rook_column, inward) = if column_delta > 0 { (7, -1) } else { (0, 1) };
        let shift = source
            .with_column(rook_column)
            .zip(target.offset(0, inward))
            .map(|(from, to)| RookShift { from, to });
        if let Some(shift) = shift {
            let is_rook = board.piece_at(shift.from).is_some_and(|r| {
                r.kind() == PieceKind::Rook && r.color() == piece.color()
            });
            if is_rook {
                if let Some(mut castle) = board.remove(shift.from) {
                    castle.increase_move_count();
                    board.place(castle, shift.to)?;
                    rook = Some(shift);
                }
            }
        }
    }

    // En passant: a diagonal pawn move onto an empty square takes the pawn beside the source
    if piece.kind() == PieceKind::Pawn && column_delta != 0 && captured.is_none() {
        if let Some(passed) = source.with_column(target.column()) {
            captured = board
                .remove(passed)
                .map(|piece| Capture { piece, square: passed });
        }
    }

    Ok(AppliedMove {
        source,
        target,
        captured,
        rook,
    })
}

/// Reverses a move made by [`apply_move`].
pub fn undo_move(board: &mut Board, applied: &AppliedMove) -> Result<(), BoardError> {
    if let Some(shift) = applied.rook {
        let mut castle = board
            .remove(shift.to)
            .ok_or(BoardError::SquareEmpty(shift.to))?;
        castle.decrease_move_count();
        board.place(castle, shift.from)?;
    }

    let mut piece = board
        .remove(applied.target)
        .ok_or(BoardError::SquareEmpty(applied.target))?;
    piece.decrease_move_count();
    board.place(piece, applied.source)?;

    if let Some(capture) = applied.captured {
        board.place(capture.piece, capture.square)?;
    }
    Ok(())
}
