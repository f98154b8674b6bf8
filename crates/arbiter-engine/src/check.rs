//! Check and checkmate detection.

use crate::execute::{apply_move, undo_move};
use crate::movegen::pseudo_legal_moves;
use crate::{Board, MatchError, PieceId};
use arbiter_core::{Color, Position};

/// Returns true if any opposing piece could move onto `color`'s king.
///
/// # Errors
///
/// Returns [`MatchError::MissingKing`] if `color` has no king on the board.
pub fn is_in_check(
    board: &Board,
    color: Color,
    en_passant: Option<PieceId>,
) -> Result<bool, MatchError> {
    let king = board.king(color).ok_or(MatchError::MissingKing(color))?;
    Ok(board
        .pieces_of(color.opposite())
        .any(|(from, _)| pseudo_legal_moves(board, from, en_passant).get(king)))
}

/// Returns true if `color` is in check and no pseudo-legal move of any of
/// its pieces gets it out.
///
/// Every candidate move is applied to `board`, tested, and undone, so the
/// board is left as it was found.
pub fn is_in_checkmate(
    board: &mut Board,
    color: Color,
    en_passant: Option<PieceId>,
) -> Result<bool, MatchError> {
    if !is_in_check(board, color, en_passant)? {
        return Ok(false);
    }
    let origins: Vec<Position> = board.pieces_of(color).map(|(from, _)| from).collect();
    for source in origins {
        for target in pseudo_legal_moves(board, source, en_passant) {
            if !leaves_in_check(board, source, target, color, en_passant)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Simulates a move and reports whether `color` is in check afterwards.
pub(crate) fn leaves_in_check(
    board: &mut Board,
    source: Position,
    target: Position,
    color: Color,
    en_passant: Option<PieceId>,
) -> Result<bool, MatchError> {
    let applied = apply_move(board, source, target)?;
    let in_check = is_in_check(board, color, en_passant);
    undo_move(board, &applied)?;
    in_check
}
