//! Pseudo-legal move generation.
//!
//! Each piece kind produces the squares it could move to given the board,
//! ignoring whether the move would expose its own king. Filtering out
//! self-check is the match engine's job.

mod attacks;

use crate::{Board, Piece, PieceId};
use arbiter_core::{Color, MoveMatrix, PieceKind, Position};

pub use attacks::attacked_squares;
use attacks::{slide, step, ADJACENT, DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL};

/// Column the king starts on.
const KING_COLUMN: u8 = 4;
/// Column of the kingside rook.
const KINGSIDE_ROOK_COLUMN: u8 = 7;
/// Column of the queenside rook.
const QUEENSIDE_ROOK_COLUMN: u8 = 0;

/// Generates the pseudo-legal destinations of the piece on `from`.
///
/// `en_passant` is the pawn that just advanced two squares, if any. Returns
/// an empty matrix when `from` is empty.
pub fn pseudo_legal_moves(
    board: &Board,
    from: Position,
    en_passant: Option<PieceId>,
) -> MoveMatrix {
    let Some(piece) = board.piece_at(from) else {
        return MoveMatrix::EMPTY;
    };
    let color = piece.color();
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, from, piece, en_passant),
        PieceKind::Knight => step(board, from, color, &KNIGHT_JUMPS),
        PieceKind::Bishop => slide(board, from, color, &DIAGONAL),
        PieceKind::Rook => slide(board, from, color, &ORTHOGONAL),
        PieceKind::Queen => {
            slide(board, from, color, &ORTHOGONAL) | slide(board, from, color, &DIAGONAL)
        }
        PieceKind::King => step(board, from, color, &ADJACENT) | castling_moves(board, from, piece),
    }
}

/// Generates pseudo-legal pawn moves: pushes, captures and en passant.
fn pawn_moves(
    board: &Board,
    from: Position,
    pawn: &Piece,
    en_passant: Option<PieceId>,
) -> MoveMatrix {
    let color = pawn.color();
    let forward = color.forward();
    let mut matrix = MoveMatrix::EMPTY;

    // Single and double pushes
    if let Some(one) = from.offset(forward, 0).filter(|&sq| !board.is_occupied(sq)) {
        matrix.set(one);
        if pawn.move_count() == 0 {
            if let Some(two) = one.offset(forward, 0).filter(|&sq| !board.is_occupied(sq)) {
                matrix.set(two);
            }
        }
    }

    for dc in [-1, 1] {
        let Some(diagonal) = from.offset(forward, dc) else {
            continue;
        };

        // Ordinary capture
        if board
            .piece_at(diagonal)
            .is_some_and(|target| target.is_opponent_of(color))
        {
            matrix.set(diagonal);
            continue;
        }

        // En passant: the vulnerable pawn stands beside us on our row
        let beside = from.offset(0, dc).and_then(|sq| board.piece_at(sq));
        let passable = beside.is_some_and(|other| {
            other.kind() == PieceKind::Pawn
                && other.is_opponent_of(color)
                && Some(other.id()) == en_passant
        });
        if from.row() == color.en_passant_row() && passable && !board.is_occupied(diagonal) {
            matrix.set(diagonal);
        }
    }

    matrix
}

/// Generates castling destinations for an unmoved king on its home square.
///
/// The king may not be attacked, the rook on the chosen side must be an
/// unmoved rook of the same color, every square between them must be empty
/// and the square the king passes over must not be attacked.
fn castling_moves(board: &Board, from: Position, king: &Piece) -> MoveMatrix {
    let color = king.color();
    let mut matrix = MoveMatrix::EMPTY;
    if king.move_count() != 0 || from.row() != color.home_row() || from.column() != KING_COLUMN {
        return matrix;
    }

    let sides = [
        (KINGSIDE_ROOK_COLUMN, 1i8),
        (QUEENSIDE_ROOK_COLUMN, -1i8),
    ];
    let eligible: Vec<(u8, i8)> = sides
        .into_iter()
        .filter(|&(rook_column, direction)| {
            rook_can_castle(board, from, color, rook_column)
                && path_is_clear(board, from, rook_column, direction)
        })
        .collect();
    if eligible.is_empty() {
        return matrix;
    }

    let attacked = attacked_squares(board, color.opposite());
    if attacked.get(from) {
        return matrix;
    }
    for (_, direction) in eligible {
        let transit = from.offset(0, direction);
        let target = from.offset(0, 2 * direction);
        if let (Some(transit), Some(target)) = (transit, target) {
            if !attacked.get(transit) {
                matrix.set(target);
            }
        }
    }
    matrix
}

fn rook_can_castle(board: &Board, king_square: Position, color: Color, rook_column: u8) -> bool {
    king_square
        .with_column(rook_column)
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|rook| {
            rook.kind() == PieceKind::Rook && rook.color() == color && rook.move_count() == 0
        })
}

fn path_is_clear(board: &Board, king_square: Position, rook_column: u8, direction: i8) -> bool {
    let mut current = king_square;
    while let Some(next) = current.offset(0, direction) {
        if next.column() == rook_column {
            return true;
        }
        if board.is_occupied(next) {
            return false;
        }
        current = next;
    }
    false
}
