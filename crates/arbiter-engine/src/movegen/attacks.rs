//! Movement geometry shared by move generation and attack detection.

use crate::{Board, Piece};
use arbiter_core::{Color, MoveMatrix, PieceKind, Position};

/// Row/column steps along ranks and files.
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Row/column steps along diagonals.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight neighbouring steps.
pub(crate) const ADJACENT: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Knight jumps.
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Returns true if a piece of `color` may end its move on `to`: the square
/// is empty or holds an opponent.
#[inline]
pub(crate) fn can_land(board: &Board, to: Position, color: Color) -> bool {
    board
        .piece_at(to)
        .map_or(true, |piece| piece.is_opponent_of(color))
}

/// Squares reached by sliding along each direction until the edge or the
/// first occupied square, which is included only when it holds an opponent.
pub(crate) fn slide(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i8, i8)],
) -> MoveMatrix {
    let mut matrix = MoveMatrix::EMPTY;
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match board.piece_at(next) {
                None => matrix.set(next),
                Some(piece) => {
                    if piece.is_opponent_of(color) {
                        matrix.set(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    matrix
}

/// Squares reached by a single step in each direction.
pub(crate) fn step(
    board: &Board,
    from: Position,
    color: Color,
    offsets: &[(i8, i8)],
) -> MoveMatrix {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| can_land(board, to, color))
        .collect()
}

/// Squares a pawn of `color` on `from` attacks, whether or not anything stands there.
pub(crate) fn pawn_attacks(from: Position, color: Color) -> MoveMatrix {
    [-1, 1]
        .into_iter()
        .filter_map(|dc| from.offset(color.forward(), dc))
        .collect()
}

/// Squares the piece on `from` attacks.
///
/// Pawns attack both forward diagonals regardless of occupancy and kings do
/// not castle, so this never recurses into castling checks.
pub(crate) fn attacks_from(board: &Board, from: Position, piece: &Piece) -> MoveMatrix {
    let color = piece.color();
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(from, color),
        PieceKind::Knight => step(board, from, color, &KNIGHT_JUMPS),
        PieceKind::Bishop => slide(board, from, color, &DIAGONAL),
        PieceKind::Rook => slide(board, from, color, &ORTHOGONAL),
        PieceKind::Queen => {
            slide(board, from, color, &ORTHOGONAL) | slide(board, from, color, &DIAGONAL)
        }
        PieceKind::King => step(board, from, color, &ADJACENT),
    }
}

/// Returns every square attacked by at least one piece of `by`.
pub fn attacked_squares(board: &Board, by: Color) -> MoveMatrix {
    board
        .pieces_of(by)
        .fold(MoveMatrix::EMPTY, |acc, (from, piece)| {
            acc | attacks_from(board, from, piece)
        })
}
