//! Helpers for building boards in unit tests.

use crate::Board;
use arbiter_core::{ChessPosition, Color, PieceKind, Position};

pub(crate) fn at(square: &str) -> Position {
    square
        .parse::<ChessPosition>()
        .expect("valid square in test")
        .to_position()
}

pub(crate) fn board_with(pieces: &[(&str, Color, PieceKind)]) -> Board {
    let mut board = Board::empty();
    for &(square, color, kind) in pieces {
        board
            .place_new(kind, color, at(square))
            .expect("free square in test");
    }
    board
}
