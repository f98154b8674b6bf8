//! Shared helpers for engine integration tests.

#![allow(dead_code)]

use arbiter_core::{ChessPosition, Color, PieceKind};
use arbiter_engine::{Board, ChessMatch};

/// Parses an algebraic square, panicking on bad test input.
pub fn sq(square: &str) -> ChessPosition {
    square
        .parse()
        .unwrap_or_else(|e| panic!("bad square {:?}: {}", square, e))
}

/// Builds a board holding exactly the listed pieces.
pub fn board_with(pieces: &[(&str, Color, PieceKind)]) -> Board {
    let mut board = Board::empty();
    for &(square, color, kind) in pieces {
        board
            .place_new(kind, color, sq(square).to_position())
            .expect("free square");
    }
    board
}

/// Plays a sequence of moves, panicking on the first rejected one.
pub fn play(chess_match: &mut ChessMatch, moves: &[(&str, &str)]) {
    for &(source, target) in moves {
        if let Err(e) = chess_match.perform_move(sq(source), sq(target)) {
            panic!("{}{} was rejected: {}", source, target, e);
        }
    }
}
