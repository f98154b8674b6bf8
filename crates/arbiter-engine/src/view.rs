//! Read-only views for presentation layers.

use crate::{ChessMatch, Piece, PieceId};
use arbiter_core::{ChessPosition, Color, PieceKind, COLUMNS, ROWS};
use serde::Serialize;
use std::fmt;

/// A snapshot of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub move_count: u32,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        PieceView {
            id: piece.id(),
            kind: piece.kind(),
            color: piece.color(),
            move_count: piece.move_count(),
        }
    }
}

impl From<Piece> for PieceView {
    fn from(piece: Piece) -> Self {
        PieceView::from(&piece)
    }
}

impl fmt::Display for PieceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.symbol_for(self.color))
    }
}

/// The full board as a grid of optional pieces, row 0 at the top.
pub type PieceGrid = [[Option<PieceView>; COLUMNS as usize]; ROWS as usize];

/// A serializable summary of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    pub turn: u32,
    pub current_player: Color,
    pub check: bool,
    pub checkmate: bool,
    /// One string per row from the top, `.` for empty squares.
    pub board: Vec<String>,
    pub captured: Vec<PieceView>,
    pub en_passant_vulnerable: Option<ChessPosition>,
    pub promoted: Option<ChessPosition>,
}

impl From<&ChessMatch> for MatchSnapshot {
    fn from(chess_match: &ChessMatch) -> Self {
        let board: Vec<String> = chess_match
            .pieces()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|square| square.map_or('.', |piece| piece.kind.symbol_for(piece.color)))
                    .collect::<String>()
            })
            .collect();
        MatchSnapshot {
            turn: chess_match.turn(),
            current_player: chess_match.current_player(),
            check: chess_match.check(),
            checkmate: chess_match.checkmate(),
            board,
            captured: chess_match.captured_pieces().iter().map(PieceView::from).collect(),
            en_passant_vulnerable: chess_match.en_passant_vulnerable(),
            promoted: chess_match.promoted(),
        }
    }
}
