//! Pieces on the board.

use arbiter_core::{Color, PieceKind};
use serde::Serialize;
use std::fmt;

/// Identity of a piece, unique within one board and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PieceId(pub(crate) u16);

/// A piece: identity, color, kind and how many times it has moved.
///
/// The piece does not know where it stands; the [`Board`](crate::Board)
/// square holding it is its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    move_count: u32,
}

impl Piece {
    pub(crate) const fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Piece {
            id,
            kind,
            color,
            move_count: 0,
        }
    }

    #[inline]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Number of moves this piece has made, tentative ones included.
    #[inline]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub(crate) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }

    #[inline]
    pub(crate) fn decrease_move_count(&mut self) {
        self.move_count = self.move_count.saturating_sub(1);
    }

    /// Returns true if this piece belongs to the other color.
    #[inline]
    pub fn is_opponent_of(&self, color: Color) -> bool {
        self.color != color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.symbol_for(self.color))
    }
}
