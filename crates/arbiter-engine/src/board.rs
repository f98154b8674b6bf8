//! Board representation.

use crate::{BoardError, Piece, PieceId};
use arbiter_core::{Color, PieceKind, Position, COLUMNS, ROWS};
use std::fmt;

/// Back-rank order from the a-file to the h-file.
const BACK_RANK: [PieceKind; COLUMNS as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces.
///
/// The board owns every piece in play: a piece is on exactly one square or
/// it is not on the board at all. It also hands out piece ids, so every
/// piece created through [`Board::spawn`] has an identity no other piece on
/// this board shares.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; COLUMNS as usize]; ROWS as usize],
    next_id: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; COLUMNS as usize]; ROWS as usize],
            next_id: 0,
        }
    }

    /// Creates a board with the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let home = color.home_row();
            let pawns = (home as i8 + color.forward()) as u8;
            for (column, kind) in (0u8..).zip(BACK_RANK) {
                board.fill(kind, color, home, column);
            }
            for column in 0..COLUMNS {
                board.fill(PieceKind::Pawn, color, pawns, column);
            }
        }
        board
    }

    fn fill(&mut self, kind: PieceKind, color: Color, row: u8, column: u8) {
        let piece = self.spawn(kind, color);
        self.squares[row as usize][column as usize] = Some(piece);
    }

    /// Returns the board dimensions as `(rows, columns)`.
    #[inline]
    pub const fn dimensions(&self) -> (u8, u8) {
        (ROWS, COLUMNS)
    }

    /// Creates a new, unmoved piece with a fresh id. The piece is not placed.
    pub fn spawn(&mut self, kind: PieceKind, color: Color) -> Piece {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        Piece::new(id, kind, color)
    }

    /// Creates a new piece and places it on an empty square.
    pub fn place_new(
        &mut self,
        kind: PieceKind,
        color: Color,
        position: Position,
    ) -> Result<PieceId, BoardError> {
        if self.is_occupied(position) {
            return Err(BoardError::SquareOccupied(position));
        }
        let piece = self.spawn(kind, color);
        self.place(piece, position)?;
        Ok(piece.id())
    }

    /// Places a piece on an empty square.
    pub fn place(&mut self, piece: Piece, position: Position) -> Result<(), BoardError> {
        let square = &mut self.squares[position.row() as usize][position.column() as usize];
        if square.is_some() {
            return Err(BoardError::SquareOccupied(position));
        }
        *square = Some(piece);
        Ok(())
    }

    /// Removes and returns the piece on a square.
    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize][position.column() as usize].take()
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.squares[position.row() as usize][position.column() as usize].as_ref()
    }

    /// Returns true if a piece stands on the square.
    #[inline]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.piece_at(position).is_some()
    }

    /// Iterates over every piece on the board with its square, row by row from the top.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        Position::all().filter_map(move |position| {
            self.piece_at(position).map(|piece| (position, piece))
        })
    }

    /// Iterates over the pieces of one color with their squares.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Returns the square of the piece with the given id.
    pub fn find(&self, id: PieceId) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.id() == id)
            .map(|(position, _)| position)
    }

    /// Returns the square of the given color's king.
    pub fn king(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(position, _)| position)
    }

    /// Counts the pieces of the given kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind() == kind)
            .count()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", ROWS as usize - row)?;
            for square in squares {
                match square {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}
