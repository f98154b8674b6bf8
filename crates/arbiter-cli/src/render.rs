//! Text rendering of the board and match status.

use arbiter_core::{Color, MoveMatrix};
use arbiter_engine::{ChessMatch, PieceView};

/// How pieces are drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    pub unicode: bool,
}

impl Style {
    fn piece(self, piece: &PieceView) -> char {
        if self.unicode {
            piece.kind.glyph(piece.color)
        } else {
            piece.kind.symbol_for(piece.color)
        }
    }
}

/// Renders the board with rank and file labels, rank 8 at the top.
///
/// Squares in `highlight` are bracketed.
pub fn board(chess_match: &ChessMatch, highlight: MoveMatrix, style: Style) -> String {
    let (rows, columns) = chess_match.board().dimensions();
    let grid = chess_match.pieces();
    let marked = highlight.to_rows();
    let mut out = String::new();
    for row in 0..rows as usize {
        out.push_str(&format!("{} ", rows as usize - row));
        for column in 0..columns as usize {
            let symbol = grid[row][column]
                .as_ref()
                .map_or('-', |piece| style.piece(piece));
            let cell = if marked[row][column] {
                format!("[{}]", symbol)
            } else {
                format!(" {} ", symbol)
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out.push(' ');
    for file in ('a'..='h').take(columns as usize) {
        out.push_str(&format!("  {}", file));
    }
    out.push('\n');
    out
}

/// Renders the captured pieces of each color.
pub fn captured(chess_match: &ChessMatch, style: Style) -> String {
    let mut out = String::new();
    for color in Color::ALL {
        let pieces: Vec<String> = chess_match
            .captured_pieces()
            .iter()
            .filter(|piece| piece.color() == color)
            .map(|piece| style.piece(&PieceView::from(piece)).to_string())
            .collect();
        out.push_str(&format!("Captured {}: [{}]\n", color, pieces.join(", ")));
    }
    out
}

/// Renders the turn line and any check or checkmate notice.
pub fn status(chess_match: &ChessMatch) -> String {
    if let Some(winner) = chess_match.winner() {
        return format!("CHECKMATE!\nWinner: {}\n", winner);
    }
    let mut out = format!(
        "Turn: {}\nWaiting player: {}\n",
        chess_match.turn(),
        chess_match.current_player()
    );
    if chess_match.check() {
        out.push_str("CHECK!\n");
    }
    out
}
