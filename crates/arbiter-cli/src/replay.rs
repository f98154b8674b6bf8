//! Non-interactive replay of coordinate moves.

use anyhow::{bail, Context};
use arbiter_core::CoordinateMove;
use arbiter_engine::ChessMatch;

/// Plays `moves` from the standard position and returns the resulting match.
///
/// Each move is an `e2e4`-style pair with an optional promotion letter
/// (`e7e8n`). A promotion letter on a move that does not promote is an error.
pub fn replay<S: AsRef<str>>(moves: &[S]) -> anyhow::Result<ChessMatch> {
    let mut chess_match = ChessMatch::new();
    for (index, text) in moves.iter().enumerate() {
        let text = text.as_ref();
        let number = index + 1;
        let mv: CoordinateMove = text
            .parse()
            .with_context(|| format!("move {} ({}) is not a coordinate move", number, text))?;

        let captured = chess_match
            .perform_move(mv.source, mv.target)
            .with_context(|| format!("move {} ({}) was rejected", number, mv))?;
        if let Some(piece) = captured {
            tracing::debug!("{} captured {} {}", mv, piece.color, piece.kind);
        }

        if let Some(kind) = mv.promotion {
            if chess_match.promoted().is_none() {
                bail!("move {} ({}) does not promote a pawn", number, mv);
            }
            chess_match
                .promote_to(kind)
                .with_context(|| format!("move {} ({}) has an invalid promotion", number, mv))?;
        }
        tracing::info!("{}. {}", number, mv);
    }
    Ok(chess_match)
}
