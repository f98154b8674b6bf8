//! Property tests over random playouts from the standard position.

mod common;

use arbiter_core::{ChessPosition, PieceKind, Position};
use arbiter_engine::{
    apply_move, is_in_check, pseudo_legal_moves, undo_move, ChessMatch, MatchError, PieceId,
};
use proptest::prelude::*;

const MAX_PLIES: usize = 80;

/// Every (source, target) pair the side to move may legally play.
fn legal_pairs(chess_match: &ChessMatch) -> Vec<(ChessPosition, ChessPosition)> {
    let mut pairs = Vec::new();
    for source in Position::all().map(ChessPosition::from) {
        if let Ok(targets) = chess_match.legal_moves(source) {
            pairs.extend(targets.iter().map(|target| (source, target.into())));
        }
    }
    pairs
}

/// Id of the pawn that may be captured en passant, if any.
fn en_passant_id(chess_match: &ChessMatch) -> Option<PieceId> {
    chess_match
        .en_passant_vulnerable()
        .and_then(|square| chess_match.board().piece_at(square.to_position()))
        .map(|piece| piece.id())
}

/// Plays random legal moves, calling `inspect` before each one.
///
/// After every accepted move the mover's king must not be attacked.
fn playout<F>(choices: &[u16], mut inspect: F) -> ChessMatch
where
    F: FnMut(&ChessMatch, &[(ChessPosition, ChessPosition)]),
{
    let mut chess_match = ChessMatch::new();
    for &choice in choices.iter().take(MAX_PLIES) {
        if chess_match.checkmate() {
            break;
        }
        let pairs = legal_pairs(&chess_match);
        if pairs.is_empty() {
            // Stalemate
            assert!(!chess_match.check());
            break;
        }
        inspect(&chess_match, pairs.as_slice());
        let mover = chess_match.current_player();
        let (source, target) = pairs[choice as usize % pairs.len()];
        chess_match
            .perform_move(source, target)
            .unwrap_or_else(|e| panic!("legal move {}{} rejected: {}", source, target, e));
        let exposed = is_in_check(chess_match.board(), mover, en_passant_id(&chess_match));
        assert_eq!(exposed, Ok(false), "{}{} left {} in check", source, target, mover);
    }
    chess_match
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pseudo_legal_targets_split_into_accepted_and_self_check(
        choices in prop::collection::vec(any::<u16>(), 1..MAX_PLIES),
    ) {
        playout(&choices, |chess_match, pairs| {
            let (source, _) = pairs[pairs.len() / 2];
            let possible = chess_match.possible_moves(source).unwrap();
            let legal = chess_match.legal_moves(source).unwrap();
            assert_eq!(possible & legal, legal);
            for target in possible {
                let mut attempt = chess_match.clone();
                let result = attempt.perform_move(source, target.into());
                if legal.get(target) {
                    assert!(result.is_ok(), "{}{} refused: {:?}", source, target, result);
                } else {
                    assert_eq!(result, Err(MatchError::SelfCheck));
                    assert_eq!(attempt.snapshot(), chess_match.snapshot());
                    assert_eq!(attempt.board(), chess_match.board());
                }
            }
        });
    }

    #[test]
    fn apply_then_undo_restores_the_board(
        choices in prop::collection::vec(any::<u16>(), 1..MAX_PLIES),
    ) {
        playout(&choices, |chess_match, pairs| {
            let en_passant = en_passant_id(chess_match);
            for &(source, target) in pairs {
                let (from, to) = (source.to_position(), target.to_position());
                assert!(pseudo_legal_moves(chess_match.board(), from, en_passant).get(to));
                let mut board = chess_match.board().clone();
                let applied = apply_move(&mut board, from, to).unwrap();
                undo_move(&mut board, &applied).unwrap();
                assert_eq!(&board, chess_match.board());
            }
        });
    }

    #[test]
    fn turns_alternate_until_mate(
        choices in prop::collection::vec(any::<u16>(), 1..MAX_PLIES),
    ) {
        let mut chess_match = ChessMatch::new();
        for &choice in &choices {
            let pairs = legal_pairs(&chess_match);
            if pairs.is_empty() {
                break;
            }
            let (turn, mover) = (chess_match.turn(), chess_match.current_player());
            let (source, target) = pairs[choice as usize % pairs.len()];
            chess_match.perform_move(source, target).unwrap();
            if chess_match.checkmate() {
                assert_eq!(chess_match.turn(), turn);
                assert_eq!(chess_match.current_player(), mover);
                assert!(chess_match.check());
                break;
            }
            assert_eq!(chess_match.turn(), turn + 1);
            assert_eq!(chess_match.current_player(), mover.opposite());
        }
    }

    #[test]
    fn en_passant_marker_follows_double_steps(
        choices in prop::collection::vec(any::<u16>(), 1..MAX_PLIES),
    ) {
        let mut chess_match = ChessMatch::new();
        for &choice in &choices {
            if chess_match.checkmate() {
                break;
            }
            let pairs = legal_pairs(&chess_match);
            if pairs.is_empty() {
                break;
            }
            let (source, target) = pairs[choice as usize % pairs.len()];
            let kind = chess_match.piece_at(source).map(|piece| piece.kind);
            chess_match.perform_move(source, target).unwrap();
            let double_step = kind == Some(PieceKind::Pawn)
                && source.row().abs_diff(target.row()) == 2;
            let expected = double_step.then_some(target);
            assert_eq!(chess_match.en_passant_vulnerable(), expected);
        }
    }

    #[test]
    fn reported_checkmate_leaves_no_escape(
        choices in prop::collection::vec(any::<u16>(), 1..MAX_PLIES),
    ) {
        let chess_match = playout(&choices, |chess_match, _| {
            assert!(!chess_match.checkmate());
        });
        if let Some(winner) = chess_match.winner() {
            let loser = winner.opposite();
            let replay = ChessMatch::from_board(chess_match.board().clone(), loser).unwrap();
            assert!(replay.check());
            assert!(replay.checkmate());
            assert!(legal_pairs(&replay).is_empty());
        }
    }
}
