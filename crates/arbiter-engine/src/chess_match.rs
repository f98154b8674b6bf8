//! Match orchestration: turn order, move validation, special moves, check and checkmate.
//!
//! [`ChessMatch`] is the authoritative arbiter of a game. Presentation
//! layers ask it which squares a piece may reach, ask it to perform a move,
//! and read back the resulting state. Every operation either completes or
//! fails with a [`MatchError`] and leaves the match untouched.

use crate::check::{is_in_check, is_in_checkmate, leaves_in_check};
use crate::execute::{apply_move, undo_move, AppliedMove};
use crate::movegen::pseudo_legal_moves;
use crate::view::{MatchSnapshot, PieceGrid, PieceView};
use crate::{Board, BoardError, MatchError, Piece, PieceId};
use arbiter_core::{ChessPosition, Color, MoveMatrix, PieceKind, Position};

/// A chess match in progress.
///
/// The board holds the pieces in play; captured pieces are kept in capture
/// order. The match is single-threaded: callers that share one between
/// clients must serialize access themselves.
#[derive(Debug, Clone)]
pub struct ChessMatch {
    board: Board,
    turn: u32,
    current_player: Color,
    check: bool,
    checkmate: bool,
    /// The pawn that just advanced two squares and may be taken en passant.
    en_passant_vulnerable: Option<PieceId>,
    /// The piece produced by the last promotion, until a choice is made or the next move.
    promoted: Option<PieceId>,
    captured: Vec<Piece>,
}

impl Default for ChessMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessMatch {
    /// Creates a match with the standard starting position, White to move.
    pub fn new() -> Self {
        ChessMatch {
            board: Board::standard(),
            turn: 1,
            current_player: Color::White,
            check: false,
            checkmate: false,
            en_passant_vulnerable: None,
            promoted: None,
            captured: Vec::new(),
        }
    }

    /// Creates a match from a custom board.
    ///
    /// The check and checkmate flags are derived for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MissingKing`] or [`MatchError::DuplicateKing`]
    /// unless each color has exactly one king, and
    /// [`MatchError::OpponentInCheck`] if the side not to move is in check.
    pub fn from_board(board: Board, to_move: Color) -> Result<Self, MatchError> {
        for color in Color::ALL {
            match board.count(PieceKind::King, color) {
                0 => return Err(MatchError::MissingKing(color)),
                1 => {}
                _ => return Err(MatchError::DuplicateKing(color)),
            }
        }
        if is_in_check(&board, to_move.opposite(), None)? {
            return Err(MatchError::OpponentInCheck(to_move.opposite()));
        }
        let mut chess_match = ChessMatch {
            board,
            turn: 1,
            current_player: to_move,
            check: false,
            checkmate: false,
            en_passant_vulnerable: None,
            promoted: None,
            captured: Vec::new(),
        };
        chess_match.check = is_in_check(&chess_match.board, to_move, None)?;
        chess_match.checkmate = is_in_checkmate(&mut chess_match.board, to_move, None)?;
        Ok(chess_match)
    }

    /// Returns the turn number, starting at 1.
    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the color to move. After checkmate this is the winner.
    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Returns true if the player to move is in check.
    #[inline]
    pub fn check(&self) -> bool {
        self.check
    }

    /// Returns true if the match ended in checkmate.
    #[inline]
    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    /// Returns the winning color once the match is over.
    pub fn winner(&self) -> Option<Color> {
        self.checkmate.then_some(self.current_player)
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the captured pieces in capture order.
    #[inline]
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    /// Returns the square of the pawn that may be taken en passant this turn.
    pub fn en_passant_vulnerable(&self) -> Option<ChessPosition> {
        self.locate(self.en_passant_vulnerable)
    }

    /// Returns the square of the piece awaiting a promotion choice.
    pub fn promoted(&self) -> Option<ChessPosition> {
        self.locate(self.promoted)
    }

    fn locate(&self, id: Option<PieceId>) -> Option<ChessPosition> {
        id.and_then(|id| self.board.find(id)).map(ChessPosition::from)
    }

    /// Returns the piece on a square.
    pub fn piece_at(&self, position: ChessPosition) -> Option<PieceView> {
        self.board.piece_at(position.to_position()).map(PieceView::from)
    }

    /// Returns the whole board for rendering, row 0 (rank 8) first.
    pub fn pieces(&self) -> PieceGrid {
        let mut grid: PieceGrid = [[None; 8]; 8];
        for (position, piece) in self.board.pieces() {
            grid[position.row() as usize][position.column() as usize] = Some(piece.into());
        }
        grid
    }

    /// Returns a serializable summary of the match.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::from(self)
    }

    /// Returns the pseudo-legal destinations of the piece on `source`.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InvalidSource`] if the square is empty
    /// - [`MatchError::WrongOwner`] if the piece belongs to the opponent
    /// - [`MatchError::NoLegalMoves`] if the piece cannot move at all
    pub fn possible_moves(&self, source: ChessPosition) -> Result<MoveMatrix, MatchError> {
        self.validate_source(source.to_position())
    }

    /// Returns the destinations of the piece on `source` that do not leave
    /// its own king in check.
    ///
    /// Fails like [`possible_moves`](Self::possible_moves).
    pub fn legal_moves(&self, source: ChessPosition) -> Result<MoveMatrix, MatchError> {
        let from = source.to_position();
        let candidates = self.validate_source(from)?;
        let mut scratch = self.board.clone();
        let mut legal = MoveMatrix::EMPTY;
        for target in candidates {
            if !leaves_in_check(
                &mut scratch,
                from,
                target,
                self.current_player,
                self.en_passant_vulnerable,
            )? {
                legal.set(target);
            }
        }
        Ok(legal)
    }

    /// Moves the piece on `source` to `target` and returns what it captured.
    ///
    /// On success the turn passes to the opponent unless the move mates.
    /// A pawn reaching the last row is promoted to a Queen; the choice can
    /// be changed with [`choose_promotion`](Self::choose_promotion) before
    /// the next move.
    ///
    /// # Errors
    ///
    /// Fails like [`possible_moves`](Self::possible_moves), plus
    /// [`MatchError::IllegalTarget`] if `target` is not reachable,
    /// [`MatchError::SelfCheck`] if the move would expose the mover's king,
    /// and [`MatchError::MatchOver`] after checkmate. Nothing changes on
    /// failure.
    pub fn perform_move(
        &mut self,
        source: ChessPosition,
        target: ChessPosition,
    ) -> Result<Option<PieceView>, MatchError> {
        if self.checkmate {
            return Err(MatchError::MatchOver);
        }
        let (from, to) = (source.to_position(), target.to_position());
        let moves = self.validate_source(from)?;
        if !moves.get(to) {
            return Err(MatchError::IllegalTarget {
                from: source,
                target,
            });
        }

        let mover = self.current_player;
        let applied = self.make_move(from, to)?;
        let exposed = is_in_check(&self.board, mover, self.en_passant_vulnerable);
        if !matches!(exposed, Ok(false)) {
            self.undo_move(&applied)?;
            exposed?;
            return Err(MatchError::SelfCheck);
        }

        let moved = *self.board.piece_at(to).ok_or(BoardError::SquareEmpty(to))?;

        self.promoted = None;
        if moved.kind() == PieceKind::Pawn && to.row() == mover.promotion_row() {
            let queen = self.replace_piece(to, PieceKind::Queen)?;
            self.promoted = Some(queen.id());
        }

        let double_step = moved.kind() == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2;
        self.en_passant_vulnerable = double_step.then_some(moved.id());

        self.conclude_move(mover)?;
        Ok(applied.captured.map(|capture| capture.piece.into()))
    }

    /// Replaces the piece awaiting promotion with the kind named by `code`.
    ///
    /// Codes: `B` Bishop, `C` or `N` Knight, `Q` Queen, `R` Rook.
    ///
    /// # Errors
    ///
    /// [`MatchError::NoPendingPromotion`] if no promotion is pending,
    /// [`MatchError::InvalidPromotionType`] for any other code.
    pub fn choose_promotion(&mut self, code: &str) -> Result<PieceView, MatchError> {
        if self.promoted.is_none() {
            return Err(MatchError::NoPendingPromotion);
        }
        let kind = PieceKind::from_promotion_code(code)
            .ok_or_else(|| MatchError::InvalidPromotionType(code.trim().to_string()))?;
        self.promote_to(kind)
    }

    /// Replaces the piece awaiting promotion with a piece of `kind`.
    ///
    /// The check, checkmate and turn bookkeeping of the promoting move is
    /// redone for the new piece.
    pub fn promote_to(&mut self, kind: PieceKind) -> Result<PieceView, MatchError> {
        let id = self.promoted.ok_or(MatchError::NoPendingPromotion)?;
        if !PieceKind::PROMOTIONS.contains(&kind) {
            return Err(MatchError::InvalidPromotionType(kind.to_string()));
        }
        let square = self.board.find(id).ok_or(MatchError::NoPendingPromotion)?;
        let replaced = self.replace_piece(square, kind)?;
        let mover = replaced.color();

        // Rewind the outcome of the promoting move, then settle it again
        if !self.checkmate {
            self.turn -= 1;
            self.current_player = mover;
        }
        self.checkmate = false;
        self.promoted = None;
        self.conclude_move(mover)?;
        Ok(replaced.into())
    }

    fn validate_source(&self, source: Position) -> Result<MoveMatrix, MatchError> {
        let square = ChessPosition::from(source);
        let piece = self
            .board
            .piece_at(source)
            .ok_or(MatchError::InvalidSource(square))?;
        if piece.color() != self.current_player {
            return Err(MatchError::WrongOwner(square));
        }
        let moves = pseudo_legal_moves(&self.board, source, self.en_passant_vulnerable);
        if moves.is_empty() {
            return Err(MatchError::NoLegalMoves(square));
        }
        Ok(moves)
    }

    /// Applies a move and moves its capture to the captured list.
    fn make_move(&mut self, source: Position, target: Position) -> Result<AppliedMove, MatchError> {
        let applied = apply_move(&mut self.board, source, target)?;
        if let Some(capture) = applied.captured {
            self.captured.push(capture.piece);
        }
        Ok(applied)
    }

    /// Reverses [`make_move`](Self::make_move), returning the capture to the board.
    fn undo_move(&mut self, applied: &AppliedMove) -> Result<(), MatchError> {
        undo_move(&mut self.board, applied)?;
        if applied.captured.is_some() {
            self.captured.pop();
        }
        Ok(())
    }

    /// Swaps the piece on `square` for a fresh piece of the same color.
    fn replace_piece(&mut self, square: Position, kind: PieceKind) -> Result<Piece, MatchError> {
        let old = self
            .board
            .remove(square)
            .ok_or(BoardError::SquareEmpty(square))?;
        let new = self.board.spawn(kind, old.color());
        self.board.place(new, square)?;
        Ok(new)
    }

    /// Derives check and checkmate for the opponent of `mover` and passes the turn
    /// unless the opponent is mated.
    fn conclude_move(&mut self, mover: Color) -> Result<(), MatchError> {
        let opponent = mover.opposite();
        self.check = is_in_check(&self.board, opponent, self.en_passant_vulnerable)?;
        if is_in_checkmate(&mut self.board, opponent, self.en_passant_vulnerable)? {
            self.checkmate = true;
        } else {
            self.next_turn();
        }
        Ok(())
    }

    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = self.current_player.opposite();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::board_with;

    fn sq(square: &str) -> ChessPosition {
        square.parse().unwrap()
    }

    fn play(chess_match: &mut ChessMatch, moves: &[(&str, &str)]) {
        for &(source, target) in moves {
            chess_match
                .perform_move(sq(source), sq(target))
                .unwrap_or_else(|e| panic!("{}{} rejected: {}", source, target, e));
        }
    }

    #[test]
    fn new_match() {
        let chess_match = ChessMatch::new();
        assert_eq!(chess_match.turn(), 1);
        assert_eq!(chess_match.current_player(), Color::White);
        assert!(!chess_match.check());
        assert!(!chess_match.checkmate());
        assert_eq!(chess_match.winner(), None);
        assert_eq!(chess_match.promoted(), None);
        assert_eq!(chess_match.en_passant_vulnerable(), None);
    }

    #[test]
    fn source_validation_order() {
        let chess_match = ChessMatch::new();
        assert_eq!(
            chess_match.possible_moves(sq("e4")),
            Err(MatchError::InvalidSource(sq("e4")))
        );
        assert_eq!(
            chess_match.possible_moves(sq("e7")),
            Err(MatchError::WrongOwner(sq("e7")))
        );
        assert_eq!(
            chess_match.possible_moves(sq("a1")),
            Err(MatchError::NoLegalMoves(sq("a1")))
        );
        let knight = chess_match.possible_moves(sq("b1")).unwrap();
        assert!(knight.get(sq("a3").to_position()));
        assert!(knight.get(sq("c3").to_position()));
    }

    #[test]
    fn illegal_target() {
        let mut chess_match = ChessMatch::new();
        assert_eq!(
            chess_match.perform_move(sq("e2"), sq("e5")),
            Err(MatchError::IllegalTarget {
                from: sq("e2"),
                target: sq("e5")
            })
        );
        assert_eq!(chess_match.turn(), 1);
    }

    #[test]
    fn turns_alternate() {
        let mut chess_match = ChessMatch::new();
        play(&mut chess_match, &[("e2", "e4")]);
        assert_eq!(chess_match.turn(), 2);
        assert_eq!(chess_match.current_player(), Color::Black);
        play(&mut chess_match, &[("e7", "e5")]);
        assert_eq!(chess_match.turn(), 3);
        assert_eq!(chess_match.current_player(), Color::White);
    }

    #[test]
    fn self_check_is_rolled_back() {
        // The bishop on e2 is pinned by the rook on e8
        let board = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("e2", Color::White, PieceKind::Bishop),
            ("e8", Color::Black, PieceKind::Rook),
            ("a8", Color::Black, PieceKind::King),
        ]);
        let mut chess_match = ChessMatch::from_board(board, Color::White).unwrap();
        let before = chess_match.board().clone();
        assert_eq!(
            chess_match.perform_move(sq("e2"), sq("d3")),
            Err(MatchError::SelfCheck)
        );
        assert_eq!(chess_match.board(), &before);
        assert_eq!(chess_match.turn(), 1);
        assert_eq!(chess_match.current_player(), Color::White);

        // The pinned bishop can still be selected; it just has no legal moves
        assert!(chess_match.possible_moves(sq("e2")).unwrap().any());
        assert!(chess_match.legal_moves(sq("e2")).unwrap().is_empty());
    }

    #[test]
    fn self_check_capture_is_rolled_back() {
        let board = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("e2", Color::White, PieceKind::Rook),
            ("a2", Color::Black, PieceKind::Knight),
            ("e8", Color::Black, PieceKind::Rook),
            ("a8", Color::Black, PieceKind::King),
        ]);
        let mut chess_match = ChessMatch::from_board(board, Color::White).unwrap();
        assert_eq!(
            chess_match.perform_move(sq("e2"), sq("a2")),
            Err(MatchError::SelfCheck)
        );
        assert!(chess_match.captured_pieces().is_empty());
        assert_eq!(chess_match.piece_at(sq("a2")).unwrap().kind, PieceKind::Knight);
    }

    #[test]
    fn capture_is_returned_and_recorded() {
        let mut chess_match = ChessMatch::new();
        play(&mut chess_match, &[("e2", "e4"), ("d7", "d5")]);
        let captured = chess_match.perform_move(sq("e4"), sq("d5")).unwrap();
        let captured = captured.unwrap();
        assert_eq!(captured.kind, PieceKind::Pawn);
        assert_eq!(captured.color, Color::Black);
        assert_eq!(chess_match.captured_pieces().len(), 1);
    }

    #[test]
    fn en_passant_window_lasts_one_move() {
        let mut chess_match = ChessMatch::new();
        play(&mut chess_match, &[("e2", "e4")]);
        assert_eq!(chess_match.en_passant_vulnerable(), Some(sq("e4")));
        play(&mut chess_match, &[("g8", "f6")]);
        assert_eq!(chess_match.en_passant_vulnerable(), None);
        play(&mut chess_match, &[("d2", "d3")]);
        assert_eq!(chess_match.en_passant_vulnerable(), None);
    }

    #[test]
    fn failed_attempt_keeps_en_passant_window() {
        let mut chess_match = ChessMatch::new();
        play(&mut chess_match, &[("e2", "e4")]);
        assert!(chess_match.perform_move(sq("e7"), sq("e4")).is_err());
        assert_eq!(chess_match.en_passant_vulnerable(), Some(sq("e4")));
    }

    #[test]
    fn promotion_defaults_to_queen_and_can_be_changed() {
        let board = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("a7", Color::White, PieceKind::Pawn),
            ("h5", Color::Black, PieceKind::King),
        ]);
        let mut chess_match = ChessMatch::from_board(board, Color::White).unwrap();
        play(&mut chess_match, &[("a7", "a8")]);
        assert_eq!(chess_match.promoted(), Some(sq("a8")));
        assert_eq!(chess_match.piece_at(sq("a8")).unwrap().kind, PieceKind::Queen);
        assert_eq!(chess_match.current_player(), Color::Black);

        let rook = chess_match.choose_promotion("R").unwrap();
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.color, Color::White);
        assert_eq!(chess_match.piece_at(sq("a8")).unwrap().kind, PieceKind::Rook);
        assert_eq!(chess_match.promoted(), None);
        assert_eq!(chess_match.turn(), 2);
        assert_eq!(chess_match.current_player(), Color::Black);
        assert_eq!(
            chess_match.choose_promotion("Q"),
            Err(MatchError::NoPendingPromotion)
        );
    }

    #[test]
    fn unknown_promotion_code_is_rejected() {
        let board = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("b7", Color::White, PieceKind::Pawn),
            ("h5", Color::Black, PieceKind::King),
        ]);
        let mut chess_match = ChessMatch::from_board(board, Color::White).unwrap();
        play(&mut chess_match, &[("b7", "b8")]);
        assert_eq!(
            chess_match.choose_promotion("X"),
            Err(MatchError::InvalidPromotionType("X".to_string()))
        );
        assert_eq!(
            chess_match.promote_to(PieceKind::King),
            Err(MatchError::InvalidPromotionType("King".to_string()))
        );
        assert_eq!(chess_match.piece_at(sq("b8")).unwrap().kind, PieceKind::Queen);
        assert_eq!(chess_match.promoted(), Some(sq("b8")));
    }

    #[test]
    fn underpromotion_can_deliver_mate() {
        // f7-f8=N mates the king on h7 boxed in by its own pieces, f8=Q does not
        let board = board_with(&[
            ("a1", Color::White, PieceKind::King),
            ("f7", Color::White, PieceKind::Pawn),
            ("h7", Color::Black, PieceKind::King),
            ("g7", Color::Black, PieceKind::Pawn),
            ("h6", Color::Black, PieceKind::Pawn),
            ("g8", Color::Black, PieceKind::Knight),
            ("g6", Color::Black, PieceKind::Pawn),
            ("h8", Color::Black, PieceKind::Bishop),
        ]);
        let mut chess_match = ChessMatch::from_board(board, Color::White).unwrap();
        play(&mut chess_match, &[("f7", "f8")]);
        assert!(!chess_match.checkmate());
        assert_eq!(chess_match.current_player(), Color::Black);

        chess_match.choose_promotion("C").unwrap();
        assert!(chess_match.check());
        assert!(chess_match.checkmate());
        assert_eq!(chess_match.winner(), Some(Color::White));
        assert_eq!(chess_match.turn(), 1);
        assert_eq!(
            chess_match.perform_move(sq("h7"), sq("g8")),
            Err(MatchError::MatchOver)
        );
    }

    #[test]
    fn from_board_requires_one_king_each() {
        let no_black = board_with(&[("e1", Color::White, PieceKind::King)]);
        assert_eq!(
            ChessMatch::from_board(no_black, Color::White).err(),
            Some(MatchError::MissingKing(Color::Black))
        );
        let two_white = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("d1", Color::White, PieceKind::King),
            ("e8", Color::Black, PieceKind::King),
        ]);
        assert_eq!(
            ChessMatch::from_board(two_white, Color::White).err(),
            Some(MatchError::DuplicateKing(Color::White))
        );
    }

    #[test]
    fn from_board_rejects_opponent_in_check() {
        let board = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("e2", Color::White, PieceKind::Rook),
            ("e8", Color::Black, PieceKind::King),
        ]);
        assert_eq!(
            ChessMatch::from_board(board.clone(), Color::White).err(),
            Some(MatchError::OpponentInCheck(Color::Black))
        );
        let chess_match = ChessMatch::from_board(board, Color::Black).unwrap();
        assert!(chess_match.check());
        assert!(!chess_match.checkmate());
    }

    #[test]
    fn fools_mate_ends_the_match() {
        let mut chess_match = ChessMatch::new();
        play(
            &mut chess_match,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert!(chess_match.check());
        assert!(chess_match.checkmate());
        assert_eq!(chess_match.turn(), 4);
        assert_eq!(chess_match.current_player(), Color::Black);
        assert_eq!(chess_match.winner(), Some(Color::Black));
        assert_eq!(
            chess_match.perform_move(sq("e2"), sq("e3")),
            Err(MatchError::MatchOver)
        );
    }
}
