//! Move application for the live board.
//!
//! `GameState::apply_move` is the single entry point that mutates a real
//! game: it validates the request against the legal move set, infers the
//! move kind from the board, performs the relocation with all of its side
//! effects, and reports what happened. Search and perft reuse the same
//! relocation through `GameState::play_unchecked` on cloned boards.

use tracing::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{promotion_rank, KINGSIDE_ROOK_DISTANCE, QUEENSIDE_ROOK_DISTANCE};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::terminal_state::{classify, TerminalState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves_from;
use crate::utils::long_algebraic::parse_long_algebraic;

/// What kind of move was played, inferred from the moving piece and the
/// relationship between origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    DoublePawnAdvance,
    EnPassantCapture,
    CastleKingside,
    CastleQueenside,
    Promotion,
}

/// A pawn that reached the back rank and is waiting for its piece choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub mv: Move,
    pub captured: Option<PieceKind>,
    material_before: i32,
}

impl PendingPromotion {
    #[inline]
    pub fn square(&self) -> Square {
        self.mv.to
    }
}

/// Report handed back to the caller after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub kind: MoveKind,
    pub captured: Option<PieceKind>,
    /// Piece the pawn became; `None` for non-promotions and while pending.
    pub promoted_to: Option<PieceKind>,
    /// The turn has not passed yet; call `GameState::complete_promotion`.
    pub promotion_pending: bool,
    /// Change in the mover's material advantage (material counter points).
    pub material_delta: i32,
    /// The opponent's king is attacked after the move. While a promotion is
    /// pending only the unpromoted pawn and the other pieces are considered.
    pub gives_check: bool,
    /// Classification for the side now to move.
    pub terminal: TerminalState,
}

impl GameState {
    /// Play `from -> to` for the side to move.
    ///
    /// `promotion` is consulted only when a pawn reaches the back rank. When
    /// it is `None` the pawn is moved but the turn does not pass until
    /// `complete_promotion` supplies the piece.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveOutcome> {
        if let Some(pending) = self.pending_promotion {
            return Err(ChessError::PromotionPending(pending.square()));
        }
        if from > 63 {
            return Err(ChessError::NoPieceAtOrigin(from));
        }

        let mover = self.square(from);
        let (kind, color) = match mover {
            SquareCode::Occupied { kind, color, .. } => (kind, color),
            _ => return Err(ChessError::NoPieceAtOrigin(from)),
        };
        if color != self.side_to_move {
            return Err(ChessError::NotYourTurn { square: from, color });
        }
        if !legal_moves_from(self, from).contains(&to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let reaches_back_rank = kind == PieceKind::Pawn && rank_of(to) == promotion_rank(color);
        if let Some(choice) = promotion.filter(|_| reaches_back_rank) {
            if !choice.is_promotion_choice() {
                return Err(ChessError::InvalidPromotionChoice(choice));
            }
        }

        let material_before = self.material_advantage(color);
        let mv = Move::new(from, to);
        let (move_kind, captured) = self.relocate(from, to);

        if move_kind == MoveKind::Promotion {
            let Some(choice) = promotion else {
                self.pending_promotion = Some(PendingPromotion {
                    mv,
                    captured,
                    material_before,
                });
                debug!(from, to, ?captured, "pawn reached back rank, promotion pending");
                return Ok(MoveOutcome {
                    mv,
                    kind: move_kind,
                    captured,
                    promoted_to: None,
                    promotion_pending: true,
                    material_delta: self.material_advantage(color) - material_before,
                    gives_check: is_king_in_check(self, color.opposite()),
                    terminal: TerminalState::Ongoing,
                });
            };
            self.place_promoted(to, choice, color);
        }

        self.pass_turn(color);
        let outcome = self.outcome_after(mv, move_kind, captured, material_before, color);
        debug!(
            from,
            to,
            kind = ?outcome.kind,
            captured = ?outcome.captured,
            check = outcome.gives_check,
            terminal = ?outcome.terminal,
            "move applied"
        );
        Ok(outcome)
    }

    /// Apply a move written in long algebraic notation (`e2e4`, `e7e8q`).
    pub fn apply_move_text(&mut self, text: &str) -> ChessResult<MoveOutcome> {
        let (from, to, promotion) = parse_long_algebraic(text)?;
        self.apply_move(from, to, promotion)
    }

    /// Finish a pending promotion with `choice` and pass the turn.
    pub fn complete_promotion(&mut self, choice: PieceKind) -> ChessResult<MoveOutcome> {
        let pending = self.pending_promotion.ok_or(ChessError::NoPromotionPending)?;
        if !choice.is_promotion_choice() {
            return Err(ChessError::InvalidPromotionChoice(choice));
        }

        let square = pending.square();
        let color = self.side_to_move;
        self.place_promoted(square, choice, color);
        self.pending_promotion = None;
        self.pass_turn(color);

        let outcome = self.outcome_after(
            pending.mv,
            MoveKind::Promotion,
            pending.captured,
            pending.material_before,
            color,
        );
        debug!(square, ?choice, terminal = ?outcome.terminal, "promotion completed");
        Ok(outcome)
    }

    /// Apply a move already known to be legal, promoting to `promotion` if a
    /// pawn reaches the back rank, and pass the turn. Used on theoretical
    /// boards by search and perft.
    ///
    /// An origin without a piece leaves the board and the turn unchanged.
    pub(crate) fn play_unchecked(&mut self, from: Square, to: Square, promotion: PieceKind) -> MoveKind {
        let SquareCode::Occupied { color, .. } = self.square(from) else {
            return MoveKind::Normal;
        };
        let (move_kind, _) = self.relocate(from, to);
        if move_kind == MoveKind::Promotion {
            self.place_promoted(to, promotion, color);
        }
        self.pass_turn(color);
        move_kind
    }

    /// Theoretical move as played by search: pawns always promote to a queen.
    #[inline]
    pub(crate) fn apply_theoretical_move(&mut self, mv: Move) -> MoveKind {
        self.play_unchecked(mv.from, mv.to, PieceKind::Queen)
    }

    /// Relocate the piece on `from` to `to` with every side effect except
    /// promotion and the turn change. Returns the move kind and the captured
    /// piece.
    fn relocate(&mut self, from: Square, to: Square) -> (MoveKind, Option<PieceKind>) {
        let mover = self.square(from);
        let SquareCode::Occupied { kind, color, .. } = mover else {
            debug_assert!(false, "relocate called on vacant square {from}");
            return (MoveKind::Normal, None);
        };

        let target = self.square(to);
        let mut captured = target.kind();
        let mut move_kind = MoveKind::Normal;

        match kind {
            PieceKind::Pawn => {
                if target.is_en_passant_target() && file_of(from) != file_of(to) {
                    move_kind = MoveKind::EnPassantCapture;
                    if let Some(victim) = square_at(file_of(to), rank_of(from)) {
                        captured = self.square(victim).kind();
                        self.squares[victim as usize] = SquareCode::Empty;
                    }
                } else if (rank_of(to) - rank_of(from)).abs() == 2 {
                    move_kind = MoveKind::DoublePawnAdvance;
                } else if rank_of(to) == promotion_rank(color) {
                    move_kind = MoveKind::Promotion;
                }
            }
            PieceKind::King if to == from + 2 => {
                move_kind = MoveKind::CastleKingside;
                self.move_castling_rook(from + KINGSIDE_ROOK_DISTANCE, from + 1);
            }
            PieceKind::King if from == to + 2 => {
                move_kind = MoveKind::CastleQueenside;
                self.move_castling_rook(from - QUEENSIDE_ROOK_DISTANCE, from - 1);
            }
            _ => {}
        }

        // The previous ply's marker expires now, whether or not it was used.
        if let Some(marker) = self.en_passant_square.take() {
            if self.square(marker).is_en_passant_target() {
                self.squares[marker as usize] = SquareCode::Empty;
            }
        }

        self.squares[to as usize] = mover.with_moved();
        self.squares[from as usize] = SquareCode::Empty;

        if move_kind == MoveKind::DoublePawnAdvance {
            let skipped = (from + to) / 2;
            self.squares[skipped as usize] = SquareCode::EnPassantTarget(color);
            self.en_passant_square = Some(skipped);
        }
        if kind == PieceKind::King {
            self.king_squares[color.index()] = to;
        }

        if kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        (move_kind, captured)
    }

    fn move_castling_rook(&mut self, from: Square, to: Square) {
        let rook = self.square(from);
        self.squares[to as usize] = rook.with_moved();
        self.squares[from as usize] = SquareCode::Empty;
    }

    fn place_promoted(&mut self, square: Square, choice: PieceKind, color: Color) {
        self.squares[square as usize] = SquareCode::moved_piece(choice, color);
    }

    fn pass_turn(&mut self, mover: Color) {
        if mover == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = mover.opposite();
    }

    fn outcome_after(
        &self,
        mv: Move,
        kind: MoveKind,
        captured: Option<PieceKind>,
        material_before: i32,
        mover: Color,
    ) -> MoveOutcome {
        let opponent = mover.opposite();
        MoveOutcome {
            mv,
            kind,
            captured,
            promoted_to: match kind {
                MoveKind::Promotion => self.square(mv.to).kind(),
                _ => None,
            },
            promotion_pending: false,
            material_delta: self.material_advantage(mover) - material_before,
            gives_check: is_king_in_check(self, opponent),
            terminal: classify(self, opponent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MoveKind;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::{Color, PieceKind, SquareCode};
    use crate::game_state::game_state::GameState;
    use crate::game_state::terminal_state::TerminalState;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn double_advance_places_marker_that_expires_next_ply() {
        let mut game = GameState::new_game();
        let outcome = game.apply_move_text("e2e4").expect("e2e4 should be legal");
        assert_eq!(outcome.kind, MoveKind::DoublePawnAdvance);
        assert_eq!(game.square(sq("e3")), SquareCode::EnPassantTarget(Color::Light));
        assert_eq!(game.en_passant_square, Some(sq("e3")));
        assert_eq!(game.side_to_move, Color::Dark);

        game.apply_move_text("g8f6").expect("g8f6 should be legal");
        assert_eq!(game.square(sq("e3")), SquareCode::Empty);
        assert_eq!(game.en_passant_square, None);
        assert!(game.squares.iter().all(|code| !code.is_en_passant_target()));
    }

    #[test]
    fn en_passant_capture_removes_pawn_behind_destination() {
        let mut game = GameState::from_fen("4k3/8/8/8/1p6/8/P7/4K3 w - - 0 1")
            .expect("FEN should parse");
        game.apply_move_text("a2a4").expect("a2a4 should be legal");
        let outcome = game.apply_move_text("b4a3").expect("en passant should be legal");

        assert_eq!(outcome.kind, MoveKind::EnPassantCapture);
        assert_eq!(outcome.captured, Some(PieceKind::Pawn));
        assert_eq!(outcome.material_delta, 1);
        assert!(game.square(sq("a4")).is_empty());
        assert!(game.square(sq("a3")).is_piece(PieceKind::Pawn, Color::Dark));
        assert_eq!(game.halfmove_clock, 0);
    }

    #[test]
    fn castling_relocates_the_rook() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let outcome = game.apply_move_text("e1g1").expect("kingside castle should be legal");
        assert_eq!(outcome.kind, MoveKind::CastleKingside);
        assert!(game.square(sq("g1")).is_piece(PieceKind::King, Color::Light));
        assert!(game.square(sq("f1")).is_piece(PieceKind::Rook, Color::Light));
        assert!(game.square(sq("f1")).has_moved());
        assert!(game.square(sq("h1")).is_empty());
        assert_eq!(game.king_square(Color::Light), sq("g1"));

        let outcome = game.apply_move_text("e8c8").expect("queenside castle should be legal");
        assert_eq!(outcome.kind, MoveKind::CastleQueenside);
        assert!(game.square(sq("d8")).is_piece(PieceKind::Rook, Color::Dark));
        assert!(game.square(sq("a8")).is_empty());
        assert_eq!(game.get_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
    }

    #[test]
    fn promotion_waits_for_choice() {
        let mut game = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 5 40")
            .expect("FEN should parse");
        let outcome = game.apply_move(sq("b7"), sq("b8"), None).expect("push should be legal");
        assert!(outcome.promotion_pending);
        assert_eq!(game.side_to_move, Color::Light);
        assert_eq!(
            game.apply_move(sq("e1"), sq("e2"), None),
            Err(ChessError::PromotionPending(sq("b8")))
        );
        assert_eq!(
            game.complete_promotion(PieceKind::King),
            Err(ChessError::InvalidPromotionChoice(PieceKind::King))
        );

        let outcome = game.complete_promotion(PieceKind::Queen).expect("queen is a valid choice");
        assert_eq!(outcome.promoted_to, Some(PieceKind::Queen));
        assert_eq!(outcome.material_delta, 8);
        assert!(outcome.gives_check);
        assert_eq!(game.side_to_move, Color::Dark);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.complete_promotion(PieceKind::Queen), Err(ChessError::NoPromotionPending));
    }

    #[test]
    fn promotion_with_choice_passes_turn_immediately() {
        let mut game = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let outcome = game.apply_move_text("b7b8n").expect("underpromotion should be legal");
        assert_eq!(outcome.promoted_to, Some(PieceKind::Knight));
        assert!(!outcome.promotion_pending);
        assert_eq!(game.side_to_move, Color::Dark);
        assert_eq!(outcome.terminal, TerminalState::DrawInsufficientMaterial);
    }

    #[test]
    fn rejected_moves_do_not_mutate() {
        let mut game = GameState::new_game();
        let before = game.clone();

        assert_eq!(
            game.apply_move(sq("e2"), sq("e2"), None),
            Err(ChessError::IllegalMove { from: sq("e2"), to: sq("e2") })
        );
        assert_eq!(
            game.apply_move(sq("e4"), sq("e5"), None),
            Err(ChessError::NoPieceAtOrigin(sq("e4")))
        );
        assert_eq!(
            game.apply_move(sq("e7"), sq("e5"), None),
            Err(ChessError::NotYourTurn { square: sq("e7"), color: Color::Dark })
        );
        assert_eq!(
            game.apply_move(sq("e2"), sq("e5"), None),
            Err(ChessError::IllegalMove { from: sq("e2"), to: sq("e5") })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn clocks_follow_pawn_moves_and_captures() {
        let mut game = GameState::new_game();
        game.apply_move_text("g1f3").expect("legal");
        assert_eq!((game.halfmove_clock, game.fullmove_number), (1, 1));
        game.apply_move_text("b8c6").expect("legal");
        assert_eq!((game.halfmove_clock, game.fullmove_number), (2, 2));
        game.apply_move_text("e2e4").expect("legal");
        assert_eq!((game.halfmove_clock, game.fullmove_number), (0, 2));
    }

    #[test]
    fn fools_mate_is_reported_as_checkmate() {
        let mut game = GameState::new_game();
        for text in ["f2f3", "e7e5", "g2g4"] {
            game.apply_move_text(text).expect("opening move should be legal");
        }
        let outcome = game.apply_move_text("d8h4").expect("Qh4 should be legal");
        assert!(outcome.gives_check);
        assert_eq!(outcome.terminal, TerminalState::Checkmate(Color::Light));
    }

    #[test]
    fn pending_promotion_reports_uncovered_check() {
        // b7b8 opens the seventh rank for the rook on a7.
        let mut game = GameState::from_fen("8/RP5k/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let outcome = game.apply_move(sq("b7"), sq("b8"), None).expect("push should be legal");
        assert!(outcome.promotion_pending);
        assert!(outcome.gives_check);

        let outcome = game.complete_promotion(PieceKind::Knight).expect("knight is a valid choice");
        assert!(outcome.gives_check);
    }

    #[test]
    fn unchecked_play_from_a_vacant_square_changes_nothing() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert_eq!(game.play_unchecked(sq("e4"), sq("e5"), PieceKind::Queen), MoveKind::Normal);
        assert_eq!(game, before);
        assert_eq!(game.side_to_move, Color::Light);
    }
}
