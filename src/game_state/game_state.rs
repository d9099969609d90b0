//! Owned board state.
//!
//! `GameState` is the central model of the rules core: the 64-square
//! mailbox, side to move, clocks, cached king squares, the live en-passant
//! marker and any promotion still waiting for its piece choice. It is a
//! plain value; search and legality checks work on clones and the live
//! board changes only through `GameState::apply_move` and
//! `GameState::complete_promotion` (see `board_manager`).

use std::fmt;

use tracing::warn;

use crate::chess_errors::ChessResult;
use crate::game_state::board_manager::PendingPromotion;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::terminal_state::{classify, TerminalState};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub squares: [SquareCode; 64],
    pub side_to_move: Color,

    // Plies since the last pawn move or capture.
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // [color] -> square of that color's king.
    pub king_squares: [Square; 2],
    pub en_passant_square: Option<Square>,
    pub pending_promotion: Option<PendingPromotion>,
}

impl GameState {
    /// Board with no pieces. Only the FEN parser starts from this; it fills
    /// in both kings before handing the state out.
    #[inline]
    pub(crate) fn new_empty() -> Self {
        Self {
            squares: [SquareCode::Empty; 64],
            side_to_move: Color::Light,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [0; 2],
            en_passant_square: None,
            pending_promotion: None,
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Replace this position with `fen`. On error the current position is
    /// left exactly as it was.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        match parse_fen(fen) {
            Ok(loaded) => {
                *self = loaded;
                Ok(())
            }
            Err(err) => {
                warn!(%err, fen, "rejected position load");
                Err(err)
            }
        }
    }

    #[inline]
    pub fn square(&self, square: Square) -> SquareCode {
        self.squares[square as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        let square = self.king_squares[color.index()];
        debug_assert!(
            self.square(square).is_piece(PieceKind::King, color),
            "cached {color:?} king square {square} does not hold the king"
        );
        square
    }

    /// Sum of `PieceKind::material_value` over `color`'s pieces.
    pub fn material(&self, color: Color) -> i32 {
        self.squares
            .iter()
            .filter(|code| code.is_color(color))
            .filter_map(|code| code.kind())
            .map(PieceKind::material_value)
            .sum()
    }

    /// `color`'s material minus the opponent's.
    #[inline]
    pub fn material_advantage(&self, color: Color) -> i32 {
        self.material(color) - self.material(color.opposite())
    }

    /// Terminal classification for the side to move.
    #[inline]
    pub fn terminal_state(&self) -> TerminalState {
        classify(self, self.side_to_move)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_game_state(self))
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind, SquareCode};

    #[test]
    fn starting_position_has_sixteen_pieces_per_side() {
        let game = GameState::new_game();
        for color in [Color::Light, Color::Dark] {
            let count = game.squares.iter().filter(|c| c.is_color(color)).count();
            assert_eq!(count, 16);
        }
        assert_eq!(game.king_square(Color::Light), 4);
        assert_eq!(game.king_square(Color::Dark), 60);
        assert_eq!(game.material_advantage(Color::Light), 0);
        assert_eq!(game.material(Color::Dark), 8 + 2 * 3 + 2 * 3 + 2 * 5 + 9);
    }

    #[test]
    fn failed_load_keeps_previous_position() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 3 20")
            .expect("custom FEN should parse");
        let before = game.clone();

        assert!(game.load_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert_eq!(game, before);

        game.load_fen(STARTING_POSITION_FEN)
            .expect("starting FEN should load");
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn display_renders_the_board() {
        let game = GameState::new_game();
        let text = game.to_string();
        assert!(text.starts_with("  a b c d e f g h"));
        assert_eq!(text.lines().count(), 10);
        assert_eq!(game.square(3), SquareCode::piece(PieceKind::Queen, Color::Light));
    }
}
