//! Engine abstraction for automated opponents.
//!
//! An engine looks at a position and proposes one move for the side to
//! move. The caller plays it through `GameState::apply_move`, so engines
//! never mutate the live game.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Reset any per-game state before a new game starts.
    fn new_game(&mut self) {}

    /// `Ok(None)` when the side to move has no legal moves.
    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<Option<Move>>;
}
