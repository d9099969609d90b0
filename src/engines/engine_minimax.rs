//! Fixed-depth minimax engine: the automated opponent.

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::minimax::{search, SearchConfig};

pub struct MinimaxEngine {
    config: SearchConfig,
    scorer: Box<dyn BoardScorer>,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, Box::new(PieceSquareScorer))
    }

    pub fn with_scorer(config: SearchConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self { config, scorer }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Mailbox Minimax"
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<Option<Move>> {
        match search(
            game_state,
            game_state.side_to_move,
            &self.config,
            self.scorer.as_ref(),
        ) {
            Ok(report) => Ok(Some(report.best_move)),
            Err(ChessError::NoLegalMoves(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
