//! Fixed-depth negamax search.
//!
//! Every candidate is explored on a cloned board, so the live game is never
//! touched. `depth` counts replies below the root move: at depth 0 each root
//! move is scored by the static evaluator, at depth 1 the opponent's best
//! answer is taken into account, and so on.
//!
//! `SearchStrategy::AlphaBeta` prunes with a fail-soft window. It returns the
//! same move and rating as the plain full-width search: a later move only
//! replaces the current best when its score is strictly higher, and a pruned
//! subtree can never produce such a score.

use tracing::{debug, trace};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};

pub const MATE_SCORE: i32 = 1_000_000;
const INFINITY: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Full-width minimax, no pruning.
    #[default]
    Minimax,
    AlphaBeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub strategy: SearchStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            strategy: SearchStrategy::Minimax,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Carries its rating, from the searching side's point of view.
    pub best_move: Move,
    pub nodes: u64,
}

/// Best move for `color` with the default evaluator and full-width search.
pub fn best_move(game_state: &GameState, color: Color, depth: u8) -> ChessResult<Move> {
    let config = SearchConfig {
        depth,
        strategy: SearchStrategy::Minimax,
    };
    search(game_state, color, &config, &PieceSquareScorer).map(|report| report.best_move)
}

/// Value of the position for `color` to move, searched `depth` replies deep.
/// A side with no legal moves rates `-MATE_SCORE` in check and `0` otherwise.
pub fn rate_position(game_state: &GameState, color: Color, depth: u8) -> i32 {
    let mut searcher = Searcher::new(&PieceSquareScorer, SearchStrategy::Minimax);
    searcher.rate(game_state, color, depth, -INFINITY, INFINITY)
}

pub fn search(
    game_state: &GameState,
    color: Color,
    config: &SearchConfig,
    scorer: &dyn BoardScorer,
) -> ChessResult<SearchReport> {
    let moves = all_legal_moves(game_state, color);
    if moves.is_empty() {
        return Err(ChessError::NoLegalMoves(color));
    }

    let mut searcher = Searcher::new(scorer, config.strategy);
    let mut best: Option<Move> = None;
    let mut alpha = -INFINITY;

    for mv in moves {
        let score = searcher.score_move(game_state, mv, color, config.depth, alpha, INFINITY);
        trace!(from = mv.from, to = mv.to, score, "root move scored");

        if best.map_or(true, |current| Some(score) > current.rating) {
            best = Some(mv.with_rating(score));
        }
        alpha = alpha.max(score);
    }

    let best_move = best.ok_or(ChessError::NoLegalMoves(color))?;
    debug!(
        ?color,
        depth = config.depth,
        strategy = ?config.strategy,
        nodes = searcher.nodes,
        from = best_move.from,
        to = best_move.to,
        rating = ?best_move.rating,
        "search finished"
    );

    Ok(SearchReport {
        best_move,
        nodes: searcher.nodes,
    })
}

struct Searcher<'a> {
    scorer: &'a dyn BoardScorer,
    strategy: SearchStrategy,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    fn new(scorer: &'a dyn BoardScorer, strategy: SearchStrategy) -> Self {
        Self {
            scorer,
            strategy,
            nodes: 0,
        }
    }

    /// Negamax value of `game_state` for `color` to move.
    fn rate(
        &mut self,
        game_state: &GameState,
        color: Color,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        let moves = all_legal_moves(game_state, color);
        if moves.is_empty() {
            return if is_king_in_check(game_state, color) {
                -MATE_SCORE
            } else {
                0
            };
        }

        let mut best = -INFINITY;
        for mv in moves {
            let score = self.score_move(game_state, mv, color, depth, alpha, beta);
            best = best.max(score);
            alpha = alpha.max(score);
            if self.strategy == SearchStrategy::AlphaBeta && alpha >= beta {
                break;
            }
        }
        best
    }

    /// Value of playing `mv` for `color`.
    fn score_move(
        &mut self,
        game_state: &GameState,
        mv: Move,
        color: Color,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;
        let mut child = game_state.clone();
        child.apply_theoretical_move(mv);

        if depth == 0 {
            self.scorer.score(&child) * color.perspective()
        } else {
            -self.rate(&child, color.opposite(), depth - 1, -beta, -alpha)
        }
    }
}
