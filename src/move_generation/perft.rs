//! Perft: exhaustive legal-move tree counts for validating move generation.
//!
//! Leaves are reached through `GameState::play_unchecked`, the same
//! relocation the live board uses, and each promotion is expanded into all
//! four piece choices so counts match the published reference tables.

use crate::chess_errors::ChessResult;
use crate::game_state::board_manager::MoveKind;
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_any_legal_move};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, leaf: &GameState, kind: MoveKind, captured: bool) {
        self.nodes += 1;
        match kind {
            MoveKind::EnPassantCapture => {
                self.captures += 1;
                self.en_passant += 1;
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => self.castles += 1,
            MoveKind::Promotion => self.promotions += 1,
            MoveKind::Normal | MoveKind::DoublePawnAdvance => {}
        }
        if captured {
            self.captures += 1;
        }

        let defender = leaf.side_to_move;
        if is_king_in_check(leaf, defender) {
            self.checks += 1;
            if !has_any_legal_move(leaf, defender) {
                self.checkmates += 1;
            }
        }
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    perft_recurse(game_state, depth, &mut total);
    total
}

/// Per-root-move node counts, keyed by long algebraic move text.
pub fn perft_divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(String, u64)>> {
    let mut divided = Vec::new();
    if depth == 0 {
        return Ok(divided);
    }

    let color = game_state.side_to_move;
    for mv in all_legal_moves(game_state, color) {
        for &promotion in promotion_choices(game_state, mv) {
            let mut child = game_state.clone();
            child.play_unchecked(mv.from, mv.to, promotion);
            let shown = is_promotion(game_state, mv).then_some(promotion);
            divided.push((move_to_long_algebraic(mv, shown)?, perft(&child, depth - 1).nodes));
        }
    }
    Ok(divided)
}

fn perft_recurse(game_state: &GameState, depth: u8, total: &mut PerftCounts) {
    let color = game_state.side_to_move;
    for mv in all_legal_moves(game_state, color) {
        for &promotion in promotion_choices(game_state, mv) {
            let mut child = game_state.clone();
            let captured = child.square(mv.to).is_enemy_of(color);
            let kind = child.play_unchecked(mv.from, mv.to, promotion);

            if depth == 1 {
                let mut leaf = PerftCounts::default();
                leaf.record_leaf(&child, kind, captured);
                total.merge(leaf);
            } else {
                perft_recurse(&child, depth - 1, total);
            }
        }
    }
}

#[inline]
fn is_promotion(game_state: &GameState, mv: Move) -> bool {
    match game_state.square(mv.from) {
        SquareCode::Occupied {
            kind: PieceKind::Pawn,
            color,
            ..
        } => rank_of(mv.to) == promotion_rank(color),
        _ => false,
    }
}

#[inline]
fn promotion_choices(game_state: &GameState, mv: Move) -> &'static [PieceKind] {
    if is_promotion(game_state, mv) {
        &PieceKind::PROMOTIONS
    } else {
        &[PieceKind::Queen]
    }
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_divide};
    use crate::game_state::game_state::GameState;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const PROMOTIONS: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("reference FEN should parse")
    }

    #[test]
    fn starting_position_counts() {
        let start = GameState::new_game();
        assert_eq!(perft(&start, 0).nodes, 1);
        assert_eq!(perft(&start, 1).nodes, 20);
        assert_eq!(perft(&start, 2).nodes, 400);

        let depth3 = perft(&start, 3);
        assert_eq!(depth3.nodes, 8_902);
        assert_eq!(depth3.captures, 34);
        assert_eq!(depth3.checks, 12);
        assert_eq!(depth3.checkmates, 0);
    }

    #[test]
    fn kiwipete_counts() {
        let position = game(KIWIPETE);
        let depth1 = perft(&position, 1);
        assert_eq!(depth1.nodes, 48);
        assert_eq!(depth1.captures, 8);
        assert_eq!(depth1.castles, 2);

        let depth2 = perft(&position, 2);
        assert_eq!(depth2.nodes, 2_039);
        assert_eq!(depth2.captures, 351);
        assert_eq!(depth2.en_passant, 1);
        assert_eq!(depth2.castles, 91);
        assert_eq!(depth2.checks, 3);
    }

    #[test]
    fn endgame_position_counts() {
        let position = game(ENDGAME);
        assert_eq!(perft(&position, 1).nodes, 14);
        assert_eq!(perft(&position, 2).nodes, 191);
        assert_eq!(perft(&position, 3).nodes, 2_812);
    }

    #[test]
    fn promotion_heavy_position_counts() {
        let position = game(PROMOTIONS);
        assert_eq!(perft(&position, 1).nodes, 6);
        assert_eq!(perft(&position, 2).nodes, 264);
    }

    #[test]
    fn divide_sums_to_perft() {
        let start = GameState::new_game();
        let divided = perft_divide(&start, 2).expect("squares should format");
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().any(|(text, nodes)| text == "e2e4" && *nodes == 20));
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }
}
