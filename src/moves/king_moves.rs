//! King steps and castling.

use crate::game_state::chess_rules::{
    king_home_square, KINGSIDE_ROOK_DISTANCE, QUEENSIDE_ROOK_DISTANCE,
};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::move_shared::{adjacent_step, can_land_on};

pub const KING_OFFSETS: [i8; 8] = [7, 8, 9, -1, 1, -9, -8, -7];

pub fn king_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    for delta in KING_OFFSETS {
        if let Some(to) = adjacent_step(from, delta) {
            if can_land_on(game_state.square(to), color) {
                out.push(to);
            }
        }
    }

    castling_destinations(game_state, from, color, out);
}

/// Two-square king moves. The king and the rook must be unmoved and on their
/// home squares, everything between them open, and the king may not start
/// in, pass through or land on an attacked square.
fn castling_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    let king = game_state.square(from);
    if from != king_home_square(color) || king.has_moved() || !king.is_piece(PieceKind::King, color) {
        return;
    }
    if is_square_attacked(game_state, from, color) {
        return;
    }

    let rook_ready = |square: Square| {
        let rook = game_state.square(square);
        rook.is_piece(PieceKind::Rook, color) && !rook.has_moved()
    };
    let open = |squares: &[Square]| squares.iter().all(|&s| game_state.square(s).is_vacant());
    let safe = |squares: &[Square]| {
        squares
            .iter()
            .all(|&s| !is_square_attacked(game_state, s, color))
    };

    if rook_ready(from + KINGSIDE_ROOK_DISTANCE)
        && open(&[from + 1, from + 2])
        && safe(&[from + 1, from + 2])
    {
        out.push(from + 2);
    }

    if rook_ready(from - QUEENSIDE_ROOK_DISTANCE)
        && open(&[from - 1, from - 2, from - 3])
        && safe(&[from - 1, from - 2])
    {
        out.push(from - 2);
    }
}

#[cfg(test)]
mod tests {
    use super::king_destinations;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn destinations(fen: &str, from: &str, color: Color) -> Vec<u8> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        king_destinations(&game, sq(from), color, &mut out);
        out.sort_unstable();
        out
    }

    #[test]
    fn corner_king_does_not_wrap() {
        assert_eq!(
            destinations("4k3/8/8/8/8/8/8/7K w - - 0 1", "h1", Color::Light),
            vec![sq("g1"), sq("g2"), sq("h2")]
        );
    }

    #[test]
    fn castling_both_sides_when_clear() {
        let moves = destinations("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1", Color::Light);
        assert!(moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));
    }

    #[test]
    fn castling_blocked_by_missing_rights_and_attacked_path() {
        // Rights withheld in the FEN mark the rooks as moved.
        let moves = destinations("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1", "e1", Color::Light);
        assert!(!moves.contains(&sq("g1")));
        assert!(!moves.contains(&sq("c1")));

        // Rook on f8 covers f1; the queenside path is untouched.
        let moves = destinations("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1", Color::Light);
        assert!(!moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));

        // b1 only needs to be empty, not safe.
        let moves = destinations("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1", Color::Light);
        assert!(moves.contains(&sq("c1")));
    }

    #[test]
    fn no_castling_out_of_check() {
        let moves = destinations("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1", "e1", Color::Light);
        assert!(!moves.contains(&sq("c1")));
    }
}
