//! Pawn pushes and captures.
//!
//! Pushes need open squares; the double push also needs an unmoved pawn on
//! its start rank. Captures go diagonally onto an enemy piece or onto the
//! en-passant marker left by an enemy double push. Geometry is checked with
//! `square_at`, so a capture from the h-file can never reach the a-file.

use crate::game_state::chess_rules::pawn_start_rank;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub fn pawn_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    let file = file_of(from);
    let rank = rank_of(from);
    let forward = color.forward();

    if let Some(one) = square_at(file, rank + forward) {
        if game_state.square(one).is_vacant() {
            out.push(one);

            let unmoved = !game_state.square(from).has_moved();
            if unmoved && rank == pawn_start_rank(color) {
                if let Some(two) = square_at(file, rank + 2 * forward) {
                    if game_state.square(two).is_vacant() {
                        out.push(two);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(target) = square_at(file + side, rank + forward) else {
            continue;
        };
        if pawn_can_capture_on(game_state.square(target), color) {
            out.push(target);
        }
    }
}

#[inline]
fn pawn_can_capture_on(code: SquareCode, color: Color) -> bool {
    match code {
        SquareCode::Occupied { kind, color: owner, .. } => {
            owner != color && kind != PieceKind::King
        }
        SquareCode::EnPassantTarget(owner) => owner != color,
        SquareCode::Empty => false,
    }
}

#[cfg(test)]
mod tests {
    use super::pawn_destinations;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn destinations(fen: &str, from: &str, color: Color) -> Vec<u8> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        pawn_destinations(&game, sq(from), color, &mut out);
        out.sort_unstable();
        out
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(destinations(fen, "e2", Color::Light), vec![sq("e3"), sq("e4")]);
        assert_eq!(destinations(fen, "d7", Color::Dark), vec![sq("d5"), sq("d6")]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
        assert!(destinations(fen, "e2", Color::Light).is_empty());
    }

    #[test]
    fn edge_pawn_captures_do_not_wrap() {
        // A capture from h4 must not reach a6.
        let fen = "4k3/8/p7/6p1/7P/8/8/4K3 w - - 0 1";
        assert_eq!(destinations(fen, "h4", Color::Light), vec![sq("g5"), sq("h5")]);
    }

    #[test]
    fn en_passant_marker_is_only_capturable_by_the_other_color() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        assert_eq!(destinations(fen, "e5", Color::Light), vec![sq("d6"), sq("e6")]);
    }
}
