use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_shared::slide_destinations;

pub const BISHOP_DIRECTIONS: [i8; 4] = [9, -9, 7, -7];

pub fn bishop_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    slide_destinations(game_state, from, color, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::bishop_destinations;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    #[test]
    fn bishop_diagonals_do_not_wrap() {
        // h3 bishop: a +7 step from h-file squares would wrap to the a-file.
        let game = GameState::from_fen("k7/8/8/8/8/7B/8/K7 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        bishop_destinations(&game, 23, Color::Light, &mut out);
        out.sort_unstable();
        // g2, f1, g4, f5, e6, d7, c8
        assert_eq!(out, vec![5, 14, 30, 37, 44, 51, 58]);
    }
}
