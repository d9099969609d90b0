use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_shared::slide_destinations;

pub const ROOK_DIRECTIONS: [i8; 4] = [1, -1, 8, -8];

pub fn rook_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    slide_destinations(game_state, from, color, &ROOK_DIRECTIONS, out);
}
