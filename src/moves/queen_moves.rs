use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::move_shared::slide_destinations;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

pub fn queen_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    slide_destinations(game_state, from, color, &ROOK_DIRECTIONS, out);
    slide_destinations(game_state, from, color, &BISHOP_DIRECTIONS, out);
}
