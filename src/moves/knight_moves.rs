use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_shared::{can_land_on, knight_step};

pub const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];

pub fn knight_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    for delta in KNIGHT_OFFSETS {
        if let Some(to) = knight_step(from, delta) {
            if can_land_on(game_state.square(to), color) {
                out.push(to);
            }
        }
    }
}
