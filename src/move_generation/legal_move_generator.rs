//! Legal move enumeration.
//!
//! Dispatches each square to its piece generator for pseudo-legal
//! destinations, then keeps only the destinations that leave the mover's
//! king safe (`legal_move_checks::is_legal`).

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_legal;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::king_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::pawn_destinations;
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;

/// Destinations allowed by the piece's movement pattern and the board's
/// occupancy, before the king-safety filter.
pub fn pseudo_legal_destinations(game_state: &GameState, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    let SquareCode::Occupied { kind, color, .. } = game_state.square(from) else {
        return out;
    };

    match kind {
        PieceKind::Pawn => pawn_destinations(game_state, from, color, &mut out),
        PieceKind::Knight => knight_destinations(game_state, from, color, &mut out),
        PieceKind::Bishop => bishop_destinations(game_state, from, color, &mut out),
        PieceKind::Rook => rook_destinations(game_state, from, color, &mut out),
        PieceKind::Queen => queen_destinations(game_state, from, color, &mut out),
        PieceKind::King => king_destinations(game_state, from, color, &mut out),
    }
    out
}

/// Legal destinations for the piece on `from`, whichever side owns it.
///
/// Empty for vacant squares and while a promotion is waiting for its piece.
pub fn legal_moves_from(game_state: &GameState, from: Square) -> Vec<Square> {
    if game_state.pending_promotion.is_some() || from > 63 {
        return Vec::new();
    }
    let SquareCode::Occupied { color, .. } = game_state.square(from) else {
        return Vec::new();
    };

    let mut destinations = pseudo_legal_destinations(game_state, from);
    destinations.retain(|&to| is_legal(game_state, from, to, color));
    destinations
}

/// Every legal move for `color`, in board order.
pub fn all_legal_moves(game_state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for from in 0..64u8 {
        if !game_state.square(from).is_color(color) {
            continue;
        }
        moves.extend(
            legal_moves_from(game_state, from)
                .into_iter()
                .map(|to| Move::new(from, to)),
        );
    }
    moves
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(game_state: &GameState, color: Color) -> bool {
    (0..64u8)
        .filter(|&from| game_state.square(from).is_color(color))
        .any(|from| {
            pseudo_legal_destinations(game_state, from)
                .into_iter()
                .any(|to| is_legal(game_state, from, to, color))
        })
}
