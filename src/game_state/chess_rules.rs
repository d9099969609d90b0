//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard starting position, home squares used
//! by castling, pawn start/promotion ranks, and the fifty-move threshold.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move draw applies.
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u16 = 100;

/// Distance from the king's home square to the kingside rook.
pub const KINGSIDE_ROOK_DISTANCE: Square = 3;
/// Distance from the king's home square to the queenside rook.
pub const QUEENSIDE_ROOK_DISTANCE: Square = 4;

#[inline]
pub const fn king_home_square(color: Color) -> Square {
    match color {
        Color::Light => 4,
        Color::Dark => 60,
    }
}

#[inline]
pub const fn kingside_rook_home(color: Color) -> Square {
    king_home_square(color) + KINGSIDE_ROOK_DISTANCE
}

#[inline]
pub const fn queenside_rook_home(color: Color) -> Square {
    king_home_square(color) - QUEENSIDE_ROOK_DISTANCE
}

/// Rank a pawn of `color` starts on (and may double-advance from).
#[inline]
pub const fn pawn_start_rank(color: Color) -> i8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

/// Rank on which a pawn of `color` promotes.
#[inline]
pub const fn promotion_rank(color: Color) -> i8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}
