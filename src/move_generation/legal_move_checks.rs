//! Attack detection and the check-safety filter.
//!
//! Attacks are found by looking outward from the target square with the
//! same offset and ray tables the generators use: a knight offset that lands
//! on an enemy knight means the square is attacked by it, and likewise for
//! kings, pawns and the first piece along each slider ray.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::move_shared::{adjacent_step, first_piece_along, knight_step};
use crate::moves::rook_moves::ROOK_DIRECTIONS;

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, game_state.king_square(color), color)
}

/// Would a piece of `color` standing on `square` be attacked by the other
/// side? The square itself may be empty.
pub fn is_square_attacked(game_state: &GameState, square: Square, color: Color) -> bool {
    let enemy = color.opposite();
    let enemy_piece_at = |at: Square, kind: PieceKind| game_state.square(at).is_piece(kind, enemy);

    // Enemy pawns capture towards us, so they sit one rank ahead of the square.
    let file = file_of(square);
    let ahead = rank_of(square) + color.forward();
    for side in [-1, 1] {
        if let Some(at) = square_at(file + side, ahead) {
            if enemy_piece_at(at, PieceKind::Pawn) {
                return true;
            }
        }
    }

    let knight_attack = KNIGHT_OFFSETS
        .iter()
        .filter_map(|&delta| knight_step(square, delta))
        .any(|at| enemy_piece_at(at, PieceKind::Knight));
    if knight_attack {
        return true;
    }

    let king_attack = KING_OFFSETS
        .iter()
        .filter_map(|&delta| adjacent_step(square, delta))
        .any(|at| enemy_piece_at(at, PieceKind::King));
    if king_attack {
        return true;
    }

    let slider_attack = |directions: &[i8], kind: PieceKind| {
        directions.iter().any(|&delta| {
            matches!(
                first_piece_along(game_state, square, delta),
                Some((_, code)) if code.is_piece(kind, enemy) || code.is_piece(PieceKind::Queen, enemy)
            )
        })
    };

    slider_attack(&ROOK_DIRECTIONS, PieceKind::Rook) || slider_attack(&BISHOP_DIRECTIONS, PieceKind::Bishop)
}

/// Does moving `from -> to` keep `color`'s king safe?
///
/// The move is simulated on a clone as a bare relocation. The only side
/// effect carried over is removing the pawn taken en passant, since that
/// pawn can be the piece shielding the king. Castling legality (the king's
/// path) is settled by the king generator before this is consulted.
pub fn is_legal(game_state: &GameState, from: Square, to: Square, color: Color) -> bool {
    let mut board = game_state.clone();
    let mover = board.square(from);

    if mover.is_kind(PieceKind::Pawn)
        && board.square(to).is_en_passant_target()
        && file_of(from) != file_of(to)
    {
        if let Some(victim) = square_at(file_of(to), rank_of(from)) {
            board.squares[victim as usize] = SquareCode::Empty;
        }
    }

    board.squares[to as usize] = mover;
    board.squares[from as usize] = SquareCode::Empty;
    if mover.is_kind(PieceKind::King) {
        board.king_squares[color.index()] = to;
    }

    !is_king_in_check(&board, color)
}
