//! Offset stepping shared by the per-piece generators and attack detection.
//!
//! Offsets are plain index deltas on the `file + 8 * rank` board. A delta
//! alone cannot tell `h1 + 1` (wraps to `a2`) from a real step, so every
//! step is validated geometrically from the file and rank distance.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

#[inline]
fn raw_step(from: Square, delta: i8) -> Option<Square> {
    let to = from as i16 + delta as i16;
    if (0..64).contains(&to) {
        Some(to as Square)
    } else {
        None
    }
}

#[inline]
fn distance(from: Square, to: Square) -> (i8, i8) {
    (
        (file_of(to) - file_of(from)).abs(),
        (rank_of(to) - rank_of(from)).abs(),
    )
}

/// One king-sized step (also one ray step): at most one file and one rank.
#[inline]
pub fn adjacent_step(from: Square, delta: i8) -> Option<Square> {
    raw_step(from, delta).filter(|&to| {
        let (files, ranks) = distance(from, to);
        files <= 1 && ranks <= 1
    })
}

/// One knight jump: one file and two ranks, or two files and one rank.
#[inline]
pub fn knight_step(from: Square, delta: i8) -> Option<Square> {
    raw_step(from, delta).filter(|&to| matches!(distance(from, to), (1, 2) | (2, 1)))
}

/// A piece of `color` may finish its move on `code`: the square holds no
/// real piece, or holds an enemy piece other than the king.
#[inline]
pub fn can_land_on(code: SquareCode, color: Color) -> bool {
    match code {
        SquareCode::Occupied { color: owner, kind, .. } => {
            owner != color && kind != PieceKind::King
        }
        _ => true,
    }
}

/// Walk each ray from `from`, collecting vacant squares and stopping at the
/// first piece (kept when it can be captured).
pub fn slide_destinations(
    game_state: &GameState,
    from: Square,
    color: Color,
    directions: &[i8],
    out: &mut Vec<Square>,
) {
    for &delta in directions {
        let mut current = from;
        while let Some(next) = adjacent_step(current, delta) {
            let code = game_state.square(next);
            if code.is_vacant() {
                out.push(next);
                current = next;
                continue;
            }
            if can_land_on(code, color) {
                out.push(next);
            }
            break;
        }
    }
}

/// First real piece met walking from `from` along `delta`.
pub fn first_piece_along(
    game_state: &GameState,
    from: Square,
    delta: i8,
) -> Option<(Square, SquareCode)> {
    let mut current = from;
    while let Some(next) = adjacent_step(current, delta) {
        let code = game_state.square(next);
        if !code.is_vacant() {
            return Some((next, code));
        }
        current = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{adjacent_step, knight_step};

    #[test]
    fn steps_do_not_wrap_around_the_board_edge() {
        // h1 + 1 would be a2.
        assert_eq!(adjacent_step(7, 1), None);
        // a2 - 1 would be h1.
        assert_eq!(adjacent_step(8, -1), None);
        // a1 + 7 would be h1.
        assert_eq!(adjacent_step(0, 7), None);
        assert_eq!(adjacent_step(0, 9), Some(9));
        assert_eq!(adjacent_step(63, 8), None);
    }

    #[test]
    fn knight_jumps_do_not_wrap() {
        // g1 + 10 would be a3.
        assert_eq!(knight_step(6, 10), None);
        assert_eq!(knight_step(6, 15), Some(21));
        assert_eq!(knight_step(6, 17), Some(23));
        // a1 + 6 would be g1.
        assert_eq!(knight_step(0, 6), None);
    }
}
