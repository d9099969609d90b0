//! Game-end detection.
//!
//! `classify` decides whether the side to move can continue. Insufficient
//! material is checked first. A side without legal moves is checkmated when
//! its king is attacked and stalemated otherwise. A halfmove clock at the
//! fifty-move limit draws every position except a checkmate.

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVE_LIMIT;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    Ongoing,
    /// Payload is the side that has been mated.
    Checkmate(Color),
    Stalemate,
    DrawInsufficientMaterial,
    DrawFiftyMove,
}

impl TerminalState {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, TerminalState::Ongoing)
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            TerminalState::Stalemate
                | TerminalState::DrawInsufficientMaterial
                | TerminalState::DrawFiftyMove
        )
    }
}

/// Classify the position for `color`, the side about to move.
pub fn classify(game_state: &GameState, color: Color) -> TerminalState {
    if has_insufficient_material(game_state) {
        return TerminalState::DrawInsufficientMaterial;
    }

    let fifty_moves = game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVE_LIMIT;
    if has_any_legal_move(game_state, color) {
        return if fifty_moves {
            TerminalState::DrawFiftyMove
        } else {
            TerminalState::Ongoing
        };
    }

    if is_king_in_check(game_state, color) {
        TerminalState::Checkmate(color)
    } else if fifty_moves {
        TerminalState::DrawFiftyMove
    } else {
        TerminalState::Stalemate
    }
}

#[derive(Debug, Default)]
struct MinorPieces {
    knights: [usize; 2],
    bishops: [Vec<Square>; 2],
}

/// Neither side can possibly mate.
///
/// Applies only without pawns, rooks and queens. Drawn material:
/// - at most one knight in total and no bishops;
/// - knights only, where one side has two or more and the other has at
///   least one, or has a lone king;
/// - exactly one knight per side and no bishops;
/// - no knights and at most one bishop in total;
/// - no knights and one bishop per side, both on squares of the same shade.
pub fn has_insufficient_material(game_state: &GameState) -> bool {
    let mut minors = MinorPieces::default();

    for (index, code) in game_state.squares.iter().enumerate() {
        let SquareCode::Occupied { kind, color, .. } = *code else {
            continue;
        };
        match kind {
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => minors.knights[color.index()] += 1,
            PieceKind::Bishop => minors.bishops[color.index()].push(index as Square),
            PieceKind::King => {}
        }
    }

    let [light_knights, dark_knights] = minors.knights;
    let total_knights = light_knights + dark_knights;
    let [light_bishops, dark_bishops] = &minors.bishops;
    let total_bishops = light_bishops.len() + dark_bishops.len();

    if total_bishops == 0 {
        let lone_knight = total_knights <= 1;
        let knight_pair_against_knights = (light_knights >= 2 && dark_knights >= 1)
            || (dark_knights >= 2 && light_knights >= 1);
        let knight_pair_against_king = (light_knights >= 2 && dark_knights == 0)
            || (dark_knights >= 2 && light_knights == 0);
        let one_knight_each = light_knights == 1 && dark_knights == 1;
        return lone_knight
            || knight_pair_against_knights
            || knight_pair_against_king
            || one_knight_each;
    }

    if total_knights > 0 {
        return false;
    }

    match (light_bishops.as_slice(), dark_bishops.as_slice()) {
        _ if total_bishops <= 1 => true,
        ([light], [dark]) => same_shade(*light, *dark),
        _ => false,
    }
}
