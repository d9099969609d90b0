//! GameState-to-FEN generator.
//!
//! Castling letters are recomputed from the board: a right is written when
//! the king and that rook both stand unmoved on their home squares.

use crate::game_state::chess_rules::{king_home_square, kingside_rook_home, queenside_rook_home};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state);
    let en_passant = generate_en_passant_field(game_state.en_passant_square);

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game_state.square(rank * 8 + file) {
                SquareCode::Occupied { kind, color, .. } => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(color, kind));
                }
                SquareCode::Empty | SquareCode::EnPassantTarget(_) => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(color: Color, piece: PieceKind) -> char {
    let base = match piece {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match color {
        Color::Light => base.to_ascii_uppercase(),
        Color::Dark => base,
    }
}

fn generate_castling_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for color in [Color::Light, Color::Dark] {
        let king = game_state.square(king_home_square(color));
        if !king.is_piece(PieceKind::King, color) || king.has_moved() {
            continue;
        }

        let unmoved_rook = |square: Square| {
            let rook = game_state.square(square);
            rook.is_piece(PieceKind::Rook, color) && !rook.has_moved()
        };
        let (kingside, queenside) = match color {
            Color::Light => ('K', 'Q'),
            Color::Dark => ('k', 'q'),
        };

        if unmoved_rook(kingside_rook_home(color)) {
            out.push(kingside);
        }
        if unmoved_rook(queenside_rook_home(color)) {
            out.push(queenside);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    let Some(square) = square else {
        return "-".to_owned();
    };

    square_to_algebraic(square).unwrap_or_else(|_| "-".to_owned())
}
