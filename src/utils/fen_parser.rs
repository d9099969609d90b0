//! FEN-to-GameState parser.
//!
//! Builds a complete `GameState` from Forsyth-Edwards Notation. Only the
//! board layout and side to move are required; missing castling, en-passant
//! and clock fields default to `-`, `-`, `0` and `1`.
//!
//! Castling rights are not stored separately. A right missing from the FEN
//! is recorded by marking that home rook as already moved, and pawns away
//! from their start rank are marked as moved.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{kingside_rook_home, pawn_start_rank, queenside_rook_home};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFormat("missing board layout".to_owned()))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFormat("missing side to move".to_owned()))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(ChessError::InvalidFormat("extra trailing fields".to_owned()));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    locate_kings(&mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    apply_castling_rights(castling_part, &mut game_state)?;
    parse_en_passant_square(en_passant_part, &mut game_state)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::InvalidFormat(format!("halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::InvalidFormat(format!("fullmove number '{fullmove_part}'")))?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFormat(format!(
            "board layout has {} ranks, expected 8",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as i8;
        let mut file = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidFormat(format!("empty-square run '{ch}'")));
                }
                file += empty_count as i8;
                if file > 8 {
                    return Err(rank_width_error(board_rank));
                }
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch).ok_or(ChessError::InvalidCharacter(ch))?;
            let square = square_at(file, board_rank).ok_or_else(|| rank_width_error(board_rank))?;

            let moved = kind == PieceKind::Pawn && board_rank != pawn_start_rank(color);
            game_state.squares[square as usize] = if moved {
                SquareCode::moved_piece(kind, color)
            } else {
                SquareCode::piece(kind, color)
            };
            file += 1;
        }

        if file != 8 {
            return Err(rank_width_error(board_rank));
        }
    }

    Ok(())
}

fn rank_width_error(board_rank: i8) -> ChessError {
    ChessError::InvalidFormat(format!("rank {} does not sum to 8 files", board_rank + 1))
}

fn locate_kings(game_state: &mut GameState) -> ChessResult<()> {
    for color in [Color::Light, Color::Dark] {
        let kings: Vec<Square> = (0..64u8)
            .filter(|&sq| game_state.square(sq).is_piece(PieceKind::King, color))
            .collect();
        let [king] = kings.as_slice() else {
            return Err(ChessError::InvalidPieceCount {
                color,
                kings: kings.len(),
            });
        };
        game_state.king_squares[color.index()] = *king;
    }
    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::InvalidFormat(format!("side to move '{side_part}'"))),
    }
}

fn apply_castling_rights(castling_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let mut rights = [[false; 2]; 2];

    if castling_part != "-" {
        for ch in castling_part.chars() {
            match ch {
                'K' => rights[Color::Light.index()][0] = true,
                'Q' => rights[Color::Light.index()][1] = true,
                'k' => rights[Color::Dark.index()][0] = true,
                'q' => rights[Color::Dark.index()][1] = true,
                _ => {
                    return Err(ChessError::InvalidFormat(format!(
                        "castling rights character '{ch}'"
                    )))
                }
            }
        }
    }

    for color in [Color::Light, Color::Dark] {
        let [kingside, queenside] = rights[color.index()];
        let homes = [
            (kingside, kingside_rook_home(color)),
            (queenside, queenside_rook_home(color)),
        ];
        for (allowed, home) in homes {
            let rook = game_state.square(home);
            if !allowed && rook.is_piece(PieceKind::Rook, color) {
                game_state.squares[home as usize] = rook.with_moved();
            }
        }
    }

    Ok(())
}

fn parse_en_passant_square(en_passant_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    if en_passant_part == "-" {
        return Ok(());
    }

    let square = algebraic_to_square(en_passant_part)?;
    let mover = game_state.side_to_move.opposite();
    // The skipped square sits just behind the pawn that double-advanced.
    let expected_rank = pawn_start_rank(mover) + mover.forward();
    if rank_of(square) != expected_rank || !game_state.square(square).is_vacant() {
        return Err(ChessError::InvalidFormat(format!(
            "en-passant square '{en_passant_part}'"
        )));
    }

    game_state.squares[square as usize] = SquareCode::EnPassantTarget(mover);
    game_state.en_passant_square = Some(square);
    Ok(())
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind, SquareCode};

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.king_squares, [4, 60]);
        assert_eq!(game_state.en_passant_square, None);
        assert!(game_state.squares.iter().all(|code| !code.has_moved()));
    }

    #[test]
    fn metadata_fields_are_optional() {
        let game_state = parse_fen("4k3/8/8/8/8/8/8/4K3 b").expect("short FEN should parse");
        assert_eq!(game_state.side_to_move, Color::Dark);
        assert_eq!((game_state.halfmove_clock, game_state.fullmove_number), (0, 1));
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ChessError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ChessError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Ok(_)
        ));
        assert_eq!(
            parse_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ChessError::InvalidCharacter('x'))
        );
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x"),
            Err(ChessError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra"),
            Err(ChessError::InvalidFormat(_))
        ));
    }

    #[test]
    fn each_color_needs_exactly_one_king() {
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessError::InvalidPieceCount {
                color: Color::Dark,
                kings: 0
            })
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(ChessError::InvalidPieceCount {
                color: Color::Light,
                kings: 2
            })
        );
    }

    #[test]
    fn missing_castling_rights_mark_home_rooks_moved() {
        let game_state = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("FEN should parse");
        assert!(!game_state.square(7).has_moved());
        assert!(game_state.square(0).has_moved());
        assert!(game_state.square(63).has_moved());
        assert!(!game_state.square(56).has_moved());
    }

    #[test]
    fn en_passant_field_places_marker_for_the_side_that_just_moved() {
        let game_state = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("FEN should parse");
        assert_eq!(game_state.en_passant_square, Some(20));
        assert_eq!(game_state.square(20), SquareCode::EnPassantTarget(Color::Light));
        assert!(game_state.square(28).is_piece(PieceKind::Pawn, Color::Light));
        assert!(game_state.square(28).has_moved());

        // Wrong rank for the side to move.
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1"),
            Err(ChessError::InvalidFormat(_))
        ));
    }
}
