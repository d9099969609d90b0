//! Long algebraic move text: `e2e4`, `e1g1`, `e7e8q`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Split move text into origin, destination and optional promotion piece.
///
/// Only the syntax is checked here; legality is the board's business.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let invalid = || ChessError::InvalidMoveText(text.to_owned());
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(promotion_from_char(ch).ok_or_else(invalid)?),
    };

    Ok((from, to, promotion))
}

pub fn move_to_long_algebraic(mv: Move, promotion: Option<PieceKind>) -> ChessResult<String> {
    let mut out = square_to_algebraic(mv.from)?;
    out.push_str(&square_to_algebraic(mv.to)?);
    if let Some(piece) = promotion {
        out.push(promotion_to_char(piece).ok_or(ChessError::InvalidPromotionChoice(piece))?);
    }
    Ok(out)
}

fn promotion_from_char(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}

fn promotion_to_char(piece: PieceKind) -> Option<char> {
    match piece {
        PieceKind::Queen => Some('q'),
        PieceKind::Rook => Some('r'),
        PieceKind::Bishop => Some('b'),
        PieceKind::Knight => Some('n'),
        PieceKind::Pawn | PieceKind::King => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{move_to_long_algebraic, parse_long_algebraic};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::{Move, PieceKind};

    #[test]
    fn parses_plain_and_promotion_moves() {
        assert_eq!(parse_long_algebraic("e2e4"), Ok((12, 28, None)));
        assert_eq!(
            parse_long_algebraic("a7a8N"),
            Ok((48, 56, Some(PieceKind::Knight)))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in ["e2", "e2e9", "e2e4k", "e2e4qq", "é2e4"] {
            assert_eq!(
                parse_long_algebraic(bad),
                Err(ChessError::InvalidMoveText(bad.to_owned()))
            );
        }
    }

    #[test]
    fn formats_moves() {
        assert_eq!(move_to_long_algebraic(Move::new(6, 21), None), Ok("g1f3".to_owned()));
        assert_eq!(
            move_to_long_algebraic(Move::new(52, 60), Some(PieceKind::Queen)),
            Ok("e7e8q".to_owned())
        );
        assert!(move_to_long_algebraic(Move::new(52, 60), Some(PieceKind::King)).is_err());
    }
}
