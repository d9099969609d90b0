//! Square-level vocabulary of the rules core.
//!
//! A board is 64 `SquareCode`s indexed `file + 8 * rank` (`a1 == 0`,
//! `h1 == 7`, `h8 == 63`). Each square is empty, holds exactly one piece, or
//! carries the transient en-passant marker left behind by a double pawn
//! advance. All queries below are a single match on that variant.

/// Side to move / owner of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// `+1` for Light and `-1` for Dark; turns a Light-positive score into
    /// one that is positive for `self`.
    #[inline]
    pub const fn perspective(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Rank delta of a forward pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Pieces a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Conventional point value for the material counter shown to players.
    /// Search uses the centipawn values in `search::board_scoring` instead.
    #[inline]
    pub const fn material_value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SquareCode {
    #[default]
    Empty,
    Occupied {
        kind: PieceKind,
        color: Color,
        has_moved: bool,
    },
    /// Square skipped by a double pawn advance of `Color`'s pawn. Only the
    /// other color may capture onto it, and only on the very next ply.
    EnPassantTarget(Color),
}

impl SquareCode {
    /// A piece that has not moved yet.
    #[inline]
    pub const fn piece(kind: PieceKind, color: Color) -> Self {
        SquareCode::Occupied {
            kind,
            color,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn moved_piece(kind: PieceKind, color: Color) -> Self {
        SquareCode::Occupied {
            kind,
            color,
            has_moved: true,
        }
    }

    /// Owner of the piece, or the color tag of an en-passant marker.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            SquareCode::Empty => None,
            SquareCode::Occupied { color, .. } => Some(color),
            SquareCode::EnPassantTarget(color) => Some(color),
        }
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            SquareCode::Occupied { kind, .. } => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, SquareCode::Empty)
    }

    /// No real piece stands here (empty or en-passant marker). Sliders,
    /// pawn pushes and castling paths all treat markers as open squares.
    #[inline]
    pub const fn is_vacant(self) -> bool {
        !matches!(self, SquareCode::Occupied { .. })
    }

    #[inline]
    pub const fn is_en_passant_target(self) -> bool {
        matches!(self, SquareCode::EnPassantTarget(_))
    }

    /// A real piece owned by `color`.
    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        matches!(self, SquareCode::Occupied { color: c, .. } if c == color)
    }

    /// A real piece owned by the opponent of `color`.
    #[inline]
    pub fn is_enemy_of(self, color: Color) -> bool {
        matches!(self, SquareCode::Occupied { color: c, .. } if c != color)
    }

    #[inline]
    pub fn is_kind(self, kind: PieceKind) -> bool {
        matches!(self, SquareCode::Occupied { kind: k, .. } if k == kind)
    }

    #[inline]
    pub fn is_piece(self, kind: PieceKind, color: Color) -> bool {
        matches!(self, SquareCode::Occupied { kind: k, color: c, .. } if k == kind && c == color)
    }

    #[inline]
    pub const fn has_moved(self) -> bool {
        matches!(self, SquareCode::Occupied { has_moved: true, .. })
    }

    /// Same piece with its has-moved flag set. Non-pieces are unchanged.
    #[inline]
    pub const fn with_moved(self) -> Self {
        match self {
            SquareCode::Occupied { kind, color, .. } => SquareCode::moved_piece(kind, color),
            other => other,
        }
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

#[inline]
pub const fn file_of(square: Square) -> i8 {
    (square % 8) as i8
}

#[inline]
pub const fn rank_of(square: Square) -> i8 {
    (square / 8) as i8
}

/// Square at `(file, rank)`, or `None` off the board.
#[inline]
pub const fn square_at(file: i8, rank: i8) -> Option<Square> {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        None
    } else {
        Some((rank * 8 + file) as Square)
    }
}

/// True when both squares have the same shade on a chessboard.
#[inline]
pub const fn same_shade(a: Square, b: Square) -> bool {
    (a / 8 + a % 8) % 2 == (b / 8 + b % 8) % 2
}

/// An origin/destination pair. The kind of move (castle, en passant,
/// promotion) is inferred from the board when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Score assigned by search; `None` on moves from plain legality queries.
    pub rating: Option<i32>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            rating: None,
        }
    }

    #[inline]
    pub const fn with_rating(self, rating: i32) -> Self {
        Self {
            rating: Some(rating),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_ignore_the_moved_flag() {
        let rook = SquareCode::piece(PieceKind::Rook, Color::Light).with_moved();
        assert!(rook.has_moved());
        assert!(rook.is_kind(PieceKind::Rook));
        assert!(rook.is_color(Color::Light));
        assert_eq!(rook.kind(), Some(PieceKind::Rook));
        assert_eq!(rook.color(), Some(Color::Light));
    }

    #[test]
    fn en_passant_marker_is_vacant_but_not_empty() {
        let marker = SquareCode::EnPassantTarget(Color::Dark);
        assert!(marker.is_vacant());
        assert!(!marker.is_empty());
        assert!(marker.is_en_passant_target());
        assert!(!marker.is_color(Color::Dark));
        assert!(!marker.is_enemy_of(Color::Light));
        assert_eq!(marker.kind(), None);
        assert_eq!(marker.color(), Some(Color::Dark));
        assert!(!marker.with_moved().has_moved());
    }

    #[test]
    fn square_geometry() {
        assert_eq!(square_at(4, 0), Some(4));
        assert_eq!(square_at(7, 7), Some(63));
        assert_eq!(square_at(8, 0), None);
        assert_eq!(square_at(0, -1), None);
        assert_eq!((file_of(28), rank_of(28)), (4, 3));
        // a1 and h8 are both dark squares, a1 and h1 differ.
        assert!(same_shade(0, 63));
        assert!(!same_shade(0, 7));
    }

    #[test]
    fn material_counter_values() {
        let total: i32 = PieceKind::ALL.iter().map(|k| k.material_value()).sum();
        assert_eq!(total, 1 + 3 + 3 + 5 + 9);
        assert!(!PieceKind::King.is_promotion_choice());
        assert!(!PieceKind::Pawn.is_promotion_choice());
    }
}
