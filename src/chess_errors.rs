//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by the codec, the board
//! state manager and the search layer. Every variant describes a recoverable
//! condition: a rejected position load, a rejected move, or a search request
//! on a finished game. A rejected call never leaves the board half-mutated.
//!
//! Corrupted boards (for example a missing king) are not represented here.
//! Every board this crate produces keeps exactly one king per color, so such
//! a state indicates a bug and is guarded with debug assertions instead.

use crate::game_state::chess_types::{Color, PieceKind, Square};

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// Structurally malformed FEN: wrong number of ranks, a rank that does
    /// not sum to eight files, or an unreadable metadata field.
    #[error("invalid FEN format: {0}")]
    InvalidFormat(String),

    /// A character in a rank field that is neither a piece letter nor a digit.
    #[error("invalid character '{0}' in FEN board layout")]
    InvalidCharacter(char),

    /// A color does not have exactly one king.
    #[error("{color:?} has {kings} kings, expected exactly one")]
    InvalidPieceCount { color: Color, kings: usize },

    /// Text that does not name a square (`a1`..`h8`).
    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),

    /// Move text that is not long algebraic notation (`e2e4`, `e7e8q`).
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    #[error("no piece on origin square {0}")]
    NoPieceAtOrigin(Square),

    #[error("piece on square {square} belongs to {color:?}, who is not to move")]
    NotYourTurn { square: Square, color: Color },

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// The pawn on this square is waiting for its promotion piece.
    #[error("promotion on square {0} must be resolved first")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("cannot promote to {0:?}")]
    InvalidPromotionChoice(PieceKind),

    /// A best move was requested for a side that has no legal moves.
    #[error("{0:?} has no legal moves")]
    NoLegalMoves(Color),
}
