//! Crate root module declarations for the mailbox chess rules engine.
//!
//! This file exposes the rules core (square encoding, game state, move
//! generation, terminal detection), the evaluation and search layer, the
//! engine wrappers used for automated opponents, and the text utilities
//! (FEN, algebraic squares, long algebraic moves, board rendering).

pub mod chess_errors;

pub mod game_state {
    pub mod board_manager;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod terminal_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_shared;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod self_play;
}
