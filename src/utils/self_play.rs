//! Engine-vs-engine self-play without any UI.
//!
//! Plays two `Engine` implementations against each other from a FEN, with an
//! optional seeded random opening prefix, until the game ends or the ply cap
//! is reached. Engine thinking time is measured with a monotonic clock; the
//! wall-clock start of the game is kept for the record.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::game_state::terminal_state::TerminalState;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub max_plies: u16,
    /// Plies played by a seeded random mover before the engines take over.
    pub random_opening_plies: u8,
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            random_opening_plies: 0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfPlayOutcome {
    Finished(TerminalState),
    PlyLimit,
}

#[derive(Debug, Clone)]
pub struct SelfPlayRecord {
    pub final_state: GameState,
    pub outcome: SelfPlayOutcome,
    pub moves_lan: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub light_think: Duration,
    pub dark_think: Duration,
}

/// Play one game. Engine moves are applied through `GameState::apply_move`,
/// so an engine proposing an illegal move ends the game with an error.
pub fn play_self_play_game(
    light: &mut dyn Engine,
    dark: &mut dyn Engine,
    start_fen: &str,
    config: &SelfPlayConfig,
) -> ChessResult<SelfPlayRecord> {
    let mut state = GameState::from_fen(start_fen)?;
    let started_at = Utc::now();
    light.new_game();
    dark.new_game();

    let mut opener = RandomEngine::with_seed(config.seed);
    let mut moves_lan = Vec::<String>::new();
    let mut think = [Duration::ZERO; 2];

    for ply in 0..config.max_plies {
        let terminal = state.terminal_state();
        if terminal.is_terminal() {
            let outcome = SelfPlayOutcome::Finished(terminal);
            return Ok(finish(state, outcome, moves_lan, started_at, think));
        }

        let mover = state.side_to_move;
        let chosen = if ply < u16::from(config.random_opening_plies) {
            opener.choose_move(&state)?
        } else {
            let thinking_since = Instant::now();
            let chosen = match mover {
                Color::Light => light.choose_move(&state)?,
                Color::Dark => dark.choose_move(&state)?,
            };
            think[mover.index()] += thinking_since.elapsed();
            chosen
        };

        let mv = chosen.ok_or(ChessError::NoLegalMoves(mover))?;
        let outcome = state.apply_move(mv.from, mv.to, Some(PieceKind::Queen))?;
        let lan = move_to_long_algebraic(mv, outcome.promoted_to)?;
        debug!(ply, ?mover, mv = %lan, rating = ?mv.rating, "self-play move");
        moves_lan.push(lan);
    }

    let outcome = match state.terminal_state() {
        TerminalState::Ongoing => SelfPlayOutcome::PlyLimit,
        terminal => SelfPlayOutcome::Finished(terminal),
    };
    Ok(finish(state, outcome, moves_lan, started_at, think))
}

fn finish(
    final_state: GameState,
    outcome: SelfPlayOutcome,
    moves_lan: Vec<String>,
    started_at: DateTime<Utc>,
    think: [Duration; 2],
) -> SelfPlayRecord {
    info!(
        ?outcome,
        plies = moves_lan.len(),
        light_think_us = think[Color::Light.index()].as_micros() as u64,
        dark_think_us = think[Color::Dark.index()].as_micros() as u64,
        fen = %final_state.get_fen(),
        "self-play game finished"
    );
    SelfPlayRecord {
        final_state,
        outcome,
        moves_lan,
        started_at,
        light_think: think[Color::Light.index()],
        dark_think: think[Color::Dark.index()],
    }
}

/// Move list lines in the usual `12. e2e4 e7e5` form, numbered from the
/// start position's fullmove counter. A game that starts with Dark to move
/// opens with `12. ... e7e5`.
pub fn numbered_move_lines(start: &GameState, moves_lan: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(moves_lan.len() / 2 + 1);
    let mut number = start.fullmove_number;
    let mut side = start.side_to_move;
    let mut pending: Option<String> = None;

    for lan in moves_lan {
        match side {
            Color::Light => pending = Some(format!("{number:>3}. {lan}")),
            Color::Dark => {
                let opening = pending.take().unwrap_or_else(|| format!("{number:>3}. ..."));
                lines.push(format!("{opening} {lan}"));
                number = number.saturating_add(1);
            }
        }
        side = side.opposite();
    }
    lines.extend(pending);
    lines
}
