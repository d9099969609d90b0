//! Self-play demo: the minimax engine plays itself from a FEN.
//!
//! Usage:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --depth 3 --alpha-beta --plies 80`
//! `cargo run --release --bin self_play -- --fen "<FEN>" --seed 7`
//!
//! Set `RUST_LOG=debug` to see every applied move and search summary.

use tracing_subscriber::EnvFilter;

use mailbox_chess::engines::engine_minimax::MinimaxEngine;
use mailbox_chess::engines::engine_trait::Engine;
use mailbox_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use mailbox_chess::game_state::chess_types::Color;
use mailbox_chess::game_state::game_state::GameState;
use mailbox_chess::search::minimax::{SearchConfig, SearchStrategy};
use mailbox_chess::utils::self_play::{numbered_move_lines, play_self_play_game, SelfPlayConfig};

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T, String> {
    match arg_value(args, flag) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| format!("invalid value for {flag}: {value}")),
        None => Ok(default),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let fen = arg_value(&args, "--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
    let strategy = if args.iter().any(|a| a == "--alpha-beta") {
        SearchStrategy::AlphaBeta
    } else {
        SearchStrategy::Minimax
    };
    let search = SearchConfig {
        depth: parse_arg(&args, "--depth", 2u8)?,
        strategy,
    };
    let config = SelfPlayConfig {
        max_plies: parse_arg(&args, "--plies", 60u16)?,
        random_opening_plies: parse_arg(&args, "--opening", 2u8)?,
        seed: parse_arg(&args, "--seed", 0u64)?,
    };

    let mut light = MinimaxEngine::new(search);
    let mut dark = MinimaxEngine::new(search);
    println!(
        "{} (Light) vs {} (Dark), depth {} {:?}",
        light.name(),
        dark.name(),
        search.depth,
        search.strategy
    );

    let record = play_self_play_game(&mut light, &mut dark, &fen, &config)?;
    let start = GameState::from_fen(&fen)?;

    for line in numbered_move_lines(&start, &record.moves_lan) {
        println!("{line}");
    }

    println!("\nstarted from: {}", start.get_fen());
    println!("{}", record.final_state);
    println!("final FEN: {}", record.final_state.get_fen());
    println!("outcome:   {:?}", record.outcome);
    println!(
        "material:  Light {} / Dark {}",
        record.final_state.material(Color::Light),
        record.final_state.material(Color::Dark)
    );
    println!(
        "started {} | thinking: Light {:.3} ms, Dark {:.3} ms",
        record.started_at.to_rfc3339(),
        record.light_think.as_secs_f64() * 1000.0,
        record.dark_think.as_secs_f64() * 1000.0
    );
    Ok(())
}
