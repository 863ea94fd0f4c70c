//! Selfplay - match runner for the Arbor search engine
//!
//! A short-lived process that:
//! 1. Loads search settings from config.toml, env vars and the command line
//! 2. Builds a baseline engine and a challenger with optional overrides
//! 3. Plays the configured number of games with alternating seats
//! 4. Logs per-game results and the final tally

use anyhow::Result;
use clap::Parser;
use games_connect4::Connect4;
use games_tictactoe::TicTacToe;
use tracing::{error, info};

mod arena;
mod config;
mod stats;

use crate::arena::Arena;
use crate::config::{Config, GameKind};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let baseline = config.baseline();
    let challenger = config.challenger();
    info!(?baseline, "Baseline engine");
    info!(?challenger, "Challenger engine");

    let mut arena = Arena::new(baseline, challenger);
    let seed_for = |index, seat| config.game_seed(index, seat);

    let stats = match config.game_kind()? {
        GameKind::TicTacToe => arena.run_match(&TicTacToe::new(), config.games, seed_for)?,
        GameKind::Connect4 => arena.run_match(&Connect4::new(), config.games, seed_for)?,
    };

    stats.log_summary();
    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(
        game = %config.game,
        games = config.games,
        log_level = %config.log_level,
        "Selfplay starting"
    );

    match run(&config) {
        Ok(()) => {
            info!("Selfplay completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Selfplay failed: {:#}", e);
            Err(e)
        }
    }
}
