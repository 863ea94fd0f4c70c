//! Configuration for the selfplay match runner
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_game() -> String {
    CENTRAL_CONFIG.selfplay.game.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.selfplay.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.selfplay.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}

fn default_exploration_constant() -> f32 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_num_threads() -> usize {
    CENTRAL_CONFIG.mcts.num_threads
}

fn default_use_heuristic() -> bool {
    CENTRAL_CONFIG.mcts.use_heuristic
}

fn default_use_move_ordering() -> bool {
    CENTRAL_CONFIG.mcts.use_move_ordering
}

fn default_max_rollout_depth() -> u32 {
    CENTRAL_CONFIG.mcts.max_rollout_depth
}

/// Games the runner knows how to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    TicTacToe,
    Connect4,
}

impl FromStr for GameKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tictactoe" | "tic-tac-toe" => Ok(Self::TicTacToe),
            "connect4" | "connect-four" => Ok(Self::Connect4),
            other => Err(anyhow!(
                "unknown game '{}', expected one of tictactoe, connect4",
                other
            )),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "selfplay")]
#[command(about = "Arbor selfplay - pits two MCTS configurations against each other")]
#[command(
    long_about = "Plays a match between a baseline MCTS engine and a challenger that \
differs from it only in the options given with --challenger-*. Seats alternate \
every game and the tally is logged at the end.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Game to play (tictactoe, connect4)
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Number of games in the match
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Base seed for both engines (0 = seed from entropy)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Number of MCTS simulations per move
    #[arg(long, default_value_t = default_num_simulations())]
    pub num_simulations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration_constant())]
    pub exploration_constant: f32,

    /// Worker threads per search (0 = available parallelism)
    #[arg(long, default_value_t = default_num_threads())]
    pub num_threads: usize,

    /// Score rollouts with the game's static evaluation
    #[arg(long, default_value_t = default_use_heuristic(), action = clap::ArgAction::Set)]
    pub use_heuristic: bool,

    /// Prefer immediately winning moves in rollouts
    #[arg(long, default_value_t = default_use_move_ordering(), action = clap::ArgAction::Set)]
    pub use_move_ordering: bool,

    /// Cut rollouts after this many plies (0 = play to the end)
    #[arg(long, default_value_t = default_max_rollout_depth())]
    pub max_rollout_depth: u32,

    /// Challenger: simulations per move (defaults to the baseline value)
    #[arg(long)]
    pub challenger_simulations: Option<u32>,

    /// Challenger: UCB1 exploration constant
    #[arg(long)]
    pub challenger_exploration_constant: Option<f32>,

    /// Challenger: heuristic rollout scoring
    #[arg(long)]
    pub challenger_heuristic: Option<bool>,

    /// Challenger: winning-move ordering in rollouts
    #[arg(long)]
    pub challenger_move_ordering: Option<bool>,

    /// Challenger: rollout depth cut-off (0 = play to the end)
    #[arg(long)]
    pub challenger_max_rollout_depth: Option<u32>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.game_kind()?;

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.num_simulations == 0 || self.challenger_simulations == Some(0) {
            return Err(anyhow!("num_simulations must be greater than 0"));
        }

        let constants = [Some(self.exploration_constant), self.challenger_exploration_constant];
        if constants
            .into_iter()
            .flatten()
            .any(|c| !c.is_finite() || c < 0.0)
        {
            return Err(anyhow!(
                "exploration_constant must be a finite, non-negative number"
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn game_kind(&self) -> Result<GameKind> {
        self.game.parse()
    }

    /// Search settings of the baseline engine.
    pub fn baseline(&self) -> MctsConfig {
        let threads = match self.num_threads {
            0 => mcts::config::available_threads(),
            n => n,
        };
        MctsConfig::default()
            .with_simulations(self.num_simulations)
            .with_exploration_constant(self.exploration_constant)
            .with_threads(threads)
            .with_heuristic(self.use_heuristic)
            .with_move_ordering(self.use_move_ordering)
            .with_max_rollout_depth(depth_limit(self.max_rollout_depth))
    }

    /// Search settings of the challenger: the baseline plus any overrides.
    pub fn challenger(&self) -> MctsConfig {
        let base = self.baseline();
        MctsConfig {
            num_simulations: self.challenger_simulations.unwrap_or(base.num_simulations),
            exploration_constant: self
                .challenger_exploration_constant
                .unwrap_or(base.exploration_constant),
            use_heuristic: self.challenger_heuristic.unwrap_or(base.use_heuristic),
            use_move_ordering: self
                .challenger_move_ordering
                .unwrap_or(base.use_move_ordering),
            max_rollout_depth: self
                .challenger_max_rollout_depth
                .map_or(base.max_rollout_depth, depth_limit),
            ..base
        }
    }

    /// Root seed for one engine in one game, or None to seed from entropy.
    pub fn game_seed(&self, game_index: u32, seat: u64) -> Option<u64> {
        (self.seed != 0).then(|| {
            self.seed
                .wrapping_add(u64::from(game_index).wrapping_mul(1_000_003))
                .wrapping_add(seat)
        })
    }
}

fn depth_limit(depth: u32) -> Option<u32> {
    (depth > 0).then_some(depth)
}
