//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the documented defaults file and the binary can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    selfplay: SelfplayDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration_constant: f32,
    num_simulations: u32,
    num_threads: usize,
    use_heuristic: bool,
    use_move_ordering: bool,
    max_rollout_depth: u32,
}

#[derive(Debug, Deserialize)]
struct SelfplayDefaults {
    game: String,
    games: u32,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn exploration_constant() -> f32 {
    DEFAULTS.mcts.exploration_constant
}
pub fn num_simulations() -> u32 {
    DEFAULTS.mcts.num_simulations
}
pub fn num_threads() -> usize {
    DEFAULTS.mcts.num_threads
}
pub fn use_heuristic() -> bool {
    DEFAULTS.mcts.use_heuristic
}
pub fn use_move_ordering() -> bool {
    DEFAULTS.mcts.use_move_ordering
}
pub fn max_rollout_depth() -> u32 {
    DEFAULTS.mcts.max_rollout_depth
}

// Selfplay
pub fn game() -> &'static str {
    &DEFAULTS.selfplay.game
}
pub fn games() -> u32 {
    DEFAULTS.selfplay.games
}
pub fn seed() -> u64 {
    DEFAULTS.selfplay.seed
}
