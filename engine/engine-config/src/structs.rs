//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_exploration_constant() -> f32 {
    defaults::exploration_constant()
}
fn d_num_simulations() -> u32 {
    defaults::num_simulations()
}
fn d_num_threads() -> usize {
    defaults::num_threads()
}
fn d_use_heuristic() -> bool {
    defaults::use_heuristic()
}
fn d_use_move_ordering() -> bool {
    defaults::use_move_ordering()
}
fn d_max_rollout_depth() -> u32 {
    defaults::max_rollout_depth()
}
fn d_game() -> String {
    defaults::game().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_seed() -> u64 {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsSettings,
    #[serde(default)]
    pub selfplay: SelfplayConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search engine settings
///
/// Zero stands for "automatic" in the numeric knobs that have one:
/// `num_threads = 0` uses the available hardware parallelism and
/// `max_rollout_depth = 0` plays rollouts to the end of the game.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MctsSettings {
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f32,
    #[serde(default = "d_num_simulations")]
    pub num_simulations: u32,
    #[serde(default = "d_num_threads")]
    pub num_threads: usize,
    #[serde(default = "d_use_heuristic")]
    pub use_heuristic: bool,
    #[serde(default = "d_use_move_ordering")]
    pub use_move_ordering: bool,
    #[serde(default = "d_max_rollout_depth")]
    pub max_rollout_depth: u32,
}

impl Default for MctsSettings {
    fn default() -> Self {
        Self {
            exploration_constant: defaults::exploration_constant(),
            num_simulations: defaults::num_simulations(),
            num_threads: defaults::num_threads(),
            use_heuristic: defaults::use_heuristic(),
            use_move_ordering: defaults::use_move_ordering(),
            max_rollout_depth: defaults::max_rollout_depth(),
        }
    }
}

/// Selfplay match configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SelfplayConfig {
    /// Game to play: "tictactoe" or "connect4"
    #[serde(default = "d_game")]
    pub game: String,
    /// Number of games in the match
    #[serde(default = "d_games")]
    pub games: u32,
    /// Base seed for the engines (0 = from entropy)
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            game: defaults::game().into(),
            games: defaults::games(),
            seed: defaults::seed(),
        }
    }
}
