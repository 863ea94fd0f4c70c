//! Locating and reading the Arbor config file.
//!
//! A single optional TOML file feeds every Arbor binary. Missing keys take
//! the embedded defaults, and `ARBOR_<SECTION>_<KEY>` variables win over both.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ARBOR_CONFIG";

/// Relative locations tried when `ARBOR_CONFIG` is unset or points nowhere.
/// The parent entry covers `cargo run -p selfplay` from inside a crate directory.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// Load the search and selfplay settings for this process.
///
/// The file is the one named by `ARBOR_CONFIG` if it exists, else the first
/// entry of [`CONFIG_SEARCH_PATHS`] that exists. With no file at all the
/// embedded defaults are used. Env overrides apply in every case.
pub fn load_config() -> CentralConfig {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    match find_config_file(explicit.as_deref(), CONFIG_SEARCH_PATHS) {
        Some(path) => {
            info!(path = %path.display(), "Loading Arbor config");
            load_from_path(&path)
        }
        None => {
            debug!("No Arbor config file, using embedded defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Pick the config file to read: `explicit` when it exists, otherwise the
/// first existing `candidates` entry.
pub fn find_config_file(explicit: Option<&Path>, candidates: &[&str]) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        warn!(
            path = %path.display(),
            "{} points to a missing file, trying the default locations",
            CONFIG_ENV_VAR
        );
    }

    candidates
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
}

/// Read one config file and apply env overrides.
///
/// A file that cannot be read or parsed is reported and replaced by the
/// embedded defaults, so a typo never stops a match from starting.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));

    let config = parsed.unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "Unusable Arbor config, using embedded defaults");
        CentralConfig::default()
    });
    apply_env_overrides(config)
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f32, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: ARBOR_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "ARBOR_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(
        config,
        mcts.exploration_constant,
        "ARBOR_MCTS_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(
        config,
        mcts.num_simulations,
        "ARBOR_MCTS_NUM_SIMULATIONS",
        parse
    );
    env_override!(config, mcts.num_threads, "ARBOR_MCTS_NUM_THREADS", parse);
    env_override!(
        config,
        mcts.use_heuristic,
        "ARBOR_MCTS_USE_HEURISTIC",
        parse
    );
    env_override!(
        config,
        mcts.use_move_ordering,
        "ARBOR_MCTS_USE_MOVE_ORDERING",
        parse
    );
    env_override!(
        config,
        mcts.max_rollout_depth,
        "ARBOR_MCTS_MAX_ROLLOUT_DEPTH",
        parse
    );

    // Selfplay
    env_override!(config, selfplay.game, "ARBOR_SELFPLAY_GAME");
    env_override!(config, selfplay.games, "ARBOR_SELFPLAY_GAMES", parse);
    env_override!(config, selfplay.seed, "ARBOR_SELFPLAY_SEED", parse);

    config
}
