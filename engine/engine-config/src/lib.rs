//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across all Rust components (search engine settings, selfplay).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`ARBOR_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! ARBOR_<SECTION>_<KEY>=value
//!
//! Examples:
//!     ARBOR_COMMON_LOG_LEVEL=debug
//!     ARBOR_MCTS_NUM_SIMULATIONS=5000
//!     ARBOR_MCTS_NUM_THREADS=4
//!     ARBOR_SELFPLAY_GAME=connect4
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, find_config_file, load_config, load_from_path, CONFIG_ENV_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;
