//! Core traits and types for the Arbor game engine
//!
//! This crate provides the contract a board game must satisfy to be searched:
//! - `Game`: capability set for two-player, zero-sum, perfect-information games
//! - `InvalidMove`: error returned when an action is not legal in a position
//! - `game_utils`: helpers shared by the two-player board game implementations

pub mod game;
pub mod game_utils;

// Re-export main types for convenience
pub use game::{Game, InvalidMove, Player};
pub use game_utils::{opponent, outcome_reward, Winner};
