//! Shared utilities for two-player game implementations
//!
//! This module provides common functionality used across multiple game implementations
//! to reduce code duplication and ensure consistent behavior.

use crate::game::Player;

/// Outcome of a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winner {
    /// Game still in progress
    #[default]
    Ongoing,
    /// The given player completed a line
    Player(Player),
    /// Board full, nobody won
    Draw,
}

impl Winner {
    /// Whether the game has ended, by a win or a draw
    #[inline]
    pub fn is_decided(self) -> bool {
        self != Winner::Ongoing
    }
}

/// The other player of a two-player game (1 <-> 2).
///
/// # Example
/// ```
/// use engine_core::game_utils::opponent;
///
/// assert_eq!(opponent(1), 2);
/// assert_eq!(opponent(2), 1);
/// ```
#[inline]
pub fn opponent(player: Player) -> Player {
    if player == 1 {
        2
    } else {
        1
    }
}

/// Reward for `player` given the game outcome.
///
/// # Returns
/// * `1.0` if `player` won
/// * `-1.0` if `player` lost, or the game is still ongoing
/// * `0.0` for a draw
///
/// # Example
/// ```
/// use engine_core::game_utils::{outcome_reward, Winner};
///
/// // Player 1 wins, viewed from player 1's perspective
/// assert_eq!(outcome_reward(Winner::Player(1), 1), 1.0);
///
/// // Player 1 wins, viewed from player 2's perspective
/// assert_eq!(outcome_reward(Winner::Player(1), 2), -1.0);
///
/// // Draw
/// assert_eq!(outcome_reward(Winner::Draw, 1), 0.0);
///
/// // Game ongoing counts as a loss for everyone
/// assert_eq!(outcome_reward(Winner::Ongoing, 1), -1.0);
/// ```
#[inline]
pub fn outcome_reward(winner: Winner, player: Player) -> f32 {
    match winner {
        Winner::Player(p) if p == player => 1.0,
        Winner::Player(_) => -1.0,
        Winner::Draw => 0.0,
        Winner::Ongoing => -1.0,
    }
}
