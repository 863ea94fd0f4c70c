//! The `Game` trait consumed by the search engine
//!
//! Any two-player, zero-sum, perfect-information, turn-based game can be
//! searched once it implements this trait. The search never inspects a game's
//! internals: it clones positions, lists and applies actions, and reads
//! rewards.

use std::fmt;

/// Player identifier. Two-player games use 1 and 2.
pub type Player = u8;

/// Main trait for game implementations
///
/// A value of the implementing type *is* a position. The search keeps one
/// clone per tree node and never mutates it after construction, so further
/// exploration always happens on fresh clones.
///
/// # Example
///
/// ```rust
/// use engine_core::{Game, InvalidMove, Player};
///
/// /// Players alternately take 1 or 2 stones; whoever takes the last one wins.
/// #[derive(Debug, Clone, PartialEq)]
/// struct Nim {
///     stones: u8,
///     to_move: Player,
/// }
///
/// impl Game for Nim {
///     type Action = u8;
///
///     fn is_terminal(&self) -> bool {
///         self.stones == 0
///     }
///
///     fn legal_actions(&self) -> Vec<u8> {
///         (1..=self.stones.min(2)).collect()
///     }
///
///     fn apply_action(&mut self, take: u8) -> Result<(), InvalidMove> {
///         if take == 0 || take > self.stones.min(2) {
///             return Err(InvalidMove::OutOfBounds(take));
///         }
///         self.stones -= take;
///         self.to_move = 3 - self.to_move;
///         Ok(())
///     }
///
///     fn reward(&self, player: Player) -> f32 {
///         // The player who took the last stone is no longer to move.
///         if self.is_terminal() && player != self.to_move { 1.0 } else { -1.0 }
///     }
///
///     fn current_player(&self) -> Player {
///         self.to_move
///     }
/// }
///
/// let mut game = Nim { stones: 3, to_move: 1 };
/// game.apply_action(2).unwrap();
/// assert_eq!(game.legal_actions(), vec![1]);
/// ```
pub trait Game: Clone + Send + Sync + fmt::Debug + 'static {
    /// Action type - small and `Copy`, compared by value
    type Action: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Whether the game is over (win or draw)
    fn is_terminal(&self) -> bool;

    /// Legal actions in this position
    ///
    /// Must be non-empty unless the position is terminal. The order is
    /// significant: the search expands untried actions from the back.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply an action in place
    ///
    /// Fails with [`InvalidMove`] and leaves the position unchanged when the
    /// action is not legal.
    fn apply_action(&mut self, action: Self::Action) -> Result<(), InvalidMove>;

    /// Reward for `player` in this position
    ///
    /// * `1.0` if `player` has won
    /// * `-1.0` if `player` has lost, or the game is not over yet
    /// * `0.0` for a draw
    fn reward(&self, player: Player) -> f32;

    /// Player whose turn it is
    fn current_player(&self) -> Player;

    /// Static evaluation of the position for `player`, in `[-1.0, 1.0]`
    ///
    /// Used to score rollouts when heuristic evaluation is enabled, including
    /// rollouts cut off before the game ends. Defaults to [`Game::reward`].
    fn evaluate(&self, player: Player) -> f32 {
        self.reward(player)
    }

    /// Cheap check whether `action` wins on the spot for the player to move
    ///
    /// Only used to order rollout candidates. Defaults to `false`.
    fn is_winning_move(&self, _action: Self::Action) -> bool {
        false
    }

    /// Human-readable game name for logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Error returned by [`Game::apply_action`] for an illegal action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("Invalid move: action {0} is out of bounds")]
    OutOfBounds(u8),
    #[error("Invalid move: position {0} is already taken")]
    Occupied(u8),
    #[error("Invalid move: column {0} is full")]
    ColumnFull(u8),
    #[error("Invalid move: the game is already over")]
    GameOver,
}
