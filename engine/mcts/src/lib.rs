//! Monte Carlo Tree Search (MCTS) with random rollouts.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` Game trait.
//!
//! # Overview
//!
//! MCTS is a search algorithm that builds a search tree by running simulations.
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCB1 (Upper Confidence Bound) to
//!    balance exploration and exploitation
//! 2. **Expansion**: When reaching a node with untried actions, add one child
//! 3. **Simulation**: Play random moves from the new child until the game ends
//!    (optionally preferring winning moves, or stopping at a depth limit)
//! 4. **Backpropagation**: Update visit counts and reward sums along the
//!    path from the new child to the root
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::TicTacToe;
//! use mcts::{Mcts, MctsConfig};
//!
//! let mut game = TicTacToe::new();
//! for m in [0, 1, 3, 2] {
//!     game.apply_action(m).unwrap();
//! }
//!
//! let config = MctsConfig::default()
//!     .with_simulations(1000)
//!     .with_threads(1)
//!     .with_seed(Some(1));
//! let mcts = Mcts::new(config);
//! let action = mcts.select_action(&game);
//! assert_eq!(action, Some(6));
//!
//! // No game, no move
//! assert_eq!(mcts.select_action(None::<&TicTacToe>), None);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per search (default: 1000)
//! - `exploration_constant`: UCB1 exploration weight (default: 1.41)
//! - `num_threads`: Workers sharing the tree (default: available parallelism)
//! - `use_heuristic` / `use_move_ordering` / `max_rollout_depth`: rollout tuning
//! - `seed`: Fixed root seed for reproducible single-threaded searches
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                           Mcts                             │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌───────────────────┐   │
//! │  │ SearchTree  │  │ WorkerPool  │  │  RolloutPolicy    │   │
//! │  │ (Arc nodes) │  │  (rayon)    │  │ (random play-out) │   │
//! │  └──────┬──────┘  └──────┬──────┘  └─────────┬─────────┘   │
//! │         │                │                   │             │
//! │         ▼                ▼                   ▼             │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │        select → expand → simulate → backpropagate   │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod agent;
pub mod config;
pub mod node;
pub mod parallel;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use agent::Mcts;
pub use config::MctsConfig;
pub use node::{Node, NodeStats};
pub use parallel::WorkerPool;
pub use rollout::RolloutPolicy;
pub use search::{MctsSearch, SearchError, SearchResult};
pub use tree::{ChildStats, SearchTree, TreeStats};
