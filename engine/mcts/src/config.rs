//! MCTS configuration parameters.

use std::num::NonZeroUsize;
use std::thread;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant `C` in the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    /// `sqrt(2)` is the textbook choice; 1.41 is the default.
    pub exploration_constant: f32,

    /// Number of simulations to run per search.
    /// In parallel mode every worker runs `num_simulations / num_threads`
    /// (at least one) and the remainder is dropped.
    pub num_simulations: u32,

    /// Number of worker threads sharing the tree. 0 or 1 runs the search
    /// on the calling thread.
    pub num_threads: usize,

    /// Score rollouts with [`Game::evaluate`](engine_core::Game::evaluate)
    /// instead of the terminal reward.
    pub use_heuristic: bool,

    /// Prefer immediately winning moves during rollouts.
    pub use_move_ordering: bool,

    /// Stop a rollout after this many plies and score the position as-is.
    pub max_rollout_depth: Option<u32>,

    /// Root seed for the per-worker random generators.
    /// `None` draws a fresh seed from entropy on every search.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.41,
            num_simulations: 1000,
            num_threads: available_threads(),
            use_heuristic: false,
            use_move_ordering: false,
            max_rollout_depth: None,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 200,
            num_threads: 1,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Worker count actually used by the search (never zero).
    #[inline]
    pub fn effective_threads(&self) -> usize {
        self.num_threads.max(1)
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, c: f32) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set number of worker threads.
    pub fn with_threads(mut self, n: usize) -> Self {
        self.num_threads = n;
        self
    }

    /// Builder pattern: toggle heuristic rollout scoring.
    pub fn with_heuristic(mut self, enabled: bool) -> Self {
        self.use_heuristic = enabled;
        self
    }

    /// Builder pattern: toggle winning-move ordering in rollouts.
    pub fn with_move_ordering(mut self, enabled: bool) -> Self {
        self.use_move_ordering = enabled;
        self
    }

    /// Builder pattern: set rollout depth cut-off.
    pub fn with_max_rollout_depth(mut self, depth: Option<u32>) -> Self {
        self.max_rollout_depth = depth;
        self
    }

    /// Builder pattern: set root seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Hardware concurrency, or 1 when it cannot be queried.
pub fn available_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
