//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse tree using UCB1 to find a frontier node
//! 2. Expansion: Add one child for the last untried action
//! 3. Simulation: Play out a copy of the new child's state
//! 4. Backpropagation: Update statistics along the path to the root
//!
//! An [`MctsSearch`] only borrows the tree, so any number of threads can run
//! iterations against the same tree at once.

use std::sync::Arc;
use std::time::Duration;

use engine_core::{Game, Player};
use rand::Rng;
use thiserror::Error;
use tracing::{trace, warn};

use crate::config::MctsConfig;
use crate::node::Node;
use crate::rollout::RolloutPolicy;
use crate::tree::{ChildStats, SearchTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game is already over")]
    GameOver,

    #[error("No legal actions available")]
    NoLegalActions,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action to take
    pub action: A,

    /// Number of simulations performed
    pub simulations: u32,

    /// Visit count of the root after the search
    pub root_visits: u32,

    /// Mean reward at root, from the perspective of the player to move
    pub root_value: f32,

    /// Statistics of every expanded root child, in expansion order
    pub children: Vec<ChildStats<A>>,

    /// Shape of the final tree
    pub tree: TreeStats,

    /// Wall-clock search time
    pub elapsed: Duration,
}

/// One search over a shared tree.
///
/// Rewards are always scored for the player to move at the root, so every
/// node's mean value reads from that player's point of view.
pub struct MctsSearch<'a, G: Game> {
    tree: &'a SearchTree<G>,
    exploration: f32,
    policy: RolloutPolicy,
    perspective: Player,
}

impl<'a, G: Game> MctsSearch<'a, G> {
    /// Create a new MCTS search over `tree`.
    pub fn new(tree: &'a SearchTree<G>, config: &MctsConfig) -> Self {
        Self {
            tree,
            exploration: config.exploration_constant,
            policy: RolloutPolicy::from_config(config),
            perspective: tree.root().state().current_player(),
        }
    }

    /// Get a reference to the tree.
    pub fn tree(&self) -> &SearchTree<G> {
        self.tree
    }

    /// Run `iterations` simulations with the given generator.
    pub fn run<R: Rng>(&self, iterations: u32, rng: &mut R) {
        for _ in 0..iterations {
            self.simulate(rng);
        }
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    pub fn simulate<R: Rng>(&self, rng: &mut R) {
        let leaf = self.select();
        let node = self.expand(&leaf);
        let reward = self.policy.rollout(node.state(), self.perspective, rng);
        trace!(action = ?node.parent_action(), reward, "Simulation finished");
        SearchTree::backpropagate(&node, reward);
    }

    /// Traverse from the root to the node where selection stops.
    pub fn select(&self) -> Arc<Node<G>> {
        let mut current = Arc::clone(self.tree.root());
        while let Some(child) = SearchTree::select_child(&current, self.exploration) {
            current = child;
        }
        current
    }

    /// Expand a frontier node by one child, or return it unchanged.
    ///
    /// The untried action is popped and the child attached under the node's
    /// lock, so concurrent expansions of one node never take the same action.
    pub fn expand(&self, node: &Arc<Node<G>>) -> Arc<Node<G>> {
        if node.state().is_terminal() {
            return Arc::clone(node);
        }

        let mut stats = node.lock();
        let Some(action) = stats.untried_actions.pop() else {
            return Arc::clone(node);
        };

        let mut state = node.state().clone();
        if let Err(err) = state.apply_action(action) {
            warn!(game = state.name(), %action, %err, "Expansion skipped illegal action");
            return Arc::clone(node);
        }

        let child = Node::new_child(state, action, node);
        stats.children.push(Arc::clone(&child));
        child
    }
}
