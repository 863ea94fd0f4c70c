//! MCTS tree node representation.
//!
//! Each node owns the game state reached by taking an action from the parent,
//! plus visit statistics behind a per-node lock. Children are shared through
//! `Arc` so workers can hold a node while other threads grow the tree; the
//! parent link is a `Weak` handle used only to walk back up to the root.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use engine_core::Game;

/// A node in the MCTS tree.
pub struct Node<G: Game> {
    /// Game position at this node. Never mutated after construction.
    state: G,

    /// Action that led to this node from parent (None for root)
    parent_action: Option<G::Action>,

    /// Non-owning link to the parent (dangling for root)
    parent: Weak<Node<G>>,

    /// Mutable statistics, one lock per node
    stats: Mutex<NodeStats<G>>,
}

/// Statistics guarded by a node's lock.
pub struct NodeStats<G: Game> {
    /// Number of times this node has been visited
    pub visits: u32,

    /// Sum of rewards backpropagated through this node.
    /// Q = total_reward / visits
    pub total_reward: f32,

    /// Legal actions not yet expanded. Consumed from the back.
    pub untried_actions: Vec<G::Action>,

    /// Expanded children in insertion order
    pub children: Vec<Arc<Node<G>>>,
}

impl<G: Game> Node<G> {
    /// Create a new root node holding a copy of `state`.
    pub fn new_root(state: &G) -> Arc<Self> {
        Arc::new(Self::with_parent(state.clone(), None, Weak::new()))
    }

    /// Create a new child node reached from `parent` by `action`.
    ///
    /// The child is not attached; the caller pushes it into the parent's
    /// children while holding the parent lock.
    pub fn new_child(state: G, action: G::Action, parent: &Arc<Node<G>>) -> Arc<Self> {
        Arc::new(Self::with_parent(state, Some(action), Arc::downgrade(parent)))
    }

    fn with_parent(state: G, parent_action: Option<G::Action>, parent: Weak<Node<G>>) -> Self {
        let untried_actions = state.legal_actions();
        Self {
            state,
            parent_action,
            parent,
            stats: Mutex::new(NodeStats {
                visits: 0,
                total_reward: 0.0,
                untried_actions,
                children: Vec::new(),
            }),
        }
    }

    /// Game position at this node.
    #[inline]
    pub fn state(&self) -> &G {
        &self.state
    }

    /// Action that produced this node.
    #[inline]
    pub fn parent_action(&self) -> Option<G::Action> {
        self.parent_action
    }

    /// Parent node, if this is not the root and the tree is still alive.
    #[inline]
    pub fn parent(&self) -> Option<Arc<Node<G>>> {
        self.parent.upgrade()
    }

    /// Lock this node's statistics.
    ///
    /// Every critical section leaves the statistics consistent, so a lock
    /// poisoned by a panicking worker is still safe to use.
    pub fn lock(&self) -> MutexGuard<'_, NodeStats<G>> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the visit count.
    pub fn visits(&self) -> u32 {
        self.lock().visits
    }

    /// Snapshot of the mean reward.
    pub fn mean_value(&self) -> f32 {
        self.lock().mean_value()
    }

    /// Snapshot of the children list.
    pub fn children(&self) -> Vec<Arc<Node<G>>> {
        self.lock().children.clone()
    }
}

impl<G: Game> NodeStats<G> {
    /// Calculate mean value Q = total_reward / visits.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f32
        }
    }

    /// Calculate the UCB1 score for child selection.
    /// UCB1 = Q + c * sqrt(ln(N_parent) / N)
    ///
    /// Takes pre-computed ln(parent_visits) so the logarithm is computed once
    /// per selection step. Unvisited nodes score +inf.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f32, exploration: f32) -> f32 {
        if self.visits == 0 {
            return f32::INFINITY;
        }
        let n = self.visits as f32;
        self.mean_value() + exploration * (parent_visits_ln / n).sqrt()
    }

    /// Whether all legal actions have been expanded.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }
}

impl<G: Game> fmt::Debug for Node<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.lock();
        f.debug_struct("Node")
            .field("parent_action", &self.parent_action)
            .field("visits", &stats.visits)
            .field("total_reward", &stats.total_reward)
            .field("untried_actions", &stats.untried_actions)
            .field("children", &stats.children.len())
            .finish()
    }
}
