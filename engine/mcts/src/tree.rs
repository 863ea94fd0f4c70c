//! MCTS tree structure with shared, individually locked nodes.
//!
//! The tree owns the root; every node owns its children. Workers walk the
//! tree concurrently and only ever hold locks top-down (a parent, then its
//! children) during selection, or one node at a time everywhere else.

use std::sync::Arc;

use engine_core::Game;

use crate::node::Node;

/// MCTS tree rooted at a copy of the searched position.
#[derive(Debug)]
pub struct SearchTree<G: Game> {
    root: Arc<Node<G>>,
}

/// Visit statistics for one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<A> {
    pub action: A,
    pub visits: u32,
    pub mean_value: f32,
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f32,
    pub max_depth: u32,
}

impl<G: Game> SearchTree<G> {
    /// Create a new tree whose root holds a clone of `state`.
    pub fn new(state: &G) -> Self {
        Self {
            root: Node::new_root(state),
        }
    }

    /// Get the root node.
    #[inline]
    pub fn root(&self) -> &Arc<Node<G>> {
        &self.root
    }

    /// Pick the child to descend into, or `None` when selection stops here.
    ///
    /// Selection stops at a node that still has untried actions or has no
    /// children. A node with no visits descends into its first child. Any
    /// unvisited child is taken immediately; otherwise the highest UCB1 score
    /// wins and ties go to the earliest child.
    pub fn select_child(node: &Node<G>, exploration: f32) -> Option<Arc<Node<G>>> {
        let stats = node.lock();
        if !stats.untried_actions.is_empty() {
            return None;
        }
        let first = stats.children.first()?;
        if stats.visits == 0 {
            return Some(Arc::clone(first));
        }

        let parent_visits_ln = (stats.visits as f32).ln();
        let mut best: Option<(&Arc<Node<G>>, f32)> = None;
        for child in &stats.children {
            let score = child.lock().ucb_score(parent_visits_ln, exploration);
            if score == f32::INFINITY {
                return Some(Arc::clone(child));
            }
            // Strict comparison keeps the earliest child on ties
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child, score));
            }
        }

        best.map(|(child, _)| Arc::clone(child))
    }

    /// Backpropagate a reward from a node to the root.
    ///
    /// Every node on the path receives the same reward: all values are kept
    /// from the perspective of the player to move at the root.
    pub fn backpropagate(leaf: &Arc<Node<G>>, reward: f32) {
        let mut current = Some(Arc::clone(leaf));
        while let Some(node) = current {
            {
                let mut stats = node.lock();
                stats.visits += 1;
                stats.total_reward += reward;
            }
            current = node.parent();
        }
    }

    /// Get the best action from root based on mean value.
    /// Only visited children are considered; ties go to the earliest child.
    /// Returns None if no root child has been visited.
    pub fn best_action(&self) -> Option<G::Action> {
        let mut best: Option<(G::Action, f32)> = None;
        for child in self.child_stats() {
            if child.visits == 0 {
                continue;
            }
            if best.map_or(true, |(_, value)| child.mean_value > value) {
                best = Some((child.action, child.mean_value));
            }
        }
        best.map(|(action, _)| action)
    }

    /// Per-child statistics of the root, in insertion order.
    pub fn child_stats(&self) -> Vec<ChildStats<G::Action>> {
        self.root
            .children()
            .iter()
            .filter_map(|child| {
                let stats = child.lock();
                Some(ChildStats {
                    action: child.parent_action()?,
                    visits: stats.visits,
                    mean_value: stats.mean_value(),
                })
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let (total_nodes, max_depth) = self.count_nodes();
        let root = self.root.lock();
        TreeStats {
            total_nodes,
            root_visits: root.visits,
            root_value: root.mean_value(),
            max_depth,
        }
    }

    /// Count nodes and measure depth without recursion, one lock at a time.
    fn count_nodes(&self) -> (usize, u32) {
        let mut total = 0;
        let mut max_depth = 0;
        let mut stack = vec![(Arc::clone(&self.root), 0u32)];

        while let Some((node, depth)) = stack.pop() {
            total += 1;
            max_depth = max_depth.max(depth);
            stack.extend(node.children().into_iter().map(|child| (child, depth + 1)));
        }

        (total, max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::TicTacToe;

    /// Attach a child for `action` to `parent` and return it.
    fn attach(parent: &Arc<Node<TicTacToe>>, action: u8) -> Arc<Node<TicTacToe>> {
        let mut state = *parent.state();
        state.apply_action(action).unwrap();
        let child = Node::new_child(state, action, parent);
        let mut stats = parent.lock();
        stats.untried_actions.retain(|&a| a != action);
        stats.children.push(Arc::clone(&child));
        child
    }

    fn set_stats(node: &Node<TicTacToe>, visits: u32, total_reward: f32) {
        let mut stats = node.lock();
        stats.visits = visits;
        stats.total_reward = total_reward;
    }

    /// Position with exactly three legal moves left: 6, 7, 8.
    fn three_moves_left() -> TicTacToe {
        let mut game = TicTacToe::new();
        // X O X / X O O / _ _ _
        for m in [0, 1, 2, 4, 3, 5] {
            game.apply_action(m).unwrap();
        }
        assert_eq!(game.legal_actions(), vec![6, 7, 8]);
        game
    }

    #[test]
    fn test_new_tree() {
        let tree = SearchTree::new(&TicTacToe::new());
        let stats = tree.stats();

        assert_eq!(stats.total_nodes, 1);
        assert_eq!(stats.root_visits, 0);
        assert_eq!(stats.max_depth, 0);
        assert!(tree.root().parent().is_none());
    }

    #[test]
    fn test_selection_stops_at_frontier() {
        let tree = SearchTree::new(&three_moves_left());
        assert!(SearchTree::select_child(tree.root(), 1.41).is_none());

        // Still a frontier with one child expanded
        attach(tree.root(), 8);
        assert!(SearchTree::select_child(tree.root(), 1.41).is_none());
    }

    #[test]
    fn test_selection_stops_at_leaf() {
        let mut game = TicTacToe::new();
        for m in [0, 3, 1, 4, 2] {
            game.apply_action(m).unwrap();
        }
        let tree = SearchTree::new(&game);
        assert!(SearchTree::select_child(tree.root(), 1.41).is_none());
    }

    #[test]
    fn test_unvisited_parent_takes_first_child() {
        let tree = SearchTree::new(&three_moves_left());
        let first = attach(tree.root(), 8);
        let second = attach(tree.root(), 7);
        let third = attach(tree.root(), 6);
        set_stats(&second, 5, 5.0);
        set_stats(&third, 5, 5.0);
        set_stats(&first, 5, -5.0);

        let selected = SearchTree::select_child(tree.root(), 1.41).unwrap();
        assert!(Arc::ptr_eq(&selected, &first));
    }

    #[test]
    fn test_unvisited_child_selected_first() {
        let tree = SearchTree::new(&three_moves_left());
        let a = attach(tree.root(), 8);
        let b = attach(tree.root(), 7);
        let c = attach(tree.root(), 6);
        set_stats(tree.root(), 10, 0.0);
        set_stats(&a, 9, 9.0);
        set_stats(&c, 1, -1.0);

        let selected = SearchTree::select_child(tree.root(), 1.41).unwrap();
        assert!(Arc::ptr_eq(&selected, &b));
    }

    #[test]
    fn test_ucb_prefers_higher_score() {
        let tree = SearchTree::new(&three_moves_left());
        let a = attach(tree.root(), 8);
        let b = attach(tree.root(), 7);
        let c = attach(tree.root(), 6);
        set_stats(tree.root(), 30, 0.0);
        set_stats(&a, 10, -5.0);
        set_stats(&b, 10, 8.0);
        set_stats(&c, 10, 0.0);

        let selected = SearchTree::select_child(tree.root(), 1.41).unwrap();
        assert!(Arc::ptr_eq(&selected, &b));

        // Enough exploration weight favors the rarely visited child
        set_stats(&c, 1, 0.0);
        let selected = SearchTree::select_child(tree.root(), 10.0).unwrap();
        assert!(Arc::ptr_eq(&selected, &c));
    }

    #[test]
    fn test_ucb_ties_go_to_first_child() {
        let tree = SearchTree::new(&three_moves_left());
        let a = attach(tree.root(), 8);
        let b = attach(tree.root(), 7);
        let c = attach(tree.root(), 6);
        set_stats(tree.root(), 12, 0.0);
        for node in [&a, &b, &c] {
            set_stats(node, 4, 2.0);
        }

        let selected = SearchTree::select_child(tree.root(), 1.41).unwrap();
        assert!(Arc::ptr_eq(&selected, &a));
    }

    #[test]
    fn test_backpropagate_updates_whole_path() {
        let tree = SearchTree::new(&TicTacToe::new());
        let child = attach(tree.root(), 4);
        let grandchild = attach(&child, 0);

        SearchTree::backpropagate(&grandchild, 1.0);
        SearchTree::backpropagate(&grandchild, -1.0);
        SearchTree::backpropagate(&child, 1.0);

        assert_eq!(grandchild.visits(), 2);
        assert_eq!(child.visits(), 3);
        assert_eq!(tree.root().visits(), 3);

        // Same reward everywhere: no sign flip between plies
        assert!((grandchild.lock().total_reward - 0.0).abs() < 1e-6);
        assert!((child.lock().total_reward - 1.0).abs() < 1e-6);
        assert!((tree.root().lock().total_reward - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_best_action_by_mean_value() {
        let tree = SearchTree::new(&three_moves_left());
        let a = attach(tree.root(), 8);
        let b = attach(tree.root(), 7);
        attach(tree.root(), 6);
        set_stats(&a, 100, 10.0);
        set_stats(&b, 2, 1.5);

        // Mean value, not visit count, decides; the unvisited child is skipped
        assert_eq!(tree.best_action(), Some(7));
    }

    #[test]
    fn test_best_action_ties_and_unvisited() {
        let tree = SearchTree::new(&three_moves_left());
        assert_eq!(tree.best_action(), None);

        let a = attach(tree.root(), 8);
        let b = attach(tree.root(), 7);
        assert_eq!(tree.best_action(), None);

        set_stats(&a, 3, 1.5);
        set_stats(&b, 2, 1.0);
        assert_eq!(tree.best_action(), Some(8));
    }

    #[test]
    fn test_child_stats_and_tree_stats() {
        let tree = SearchTree::new(&TicTacToe::new());
        let child = attach(tree.root(), 4);
        let sibling = attach(tree.root(), 0);
        let grandchild = attach(&child, 8);
        SearchTree::backpropagate(&grandchild, 1.0);
        SearchTree::backpropagate(&sibling, 0.0);

        let children = tree.child_stats();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].action, 4);
        assert_eq!(children[0].visits, 1);
        assert!((children[0].mean_value - 1.0).abs() < 1e-6);
        assert_eq!(children[1].action, 0);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.root_visits, 2);
        assert!((stats.root_value - 0.5).abs() < 1e-6);
        assert_eq!(stats.max_depth, 2);
    }
}
