//! Engine facade: configuration plus the move-selection entry points.

use std::time::Instant;

use engine_core::Game;
use once_cell::sync::OnceCell;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::config::MctsConfig;
use crate::parallel::WorkerPool;
use crate::search::{MctsSearch, SearchError, SearchResult};
use crate::tree::SearchTree;

/// Monte Carlo Tree Search engine.
///
/// Every call searches a fresh tree rooted at a copy of the given position;
/// nothing carries over between calls except the worker pool, which is built
/// on the first parallel search and reused afterwards.
#[derive(Debug, Default)]
pub struct Mcts {
    config: MctsConfig,
    pool: OnceCell<WorkerPool>,
}

impl Mcts {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next search.
    pub fn set_config(&mut self, config: MctsConfig) {
        if config.effective_threads() != self.config.effective_threads() {
            self.pool = OnceCell::new();
        }
        self.config = config;
    }

    /// Pick a move for the player to move in `game`.
    ///
    /// Returns `None` when there is no game, the game is over, there is no
    /// legal action, or the worker pool cannot be built. Otherwise the result
    /// is always one of `game.legal_actions()`.
    pub fn select_action<'a, G: Game>(&self, game: impl Into<Option<&'a G>>) -> Option<G::Action> {
        let game = game.into()?;
        match self.search(game) {
            Ok(result) => Some(result.action),
            Err(err) => {
                debug!(game = game.name(), %err, "No action selected");
                None
            }
        }
    }

    /// Search `game` and return the chosen action with search statistics.
    pub fn search<G: Game>(&self, game: &G) -> Result<SearchResult<G::Action>, SearchError> {
        if game.is_terminal() {
            return Err(SearchError::GameOver);
        }
        let legal = game.legal_actions();
        if legal.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let start = Instant::now();
        let root_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        let num_threads = self.config.effective_threads();

        let tree = SearchTree::new(game);
        let search = MctsSearch::new(&tree, &self.config);

        let simulations = if num_threads > 1 {
            let pool = self
                .pool
                .get_or_try_init(|| WorkerPool::new(num_threads))?;
            pool.run(&search, self.config.num_simulations, root_seed)
        } else {
            let mut rng = ChaCha20Rng::seed_from_u64(root_seed);
            search.run(self.config.num_simulations, &mut rng);
            self.config.num_simulations
        };

        let action = match tree.best_action() {
            Some(action) if legal.contains(&action) => action,
            best => {
                debug!(?best, "No usable root statistics, picking a random legal action");
                // Own stream so the fallback never replays a worker's draws
                let mut rng = ChaCha20Rng::seed_from_u64(root_seed.wrapping_sub(1));
                *legal.choose(&mut rng).ok_or(SearchError::NoLegalActions)?
            }
        };

        let stats = tree.stats();
        let elapsed = start.elapsed();
        debug!(
            game = game.name(),
            %action,
            simulations,
            num_threads,
            root_value = stats.root_value,
            total_nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            elapsed_ms = elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            action,
            simulations,
            root_visits: stats.root_visits,
            root_value: stats.root_value,
            children: tree.child_stats(),
            tree: stats,
            elapsed,
        })
    }
}
