//! Parallel search coordinator.
//!
//! Splits a simulation budget evenly across a fixed set of workers that all
//! run against the same tree. Each worker runs `max(1, budget / workers)`
//! iterations with its own seeded generator; the remainder of the division is
//! dropped. Workers only meet at per-node locks.

use engine_core::Game;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::search::{MctsSearch, SearchError};

/// Dedicated rayon pool sized to the configured worker count.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    num_threads: usize,
}

impl WorkerPool {
    /// Build a pool with `num_threads` workers (at least one).
    pub fn new(num_threads: usize) -> Result<Self, SearchError> {
        let num_threads = num_threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("mcts-worker-{i}"))
            .build()?;
        debug!(num_threads, "Built MCTS worker pool");
        Ok(Self { pool, num_threads })
    }

    #[inline]
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Run `budget` simulations split across all workers.
    ///
    /// Blocks until every worker has finished and returns the number of
    /// simulations actually executed.
    pub fn run<G: Game>(&self, search: &MctsSearch<'_, G>, budget: u32, root_seed: u64) -> u32 {
        let per_worker = simulations_per_worker(budget, self.num_threads);

        self.pool.scope(|scope| {
            for worker in 0..self.num_threads {
                scope.spawn(move |_| {
                    let mut rng = worker_rng(root_seed, worker);
                    search.run(per_worker, &mut rng);
                    trace!(worker, per_worker, "Worker finished");
                });
            }
        });

        per_worker.saturating_mul(self.num_threads as u32)
    }
}

/// Iterations each worker runs: an even share of the budget, at least one.
#[inline]
pub fn simulations_per_worker(budget: u32, num_threads: usize) -> u32 {
    let threads = u32::try_from(num_threads.max(1)).unwrap_or(u32::MAX);
    (budget / threads).max(1)
}

/// Generator for one worker, derived from the search's root seed.
pub fn worker_rng(root_seed: u64, worker: usize) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(root_seed.wrapping_add(worker as u64))
}
