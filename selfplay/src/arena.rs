//! Match runner: plays full games between two search engines.

use anyhow::{anyhow, Context, Result};
use engine_core::Game;
use mcts::{Mcts, MctsConfig};
use tracing::{debug, info};

use crate::stats::{GameRecord, MatchStats, Outcome};

/// Two engines facing each other over a series of games.
pub struct Arena {
    baseline: Mcts,
    challenger: Mcts,
}

impl Arena {
    pub fn new(baseline: MctsConfig, challenger: MctsConfig) -> Self {
        Self {
            baseline: Mcts::new(baseline),
            challenger: Mcts::new(challenger),
        }
    }

    /// Reseed both engines before a game. `None` keeps entropy seeding.
    pub fn reseed(&mut self, baseline: Option<u64>, challenger: Option<u64>) {
        let config = self.baseline.config().clone().with_seed(baseline);
        self.baseline.set_config(config);
        let config = self.challenger.config().clone().with_seed(challenger);
        self.challenger.set_config(config);
    }

    /// Play one game from `initial` to the end.
    ///
    /// Player 1 moves first; `baseline_first` decides which engine sits there.
    pub fn play_game<G: Game>(&self, initial: &G, baseline_first: bool) -> Result<GameRecord> {
        let mut game = initial.clone();
        let first_player = game.current_player();
        let mut plies = 0u32;

        while !game.is_terminal() {
            let baseline_to_move = (game.current_player() == first_player) == baseline_first;
            let engine = if baseline_to_move {
                &self.baseline
            } else {
                &self.challenger
            };

            let action = engine.select_action(&game).ok_or_else(|| {
                anyhow!(
                    "engine returned no move in a running {} game after {} plies",
                    game.name(),
                    plies
                )
            })?;
            game.apply_action(action)
                .with_context(|| format!("engine chose illegal action {}", action))?;
            plies += 1;
            debug!(ply = plies, %action, baseline = baseline_to_move, "Move played");
        }

        let first_reward = game.reward(first_player);
        let outcome = if first_reward > 0.0 {
            if baseline_first {
                Outcome::Baseline
            } else {
                Outcome::Challenger
            }
        } else if first_reward < 0.0 {
            if baseline_first {
                Outcome::Challenger
            } else {
                Outcome::Baseline
            }
        } else {
            Outcome::Draw
        };

        Ok(GameRecord {
            outcome,
            plies,
            baseline_first,
        })
    }

    /// Play `games` games, alternating who moves first, and tally the results.
    ///
    /// `seed_for(game_index, seat)` supplies each engine's root seed per game,
    /// seat 0 being the baseline.
    pub fn run_match<G, F>(&mut self, initial: &G, games: u32, seed_for: F) -> Result<MatchStats>
    where
        G: Game,
        F: Fn(u32, u64) -> Option<u64>,
    {
        let mut stats = MatchStats::new(initial.name());

        for index in 0..games {
            self.reseed(seed_for(index, 0), seed_for(index, 1));
            let baseline_first = index % 2 == 0;
            let record = self.play_game(initial, baseline_first)?;
            stats.record(&record);

            info!(
                game = index + 1,
                of = games,
                outcome = ?record.outcome,
                plies = record.plies,
                baseline_first,
                "Game finished"
            );
        }

        Ok(stats)
    }
}
