//! Rollout policy for the simulation phase.
//!
//! A rollout plays random legal moves on a private copy of a position until
//! the game ends, then scores the final position for a fixed player. Two
//! knobs bias it: move ordering favors immediately winning moves without
//! ruling out the others, and the heuristic scores with the game's static
//! evaluation instead of the terminal reward. An optional depth limit cuts
//! long play-outs short.

use engine_core::{Game, Player};
use rand::Rng;
use tracing::warn;

use crate::config::MctsConfig;

/// Chance that an ordered rollout draws from the winning moves when any exist.
/// The rest of the time it draws from every candidate, winners included.
pub const WINNING_MOVE_BIAS: f64 = 0.9;

/// How rollouts pick moves and score their final position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RolloutPolicy {
    pub use_move_ordering: bool,
    pub use_heuristic: bool,
    pub max_depth: Option<u32>,
}

impl RolloutPolicy {
    /// Uniform random play-out scored by the terminal reward.
    pub fn random() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MctsConfig) -> Self {
        Self {
            use_move_ordering: config.use_move_ordering,
            use_heuristic: config.use_heuristic,
            max_depth: config.max_rollout_depth,
        }
    }

    /// Play out a copy of `state` and score the result for `perspective`.
    ///
    /// `perspective` is the player to move at the search root and stays fixed
    /// for the whole play-out, whether the final position is scored with
    /// [`Game::reward`] or [`Game::evaluate`]. `state` itself is never
    /// modified.
    pub fn rollout<G: Game, R: Rng>(
        &self,
        state: &G,
        perspective: Player,
        rng: &mut R,
    ) -> f32 {
        let mut sim = state.clone();
        let mut depth = 0u32;

        while !sim.is_terminal() {
            if self.max_depth.is_some_and(|max| depth >= max) {
                break;
            }
            if !self.play_random_move(&mut sim, rng) {
                break;
            }
            depth += 1;
        }

        if self.use_heuristic {
            sim.evaluate(perspective)
        } else {
            sim.reward(perspective)
        }
    }

    /// Apply one random legal move. Returns false when no candidate applied.
    ///
    /// A candidate the game rejects is dropped and another one drawn, so a
    /// game that lists illegal actions can only end the rollout early.
    fn play_random_move<G: Game, R: Rng>(&self, sim: &mut G, rng: &mut R) -> bool {
        let (mut candidates, mut winning) = if self.use_move_ordering {
            order_actions(sim, sim.legal_actions())
        } else {
            (sim.legal_actions(), 0)
        };

        while !candidates.is_empty() {
            let pool = if winning > 0 && rng.gen_bool(WINNING_MOVE_BIAS) {
                winning
            } else {
                candidates.len()
            };
            let idx = rng.gen_range(0..pool);
            let action = candidates[idx];

            match sim.apply_action(action) {
                Ok(()) => return true,
                Err(err) => {
                    warn!(game = sim.name(), %action, %err, "Rollout skipped illegal action");
                    candidates.remove(idx);
                    if idx < winning {
                        winning -= 1;
                    }
                }
            }
        }

        false
    }
}

/// Stable reorder putting immediately winning actions first.
///
/// Returns the reordered actions and the length of the winning prefix.
pub fn order_actions<G: Game>(state: &G, actions: Vec<G::Action>) -> (Vec<G::Action>, usize) {
    let (mut ordered, rest): (Vec<_>, Vec<_>) = actions
        .into_iter()
        .partition(|&action| state.is_winning_move(action));
    let winning = ordered.len();
    ordered.extend(rest);
    (ordered, winning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::InvalidMove;
    use games_connect4::Connect4;
    use games_tictactoe::TicTacToe;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn play(moves: &[u8]) -> TicTacToe {
        let mut game = TicTacToe::new();
        for &m in moves {
            game.apply_action(m).unwrap();
        }
        game
    }

    /// Game that advertises actions it then refuses to apply.
    #[derive(Debug, Clone)]
    struct Stubborn {
        moves_left: u8,
        listed: Vec<u8>,
        accepted: Vec<u8>,
    }

    impl Game for Stubborn {
        type Action = u8;

        fn is_terminal(&self) -> bool {
            self.moves_left == 0
        }

        fn legal_actions(&self) -> Vec<u8> {
            if self.is_terminal() {
                Vec::new()
            } else {
                self.listed.clone()
            }
        }

        fn apply_action(&mut self, action: u8) -> Result<(), InvalidMove> {
            if !self.accepted.contains(&action) {
                return Err(InvalidMove::OutOfBounds(action));
            }
            self.moves_left -= 1;
            Ok(())
        }

        fn reward(&self, _player: Player) -> f32 {
            if self.is_terminal() {
                0.0
            } else {
                -1.0
            }
        }

        fn current_player(&self) -> Player {
            1
        }

        fn evaluate(&self, _player: Player) -> f32 {
            0.25
        }
    }

    #[test]
    fn test_rollout_reaches_terminal_reward() {
        let game = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..50 {
            let reward = RolloutPolicy::random().rollout(&game, 1, &mut rng);
            assert!(reward == 1.0 || reward == 0.0 || reward == -1.0);
        }
    }

    #[test]
    fn test_rollout_does_not_mutate_state() {
        let game = play(&[4, 0]);
        let before = game;
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let policy = RolloutPolicy {
            use_move_ordering: true,
            use_heuristic: true,
            max_depth: None,
        };
        for _ in 0..20 {
            policy.rollout(&game, game.current_player(), &mut rng);
        }
        assert_eq!(game, before);
    }

    #[test]
    fn test_rollout_of_terminal_state_scores_it() {
        // X won with the top row
        let game = play(&[0, 3, 1, 4, 2]);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert_eq!(RolloutPolicy::random().rollout(&game, 1, &mut rng), 1.0);
        assert_eq!(RolloutPolicy::random().rollout(&game, 2, &mut rng), -1.0);
    }

    fn wins_on_first_move(policy: RolloutPolicy, seed: u64) -> u32 {
        // X to move, only 6 wins on the spot
        let game = play(&[0, 1, 3, 2]);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut wins = 0;
        for _ in 0..1000 {
            let mut sim = game;
            assert!(policy.play_random_move(&mut sim, &mut rng));
            if sim.is_terminal() {
                wins += 1;
            }
        }
        wins
    }

    #[test]
    fn test_move_ordering_favors_the_win() {
        let ordered = RolloutPolicy {
            use_move_ordering: true,
            ..RolloutPolicy::random()
        };
        let wins = wins_on_first_move(ordered, 11);
        // Roughly 0.9 + 0.1 / 5 of draws
        assert!(wins > 850, "winning move played only {wins}/1000 times");
        assert!(wins < 1000, "winning move was never passed over");
    }

    #[test]
    fn test_uniform_rollout_does_not_favor_the_win() {
        let wins = wins_on_first_move(RolloutPolicy::random(), 11);
        // One candidate in five
        assert!((120..=280).contains(&wins), "winning move played {wins}/1000 times");
    }

    #[test]
    fn test_order_actions_is_stable() {
        let game = play(&[0, 1, 3, 2]);
        let (ordered, winning) = order_actions(&game, game.legal_actions());
        assert_eq!(winning, 1);
        assert_eq!(ordered, vec![6, 4, 5, 7, 8]);

        let (ordered, winning) = order_actions(&TicTacToe::new(), (0..9).collect());
        assert_eq!(winning, 0);
        assert_eq!(ordered, (0..9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_depth_limit_scores_unfinished_position() {
        let game = Connect4::new();
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        // Nobody can win in three plies, so the reward is the "not over" value
        let cut = RolloutPolicy {
            max_depth: Some(3),
            ..RolloutPolicy::random()
        };
        assert_eq!(cut.rollout(&game, 1, &mut rng), -1.0);

        // Zero depth scores the position itself
        let heuristic = RolloutPolicy {
            use_heuristic: true,
            max_depth: Some(0),
            ..RolloutPolicy::random()
        };
        assert_eq!(heuristic.rollout(&game, 1, &mut rng), 0.0);
    }

    #[test]
    fn test_heuristic_rollout_in_range() {
        let game = Connect4::new();
        let policy = RolloutPolicy {
            use_heuristic: true,
            max_depth: Some(8),
            ..RolloutPolicy::random()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..20 {
            let value = policy.rollout(&game, 1, &mut rng);
            assert!((-1.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_illegal_candidates_are_skipped() {
        let game = Stubborn {
            moves_left: 3,
            listed: vec![0, 1, 2, 3],
            accepted: vec![2],
        };
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for _ in 0..10 {
            // Only action 2 applies, so the rollout still finishes the game
            assert_eq!(RolloutPolicy::random().rollout(&game, 1, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_all_candidates_illegal_ends_rollout() {
        let game = Stubborn {
            moves_left: 3,
            listed: vec![0, 1],
            accepted: vec![],
        };
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(RolloutPolicy::random().rollout(&game, 1, &mut rng), -1.0);

        let heuristic = RolloutPolicy {
            use_heuristic: true,
            ..RolloutPolicy::random()
        };
        assert_eq!(heuristic.rollout(&game, 1, &mut rng), 0.25);
    }
}
