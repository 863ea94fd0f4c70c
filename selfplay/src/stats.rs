//! Match statistics tracking.
//!
//! Tallies results by engine rather than by seat, since seats alternate
//! every game.

use std::time::{Duration, Instant};

use tracing::info;

/// Which engine won a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Baseline,
    Challenger,
    Draw,
}

/// Result of one finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub plies: u32,
    /// Whether the baseline engine moved first
    pub baseline_first: bool,
}

/// Aggregated match statistics.
#[derive(Debug)]
pub struct MatchStats {
    game: &'static str,
    games_played: u32,
    baseline_wins: u32,
    challenger_wins: u32,
    draws: u32,
    /// Games won by whoever moved first
    first_player_wins: u32,
    total_plies: u64,
    start_time: Instant,
}

impl MatchStats {
    pub fn new(game: &'static str) -> Self {
        Self {
            game,
            games_played: 0,
            baseline_wins: 0,
            challenger_wins: 0,
            draws: 0,
            first_player_wins: 0,
            total_plies: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record(&mut self, record: &GameRecord) {
        self.games_played += 1;
        self.total_plies += u64::from(record.plies);
        match record.outcome {
            Outcome::Baseline => self.baseline_wins += 1,
            Outcome::Challenger => self.challenger_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
        let first_won = match record.outcome {
            Outcome::Baseline => record.baseline_first,
            Outcome::Challenger => !record.baseline_first,
            Outcome::Draw => false,
        };
        if first_won {
            self.first_player_wins += 1;
        }
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn baseline_wins(&self) -> u32 {
        self.baseline_wins
    }

    pub fn challenger_wins(&self) -> u32 {
        self.challenger_wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn first_player_wins(&self) -> u32 {
        self.first_player_wins
    }

    /// Challenger score in [0, 1]: wins count 1, draws 0.5.
    pub fn challenger_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.5;
        }
        (f64::from(self.challenger_wins) + 0.5 * f64::from(self.draws))
            / f64::from(self.games_played)
    }

    pub fn avg_game_length(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_plies as f64 / f64::from(self.games_played)
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log the match tally.
    pub fn log_summary(&self) {
        info!(
            game = self.game,
            games = self.games_played,
            baseline_wins = self.baseline_wins,
            challenger_wins = self.challenger_wins,
            draws = self.draws,
            first_player_wins = self.first_player_wins,
            challenger_score = format!("{:.3}", self.challenger_score()),
            avg_game_length = format!("{:.1}", self.avg_game_length()),
            runtime_secs = format!("{:.2}", self.elapsed().as_secs_f64()),
            "Match finished"
        );
    }
}
