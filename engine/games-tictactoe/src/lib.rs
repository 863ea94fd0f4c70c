//! TicTacToe game implementation for the Arbor engine
//!
//! This crate provides a reference implementation of TicTacToe
//! demonstrating how to implement the Game trait for the search engine.
//!
//! Board positions are numbered 0-8:
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::TicTacToe;
//!
//! let mut game = TicTacToe::new();
//! game.apply_action(4).unwrap();
//! assert_eq!(game.current_player(), 2);
//! assert_eq!(game.legal_actions().len(), 8);
//! ```

use std::fmt;

use engine_core::game_utils::{opponent, outcome_reward, Winner};
use engine_core::{Game, InvalidMove, Player};

/// Number of cells on the board
pub const BOARD_SIZE: usize = 9;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Heuristic weight of a line holding two of one player's marks and one empty cell
const OPEN_TWO_SCORE: f32 = 0.1;

/// TicTacToe action: the board position (0-8) to mark
pub type Action = u8;

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; BOARD_SIZE],
    /// Current player: 1=X, 2=O
    current_player: Player,
    /// Outcome so far
    winner: Winner,
}

impl TicTacToe {
    /// Create a new game with X to move
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: 1, // X goes first
            winner: Winner::Ongoing,
        }
    }

    /// Create a new game with the given player (1 or 2) to move first
    pub fn with_starting_player(player: Player) -> Option<Self> {
        if player != 1 && player != 2 {
            return None;
        }
        Some(Self {
            current_player: player,
            ..Self::new()
        })
    }

    /// Board cells: 0=empty, 1=X, 2=O
    pub fn board(&self) -> &[u8; BOARD_SIZE] {
        &self.board
    }

    /// Outcome so far
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; BOARD_SIZE]) -> Winner {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return Winner::Player(board[a]);
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return Winner::Draw;
        }

        Winner::Ongoing
    }

    /// Score one line for `player`: +-1 for a full line, +-0.1 for an open two
    fn line_score(&self, line: &[usize; 3], player: Player) -> f32 {
        let (mut own, mut theirs, mut empty) = (0, 0, 0);
        for &pos in line {
            match self.board[pos] {
                0 => empty += 1,
                cell if cell == player => own += 1,
                _ => theirs += 1,
            }
        }

        match (own, theirs, empty) {
            (3, _, _) => 1.0,
            (_, 3, _) => -1.0,
            (2, 0, 1) => OPEN_TWO_SCORE,
            (0, 2, 1) => -OPEN_TWO_SCORE,
            _ => 0.0,
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TicTacToe {
    type Action = Action;

    fn is_terminal(&self) -> bool {
        self.winner.is_decided()
    }

    fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..BOARD_SIZE as u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    fn apply_action(&mut self, position: Action) -> Result<(), InvalidMove> {
        if self.is_terminal() {
            return Err(InvalidMove::GameOver);
        }
        let cell = self
            .board
            .get_mut(position as usize)
            .ok_or(InvalidMove::OutOfBounds(position))?;
        if *cell != 0 {
            return Err(InvalidMove::Occupied(position));
        }

        *cell = self.current_player;
        self.winner = Self::check_winner(&self.board);
        self.current_player = opponent(self.current_player);
        Ok(())
    }

    fn reward(&self, player: Player) -> f32 {
        outcome_reward(self.winner, player)
    }

    fn current_player(&self) -> Player {
        self.current_player
    }

    fn evaluate(&self, player: Player) -> f32 {
        if self.is_terminal() {
            return self.reward(player);
        }

        let score: f32 = LINES
            .iter()
            .map(|line| self.line_score(line, player))
            .sum();
        score.clamp(-1.0, 1.0)
    }

    fn is_winning_move(&self, position: Action) -> bool {
        let pos = position as usize;
        if self.is_terminal() || pos >= BOARD_SIZE || self.board[pos] != 0 {
            return false;
        }

        let mut board = self.board;
        board[pos] = self.current_player;
        Self::check_winner(&board) == Winner::Player(self.current_player)
    }

    fn name(&self) -> &'static str {
        "Tic-Tac-Toe"
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let pos = row * 3 + col;
                    match self.board[pos] {
                        0 => format!(" {} ", pos),
                        1 => " X ".to_string(),
                        _ => " O ".to_string(),
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
            if row < 2 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
