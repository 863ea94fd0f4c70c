//! Connect 4 game implementation for the Arbor engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_connect4::Connect4;
//!
//! let mut game = Connect4::new();
//! game.apply_action(3).unwrap();
//! assert_eq!(game.current_player(), 2);
//! assert_eq!(game.legal_actions(), vec![0, 1, 2, 3, 4, 5, 6]);
//! ```

use std::fmt;

use engine_core::game_utils::{opponent, outcome_reward, Winner};
use engine_core::{Game, InvalidMove, Player};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Discs in a row needed to win
const CONNECT: usize = 4;

/// Direction vectors: horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Raw window score mapped to roughly 0.76 by the heuristic squash
const EVAL_SCALE: f32 = 1000.0;

/// Connect4 action: the column (0-6) to drop a disc into
pub type Action = u8;

/// Connect4 game state
///
/// Represents the complete state of a Connect4 game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4 {
    /// Board representation: 0=empty, 1=Red (player 1), 2=Yellow (player 2)
    /// Stored in row-major order with row 0 at the bottom
    board: [u8; BOARD_SIZE],
    /// Current player: 1=Red, 2=Yellow
    current_player: Player,
    /// Outcome so far
    winner: Winner,
    /// Height of each column (0-6 means number of pieces in column)
    column_heights: [u8; COLS],
}

impl Connect4 {
    /// Create a new game with Red to move
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: 1, // Red goes first
            winner: Winner::Ongoing,
            column_heights: [0; COLS],
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

    /// Outcome so far
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Cell value at (col, row), row 0 at the bottom
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.board[Self::pos(col, row)]
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Length of the run of `player` discs through (col, row) along (dc, dr)
    fn run_length(board: &[u8; BOARD_SIZE], col: usize, row: usize, dc: i32, dr: i32) -> usize {
        let player = board[Self::pos(col, row)];
        let mut count = 1; // Count the piece we just placed

        for sign in [1, -1] {
            let (mut c, mut r) = (col as i32 + sign * dc, row as i32 + sign * dr);
            while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
                if board[Self::pos(c as usize, r as usize)] != player {
                    break;
                }
                count += 1;
                c += sign * dc;
                r += sign * dr;
            }
        }

        count
    }

    /// Check if the piece at (col, row) creates a winning line
    fn connects_at(board: &[u8; BOARD_SIZE], col: usize, row: usize) -> bool {
        board[Self::pos(col, row)] != 0
            && DIRECTIONS
                .iter()
                .any(|&(dc, dr)| Self::run_length(board, col, row, dc, dr) >= CONNECT)
    }

    /// Score a window of four cells for `player`
    fn window_score(&self, cells: impl Iterator<Item = usize>, player: Player) -> f32 {
        let (mut own, mut theirs) = (0, 0);
        for pos in cells {
            match self.board[pos] {
                0 => {}
                cell if cell == player => own += 1,
                _ => theirs += 1,
            }
        }

        match (own, theirs) {
            (0, 0) => 0.0,
            (n, 0) => 10f32.powi(n),
            (0, n) => -(10f32.powi(n)),
            _ => 0.0, // Blocked window
        }
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Connect4 {
    type Action = Action;

    fn is_terminal(&self) -> bool {
        self.winner.is_decided()
    }

    fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    fn apply_action(&mut self, column: Action) -> Result<(), InvalidMove> {
        let col = column as usize;
        if self.is_terminal() {
            return Err(InvalidMove::GameOver);
        }
        if col >= COLS {
            return Err(InvalidMove::OutOfBounds(column));
        }
        if self.column_heights[col] >= ROWS as u8 {
            return Err(InvalidMove::ColumnFull(column));
        }

        let row = self.column_heights[col] as usize;
        self.board[Self::pos(col, row)] = self.current_player;
        self.column_heights[col] += 1;

        self.winner = if Self::connects_at(&self.board, col, row) {
            Winner::Player(self.current_player)
        } else if self.column_heights.iter().all(|&h| h >= ROWS as u8) {
            Winner::Draw
        } else {
            Winner::Ongoing
        };
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

        let mut score = 0.0;
        for row in 0..ROWS {
            for col in 0..COLS {
                for (dc, dr) in DIRECTIONS {
                    let end_c = col as i32 + dc * (CONNECT as i32 - 1);
                    let end_r = row as i32 + dr * (CONNECT as i32 - 1);
                    if end_c < 0 || end_c >= COLS as i32 || end_r < 0 || end_r >= ROWS as i32 {
                        continue;
                    }
                    let cells = (0..CONNECT as i32).map(|i| {
                        Self::pos((col as i32 + dc * i) as usize, (row as i32 + dr * i) as usize)
                    });
                    score += self.window_score(cells, player);
                }
            }
        }

        (score / EVAL_SCALE).tanh()
    }

    fn is_winning_move(&self, column: Action) -> bool {
        let col = column as usize;
        if self.is_terminal() || col >= COLS || self.column_heights[col] >= ROWS as u8 {
            return false;
        }

        let row = self.column_heights[col] as usize;
        let mut board = self.board;
        board[Self::pos(col, row)] = self.current_player;
        Self::connects_at(&board, col, row)
    }

    fn name(&self) -> &'static str {
        "Connect Four"
    }
}

impl fmt::Display for Connect4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (0..COLS).map(|c| c.to_string()).collect();
        writeln!(f, "{}", header.join(" "))?;
        for row in (0..ROWS).rev() {
            let cells: Vec<&str> = (0..COLS)
                .map(|col| match self.cell(col, row) {
                    0 => ".",
                    1 => "X",
                    _ => "O",
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
