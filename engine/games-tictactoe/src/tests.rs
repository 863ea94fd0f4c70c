use super::*;

fn play(moves: &[u8]) -> TicTacToe {
    let mut game = TicTacToe::new();
    for &m in moves {
        game.apply_action(m).unwrap();
    }
    game
}

#[test]
fn test_initial_state() {
    let game = TicTacToe::new();
    assert_eq!(game.board, [0; 9]);
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.winner(), Winner::Ongoing);
    assert!(!game.is_terminal());
}

#[test]
fn test_starting_player() {
    let game = TicTacToe::with_starting_player(2).unwrap();
    assert_eq!(game.current_player(), 2);
    assert!(TicTacToe::with_starting_player(0).is_none());
    assert!(TicTacToe::with_starting_player(3).is_none());
}

#[test]
fn test_legal_actions() {
    let game = TicTacToe::new();
    assert_eq!(game.legal_actions(), (0..9).collect::<Vec<_>>());

    // After one move
    let game = play(&[4]); // Center
    let legal = game.legal_actions();
    assert_eq!(legal.len(), 8);
    assert!(!legal.contains(&4));
}

#[test]
fn test_apply_action() {
    let game = play(&[4]); // X places in center

    assert_eq!(game.board[4], 1);
    assert_eq!(game.current_player(), 2); // Now O's turn
    assert!(!game.is_terminal());
}

#[test]
fn test_invalid_moves_leave_state_unchanged() {
    let mut game = play(&[4]);
    let before = game;

    assert_eq!(game.apply_action(4), Err(InvalidMove::Occupied(4)));
    assert_eq!(game.apply_action(9), Err(InvalidMove::OutOfBounds(9)));
    assert_eq!(game, before);
}

#[test]
fn test_winning_game() {
    // X wins with top row
    let mut game = play(&[0, 3, 1, 4, 2]);

    assert_eq!(game.winner(), Winner::Player(1));
    assert!(game.is_terminal());
    assert!(game.legal_actions().is_empty());
    assert_eq!(game.reward(1), 1.0);
    assert_eq!(game.reward(2), -1.0);
    assert_eq!(game.apply_action(5), Err(InvalidMove::GameOver));
}

#[test]
fn test_draw_game() {
    // X O X / X O O / O X X
    let game = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(game.winner(), Winner::Draw);
    assert!(game.is_terminal());
    assert_eq!(game.reward(1), 0.0);
    assert_eq!(game.reward(2), 0.0);
}

#[test]
fn test_reward_when_not_over() {
    let game = play(&[0, 1]);
    assert_eq!(game.reward(1), -1.0);
    assert_eq!(game.reward(2), -1.0);
}

#[test]
fn test_is_winning_move() {
    // X at 0 and 3, O at 1 and 2: X wins at 6
    let game = play(&[0, 1, 3, 2]);
    assert!(game.is_winning_move(6));
    assert!(!game.is_winning_move(4));
    assert!(!game.is_winning_move(0)); // occupied
    assert!(!game.is_winning_move(42)); // out of bounds
}

#[test]
fn test_is_winning_move_for_second_player() {
    // X at 0, 2, 8; O at 1, 4: O wins at 7
    let game = play(&[0, 1, 2, 4, 8]);
    assert_eq!(game.current_player(), 2);
    assert!(game.is_winning_move(7));
    assert!(!game.is_winning_move(5));
}

#[test]
fn test_evaluate_terminal_matches_reward() {
    let game = play(&[0, 3, 1, 4, 2]);
    assert_eq!(game.evaluate(1), 1.0);
    assert_eq!(game.evaluate(2), -1.0);
}

#[test]
fn test_evaluate_open_lines() {
    // X at 0, 1 (open two on top row), O at 4
    let game = play(&[0, 4, 1]);
    assert!(game.evaluate(1) > 0.0);
    assert!(game.evaluate(2) < 0.0);
    assert!((game.evaluate(1) + game.evaluate(2)).abs() < 1e-6);

    // Empty board is neutral
    assert_eq!(TicTacToe::new().evaluate(1), 0.0);
}

#[test]
fn test_clone_isolation() {
    let base = play(&[4]);
    let mut a = base;
    let mut b = base.clone();
    a.apply_action(0).unwrap();
    b.apply_action(0).unwrap();

    assert_eq!(a, b);
    assert_eq!(base.board[0], 0);
}

#[test]
fn test_display() {
    let game = play(&[0, 4]);
    let rendered = game.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], " X | 1 | 2 ");
    assert_eq!(lines[1], "---+---+---");
    assert_eq!(lines[2], " 3 | O | 5 ");
}
