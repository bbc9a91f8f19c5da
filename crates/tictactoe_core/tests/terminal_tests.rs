//! Terminal detection across whole board spaces
//!
//! - Every 3x3 assignment of empty / X / O is checked against a naive reference
//! - 4x4 boards are sampled with a seeded generator
//! - Worked scenarios for a win on the top row and a full-board tie

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use tictactoe_core::{
    BoardSize, GameState, InvalidMoveError, Line, LineKind, Player, Position, Status, Symbol,
};

const SYMBOLS: [char; 3] = ['.', 'X', 'O'];

fn players() -> [Player; 2] {
    [Player::human("X player", Symbol::X), Player::human("O player", Symbol::O)]
}

/// Base-3 digits of `code` as a row-major layout.
fn layout_from_code(mut code: u64, cells: usize) -> String {
    let mut s = String::with_capacity(cells);
    for _ in 0..cells {
        s.push(SYMBOLS[(code % 3) as usize]);
        code /= 3;
    }
    s
}

/// Independent win check over raw characters.
fn reference_has_line(layout: &[char], n: usize) -> bool {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        lines.push((0..n).map(|j| i * n + j).collect());
        lines.push((0..n).map(|j| j * n + i).collect());
    }
    lines.push((0..n).map(|i| i * n + i).collect());
    lines.push((0..n).map(|i| i * n + (n - 1 - i)).collect());

    lines.iter().any(|line| {
        let first = layout[line[0]];
        first != '.' && line.iter().all(|&i| layout[i] == first)
    })
}

fn assert_matches_reference(layout: &str, n: usize) {
    let state = GameState::from_layout(layout, players(), Symbol::X).unwrap();
    let chars: Vec<char> = layout.chars().collect();
    let won = reference_has_line(&chars, n);
    let full = chars.iter().all(|&c| c != '.');

    match state.check_terminal() {
        Status::Won { winner, line } => {
            assert!(won, "false win on {layout}");
            assert!(
                line.positions()
                    .all(|p| state.board().cell(p).symbol() == Some(winner)),
                "winning line on {layout} is not filled by the winner"
            );
        }
        Status::Tie => assert!(full && !won, "false tie on {layout}"),
        Status::Ongoing => assert!(!full && !won, "missed terminal on {layout}"),
    }
    assert_eq!(state.status(), state.check_terminal());
}

#[test]
fn test_every_three_by_three_board() {
    (0..3u64.pow(9)).into_par_iter().for_each(|code| {
        assert_matches_reference(&layout_from_code(code, 9), 3);
    });
}

#[test]
fn test_sampled_four_by_four_boards() {
    let mut rng = StdRng::seed_from_u64(0x7ac7);
    for _ in 0..20_000 {
        let code = rng.gen_range(0..3u64.pow(16));
        assert_matches_reference(&layout_from_code(code, 16), 4);
    }
}

#[test]
fn test_top_row_win_scenario() {
    let mut state = GameState::from_layout("XX./.O./...", players(), Symbol::X).unwrap();
    assert_eq!(state.check_terminal(), Status::Ongoing);

    let status = state.apply_move(Position::new(0, 2)).unwrap();
    assert_eq!(
        status,
        Status::Won {
            winner: Symbol::X,
            line: Line {
                kind: LineKind::Row(0),
                size: BoardSize::Three,
            },
        }
    );
    let line: Vec<_> = status_line(&status).positions().collect();
    assert_eq!(
        line,
        vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
    );
}

fn status_line(status: &Status) -> Line {
    match status {
        Status::Won { line, .. } => *line,
        other => panic!("expected a win, got {other:?}"),
    }
}

#[test]
fn test_full_board_tie_rejects_every_move() {
    let mut state = GameState::from_layout("XOX/XOO/OXX", players(), Symbol::O).unwrap();
    assert_eq!(state.status(), Status::Tie);

    for row in 0..4 {
        for col in 0..4 {
            let err = state.apply_move(Position::new(row, col)).unwrap_err();
            assert_eq!(err, InvalidMoveError::GameOver);
        }
    }
    assert_eq!(state.move_count(), 9);
    assert_eq!(state.status(), Status::Tie);
}

#[test]
fn test_random_playouts_end_in_terminal_status() {
    let mut rng = StdRng::seed_from_u64(42);
    for size in [BoardSize::Three, BoardSize::Four] {
        for _ in 0..500 {
            let mut state = GameState::new(size, players()).unwrap();
            while !state.status().is_terminal() {
                let moves: Vec<_> = state.legal_moves().collect();
                let mv = moves[rng.gen_range(0..moves.len())];
                state.apply_move(mv).unwrap();
                assert_eq!(state.board().occupied_count(), state.move_count());
            }
            assert_eq!(state.legal_moves().count(), 0);
        }
    }
}
