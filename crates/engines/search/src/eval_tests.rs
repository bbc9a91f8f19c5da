use super::*;
use crate::symmetry::Transform;
use tictactoe_core::{BoardSize, Line, LineKind};

fn board(layout: &str) -> Board {
    Board::parse(layout).unwrap()
}

fn won_by(winner: Symbol) -> Status {
    Status::Won {
        winner,
        line: Line {
            kind: LineKind::Row(0),
            size: BoardSize::Three,
        },
    }
}

#[test]
fn test_terminal_scores_prefer_fast_wins_and_slow_losses() {
    assert_eq!(score_terminal(&won_by(Symbol::X), Symbol::X, 0), WIN_SCORE);
    assert!(score_terminal(&won_by(Symbol::X), Symbol::X, 1) > score_terminal(&won_by(Symbol::X), Symbol::X, 3));
    assert!(score_terminal(&won_by(Symbol::O), Symbol::X, 5) > score_terminal(&won_by(Symbol::O), Symbol::X, 2));
    assert_eq!(score_terminal(&won_by(Symbol::O), Symbol::X, 4), -WIN_SCORE + 4);
    assert_eq!(score_terminal(&Status::Tie, Symbol::X, 9), 0);
    assert_eq!(score_terminal(&Status::Ongoing, Symbol::X, 2), 0);
}

#[test]
fn test_empty_board_scores_zero() {
    let eval = Evaluator::default();
    assert_eq!(eval.score_heuristic(&board("........."), Symbol::X), 0);
    assert_eq!(eval.score_heuristic(&board("................"), Symbol::O), 0);
}

#[test]
fn test_center_beats_corner_beats_edge() {
    let eval = Evaluator::default();
    let center = eval.score_heuristic(&board("..../XX../..../...."), Symbol::X);
    assert!(center > 0);

    let center3 = eval.score_heuristic(&board(".../.X./..."), Symbol::X);
    let corner3 = eval.score_heuristic(&board("X../.../..."), Symbol::X);
    let edge3 = eval.score_heuristic(&board(".X./.../..."), Symbol::X);
    assert!(center3 > corner3, "{center3} <= {corner3}");
    assert!(corner3 > edge3, "{corner3} <= {edge3}");
}

#[test]
fn test_cell_weights() {
    let eval = Evaluator::default();
    let w = eval.weights().clone();
    assert_eq!(eval.cell_weight(Position::new(1, 1), BoardSize::Three), w.center);
    assert_eq!(eval.cell_weight(Position::new(2, 1), BoardSize::Four), w.center);
    assert_eq!(eval.cell_weight(Position::new(3, 0), BoardSize::Four), w.corner);
    assert_eq!(eval.cell_weight(Position::new(0, 2), BoardSize::Four), w.edge);
}

#[test]
fn test_score_is_antisymmetric_between_players() {
    let eval = Evaluator::default();
    for layout in ["XO./.X./..O", "X.O/.O./X..", "XO../.X../..O./...X", "XXO./O.X./..../.O.."] {
        let b = board(layout);
        assert_eq!(
            eval.score_heuristic(&b, Symbol::X),
            -eval.score_heuristic(&b, Symbol::O),
            "{layout}"
        );
    }
}

#[test]
fn test_symmetric_boards_score_the_same() {
    let eval = Evaluator::default();
    for layout in ["XO./.../..O", "X.O/.O./X..", "XXO./O.X./..../.O.."] {
        let b = board(layout);
        let expected = eval.score_heuristic(&b, Symbol::X);
        for t in Transform::all() {
            assert_eq!(
                eval.score_heuristic(&t.apply_to_board(&b), Symbol::X),
                expected,
                "{layout} under {t:?}"
            );
        }
    }
}

#[test]
fn test_opponent_in_line_removes_credit() {
    let eval = Evaluator::default();
    let open = eval.line_potential(&board("XX./.../..."), Symbol::X);
    let blocked = eval.line_potential(&board("XXO/.../..."), Symbol::X);
    assert!(open > blocked);
}

#[test]
fn test_fork_boost_rewards_double_threat() {
    let eval = Evaluator::default();
    // X threatens both the top row and the left column
    let fork = board("XX./X../..O");
    let single = board("XX./..X/..O");
    assert!(eval.boost(&fork, Symbol::X) > eval.boost(&single, Symbol::X));
    assert!(eval.boost(&fork, Symbol::X) >= eval.weights().fork);
}

#[test]
fn test_fork_point_counts_shared_empty_cell() {
    let eval = Evaluator::default();
    // (0,2) extends both the top row and the right column
    let b = board("X../.../..X");
    let weights = eval.weights();
    assert!(eval.boost(&b, Symbol::X) >= weights.fork_point);
}

#[test]
fn test_heuristic_stays_inside_bound() {
    let weights = EvalWeights {
        fork: 100_000,
        ..EvalWeights::default()
    };
    let eval = Evaluator::new(weights);
    let score = eval.score_heuristic(&board("XX./X../..O"), Symbol::X);
    assert_eq!(score, HEURISTIC_BOUND - 1);
}

#[test]
fn test_weights_deserialize_with_defaults() {
    let weights: EvalWeights = serde_json::from_str(r#"{"fork": 10}"#).unwrap();
    assert_eq!(weights.fork, 10);
    assert_eq!(weights.center, EvalWeights::default().center);
}
