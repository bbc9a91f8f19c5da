//! Whole-game guarantees of the search tiers on 3x3
//!
//! - Pruned search agrees with unpruned minimax on every reachable position
//! - The transposition table never changes the chosen move
//! - Alpha-beta never loses, moving first or second, against every reply
//! - The time-bounded engine always answers, even with no time at all

use std::collections::HashSet;
use std::time::Duration;

use rayon::prelude::*;

use search_engine::search::{pick_alpha_beta, pick_alpha_beta_with, pick_minimax};
use search_engine::{AlphaBetaEngine, HeuristicEngine, MinimaxEngine};
use tictactoe_core::{
    Board, BoardSize, Engine, EngineError, GameState, Player, SearchLimits, Status, Symbol,
};

fn players() -> [Player; 2] {
    [Player::human("Human", Symbol::X), Player::ai("Machine", Symbol::O)]
}

fn empty(size: BoardSize) -> GameState {
    GameState::new(size, players()).unwrap()
}

/// Every non-terminal position reachable from the empty 3x3 board.
fn reachable_positions() -> Vec<GameState> {
    fn walk(state: &GameState, seen: &mut HashSet<Board>, out: &mut Vec<GameState>) {
        if state.status().is_terminal() || !seen.insert(*state.board()) {
            return;
        }
        out.push(state.clone());
        for mv in state.legal_moves() {
            let mut child = state.clone();
            child.apply_move(mv).unwrap();
            walk(&child, seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(&empty(BoardSize::Three), &mut seen, &mut out);
    out
}

#[test]
fn test_reachable_position_count() {
    // 5478 legal positions, of which 958 are terminal
    assert_eq!(reachable_positions().len(), 5478 - 958);
}

#[test]
fn test_alpha_beta_matches_unpruned_minimax() {
    let positions = reachable_positions();
    positions.par_iter().for_each(|state| {
        let mut plain_nodes = 0;
        let mut pruned_nodes = 0;
        let plain = pick_minimax(state, u8::MAX, &mut plain_nodes).unwrap();
        let pruned = pick_alpha_beta(state, u8::MAX, None, &mut pruned_nodes).unwrap();
        assert_eq!(pruned.best, plain.best, "\n{}", state.board());
        assert!(pruned_nodes <= plain_nodes);
    });
}

#[test]
fn test_cached_and_uncached_alpha_beta_agree() {
    let positions = reachable_positions();
    positions.par_iter().for_each(|state| {
        let mut uncached_nodes = 0;
        let mut cached_nodes = 0;
        let uncached =
            pick_alpha_beta_with(state, u8::MAX, None, None, &mut uncached_nodes).unwrap();
        let cached = pick_alpha_beta(state, u8::MAX, None, &mut cached_nodes).unwrap();
        assert_eq!(cached.best, uncached.best, "\n{}", state.board());
    });
}

/// Plays every possible sequence of moves for the opponent; `engine_symbol`
/// always answers with alpha-beta.
fn assert_never_loses(state: &GameState, engine_symbol: Symbol) {
    match state.status() {
        Status::Won { winner, .. } => {
            assert_eq!(winner, engine_symbol, "engine lost:\n{}", state.board());
            return;
        }
        Status::Tie => return,
        Status::Ongoing => {}
    }

    if state.current_player().symbol == engine_symbol {
        let result = AlphaBetaEngine::new()
            .search(state, SearchLimits::full())
            .unwrap();
        let mut next = state.clone();
        next.apply_move(result.best_move).unwrap();
        assert_never_loses(&next, engine_symbol);
    } else {
        for mv in state.legal_moves() {
            let mut next = state.clone();
            next.apply_move(mv).unwrap();
            assert_never_loses(&next, engine_symbol);
        }
    }
}

#[test]
fn test_alpha_beta_never_loses_moving_second() {
    let root = empty(BoardSize::Three);
    let openings: Vec<_> = root.legal_moves().collect();
    openings.into_par_iter().for_each(|mv| {
        let mut state = root.clone();
        state.apply_move(mv).unwrap();
        assert_never_loses(&state, Symbol::O);
    });
}

#[test]
fn test_alpha_beta_never_loses_moving_first() {
    assert_never_loses(&empty(BoardSize::Three), Symbol::X);
}

#[test]
fn test_minimax_and_alpha_beta_engines_agree_on_opening() {
    let state = empty(BoardSize::Three);
    let plain = MinimaxEngine::new().search(&state, SearchLimits::full()).unwrap();
    let pruned = AlphaBetaEngine::new().search(&state, SearchLimits::full()).unwrap();
    assert_eq!(plain.best_move, pruned.best_move);
    assert_eq!(plain.score, 0);
    assert!(pruned.nodes < plain.nodes);
}

#[test]
fn test_heuristic_engine_answers_with_zero_budget() {
    for size in [BoardSize::Three, BoardSize::Four] {
        let state = empty(size);
        let result = HeuristicEngine::default()
            .search(&state, SearchLimits::time(Duration::ZERO))
            .unwrap();
        assert!(state.legal_moves().any(|mv| mv == result.best_move));
        assert!(result.stopped);
    }
}

#[test]
fn test_heuristic_engine_respects_budget_on_four_by_four() {
    let state = empty(BoardSize::Four);
    let budget = Duration::from_millis(200);
    let result = HeuristicEngine::default()
        .search(&state, SearchLimits::time(budget))
        .unwrap();
    assert!(state.legal_moves().any(|mv| mv == result.best_move));
    // one extra recursion step past the deadline is allowed
    assert!(result.elapsed < budget + Duration::from_millis(500), "{:?}", result.elapsed);
    assert!(result.elapsed > Duration::ZERO);
}

#[test]
fn test_engines_refuse_finished_games() {
    let won = GameState::from_layout("XXX/OO./...", players(), Symbol::O).unwrap();
    let mut engines: Vec<Box<dyn Engine>> = vec![
        Box::new(MinimaxEngine::new()),
        Box::new(AlphaBetaEngine::new()),
        Box::new(HeuristicEngine::default()),
    ];
    for engine in engines.iter_mut() {
        assert_eq!(
            engine.search(&won, SearchLimits::full()).unwrap_err(),
            EngineError::NoLegalMove,
            "{}",
            engine.name()
        );
    }
}
