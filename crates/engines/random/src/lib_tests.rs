use super::*;
use std::collections::HashSet;
use tictactoe_core::{BoardSize, Player, Symbol};

fn players() -> [Player; 2] {
    [Player::ai("Machine", Symbol::O), Player::human("Ana", Symbol::X)]
}

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::with_seed(7);
    let state = GameState::from_layout("XO./.X./...", players(), Symbol::O).unwrap();

    for _ in 0..50 {
        let result = engine.search(&state, SearchLimits::default()).unwrap();
        assert!(state.legal_moves().any(|m| m == result.best_move));
        assert_eq!(result.depth, 0);
    }
}

#[test]
fn random_engine_covers_every_legal_move() {
    let mut engine = RandomEngine::with_seed(11);
    let state = GameState::new(BoardSize::Three, players()).unwrap();

    let seen: HashSet<_> = (0..500)
        .map(|_| engine.pick(&state).unwrap())
        .collect();
    assert_eq!(seen.len(), 9);
}

#[test]
fn random_engine_same_seed_same_choices() {
    let state = GameState::new(BoardSize::Four, players()).unwrap();
    let mut a = RandomEngine::with_seed(3);
    let mut b = RandomEngine::with_seed(3);
    for _ in 0..20 {
        assert_eq!(a.pick(&state).unwrap(), b.pick(&state).unwrap());
    }
}

#[test]
fn random_engine_handles_finished_game() {
    let mut engine = RandomEngine::with_seed(1);
    let state = GameState::from_layout("XXX/OO./...", players(), Symbol::O).unwrap();

    let result = engine.search(&state, SearchLimits::default());
    assert_eq!(result.unwrap_err(), EngineError::NoLegalMove);
}
