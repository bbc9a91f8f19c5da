//! AI opponent for tic-tac-toe
//!
//! Maps the four difficulty tiers onto engines:
//!
//! | Tier      | Engine                                   |
//! |-----------|------------------------------------------|
//! | EASY      | uniform random choice                    |
//! | MEDIUM    | unpruned minimax, random with prob. `p`  |
//! | HARD      | alpha-beta                               |
//! | VERY HARD | iterative deepening under a time budget  |

mod config;
mod difficulty;
mod opponent;

use std::time::Duration;

use tictactoe_core::{EngineError, GameState, Position};

pub use config::*;
pub use difficulty::*;
pub use opponent::*;

/// Selects a move for the side to move with default tuning.
///
/// The move is returned, not applied; the caller decides when to play it.
pub fn select_ai_move(
    state: &GameState,
    difficulty: Difficulty,
    time_budget: Option<Duration>,
) -> Result<Position, EngineError> {
    Opponent::default()
        .select_move(state, difficulty, time_budget)
        .map(|result| result.best_move)
}
