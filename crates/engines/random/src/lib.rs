//! Random Move Engine
//!
//! Picks uniformly among all legal moves. Used for:
//! - The EASY opponent tier
//! - The MEDIUM tier's deliberate mistakes
//! - Baseline comparisons (every searching tier should beat this)

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use tictactoe_core::{Engine, EngineError, GameState, Position, SearchLimits, SearchResult};
use tracing::debug;

#[cfg(test)]
mod lib_tests;

/// An engine that plays random legal moves. No evaluation is performed.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform choice over `state.legal_moves()`.
    pub fn pick(&mut self, state: &GameState) -> Result<Position, EngineError> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .ok_or(EngineError::NoLegalMove)
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(
        &mut self,
        state: &GameState,
        limits: SearchLimits,
    ) -> Result<SearchResult, EngineError> {
        limits.start();
        let best_move = self.pick(state)?;
        debug!(%best_move, "random move");

        Ok(SearchResult {
            best_move,
            score: 0,
            depth: 0,
            nodes: 1,
            elapsed: limits.time_control.elapsed(),
            stopped: false,
        })
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
