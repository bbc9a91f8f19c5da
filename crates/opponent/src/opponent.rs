use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use random_engine::RandomEngine;
use search_engine::{AlphaBetaEngine, Evaluator, HeuristicEngine, MinimaxEngine};
use tictactoe_core::{Engine, EngineError, GameState, SearchLimits, SearchResult};
use tracing::debug;

use crate::config::{AiConfig, ConfigError};
use crate::difficulty::Difficulty;

/// Dispatches move selection to the engine behind each tier.
///
/// Owns one engine per tier plus the generator that drives MEDIUM's random
/// substitution. HARD and VERY HARD never consult a generator.
#[derive(Debug)]
pub struct Opponent {
    config: AiConfig,
    rng: StdRng,
    random: RandomEngine,
    minimax: MinimaxEngine,
    alpha_beta: AlphaBetaEngine,
    heuristic: HeuristicEngine,
}

impl Opponent {
    pub fn new(config: AiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, StdRng::from_entropy(), RandomEngine::new()))
    }

    /// Reproducible opponent: the same seed yields the same random choices.
    pub fn with_seed(config: AiConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(
            config,
            StdRng::seed_from_u64(seed),
            RandomEngine::with_seed(seed.wrapping_add(1)),
        ))
    }

    fn build(config: AiConfig, rng: StdRng, random: RandomEngine) -> Self {
        let heuristic = HeuristicEngine::new(Evaluator::new(config.weights.clone()));
        Self {
            config,
            rng,
            random,
            minimax: MinimaxEngine::new(),
            alpha_beta: AlphaBetaEngine::new(),
            heuristic,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Resets per-game engine state.
    pub fn new_game(&mut self) {
        self.random.new_game();
        self.minimax.new_game();
        self.alpha_beta.new_game();
        self.heuristic.new_game();
    }

    /// Selects a move for the side to move at `difficulty`.
    ///
    /// `time_budget` only affects VERY HARD; `None` uses the configured
    /// default. Fails with [`EngineError::NoLegalMove`] on a finished game.
    pub fn select_move(
        &mut self,
        state: &GameState,
        difficulty: Difficulty,
        time_budget: Option<Duration>,
    ) -> Result<SearchResult, EngineError> {
        if state.status().is_terminal() {
            return Err(EngineError::NoLegalMove);
        }

        let depth = self.config.search_depth(difficulty, state.size());
        let result = match difficulty {
            Difficulty::Easy => self.random.search(state, SearchLimits::depth(depth))?,
            Difficulty::Medium => {
                if self.rng.gen_bool(self.config.medium.error_rate) {
                    debug!("medium tier substituting a random move");
                    self.random.search(state, SearchLimits::depth(0))?
                } else {
                    self.minimax.search(state, SearchLimits::depth(depth))?
                }
            }
            Difficulty::Hard => self.alpha_beta.search(state, SearchLimits::depth(depth))?,
            Difficulty::VeryHard => {
                let budget = time_budget.unwrap_or_else(|| self.config.default_time_budget());
                self.heuristic
                    .search(state, SearchLimits::depth_and_time(depth, budget))?
            }
        };

        debug!(
            tier = %difficulty,
            player = %state.current_player().name,
            mv = %result.best_move,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            elapsed = ?result.elapsed,
            "ai move"
        );
        Ok(result)
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::build(AiConfig::default(), StdRng::from_entropy(), RandomEngine::new())
    }
}

#[cfg(test)]
#[path = "opponent_tests.rs"]
mod opponent_tests;
