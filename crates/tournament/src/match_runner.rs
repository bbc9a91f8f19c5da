//! Match runner for playing games between difficulty tiers

use std::time::Duration;

use opponent::{Difficulty, Opponent};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tictactoe_core::{BoardSize, EngineError, GameState, Player, Position, Status, Symbol};
use tracing::{debug, info};

use crate::elo::{GameResult, MatchResult};
use crate::scoreboard::Scoreboard;

/// Configuration for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Board side length, 3 or 4
    pub board_size: usize,
    /// VERY HARD budget per move in milliseconds (None = configured default)
    pub budget_ms: Option<u64>,
    /// Whether to alternate who moves first each game
    pub alternate_first: bool,
    /// Random plies played before the tiers take over, for variety
    pub random_opening_plies: u8,
    /// Seed for openings and the opponent's random choices
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            board_size: 3,
            budget_ms: None,
            alternate_first: true,
            random_opening_plies: 0,
            seed: None,
        }
    }
}

impl MatchConfig {
    fn time_budget(&self) -> Option<Duration> {
        self.budget_ms.map(Duration::from_millis)
    }
}

/// Runs matches between tiers and keeps a running scoreboard
pub struct MatchRunner {
    config: MatchConfig,
    scoreboard: Scoreboard,
    rng: StdRng,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            scoreboard: Scoreboard::new(),
            rng,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Run a match between two tiers
    ///
    /// Returns the result from `tier_a`'s perspective
    pub fn run_match(
        &mut self,
        opponent: &mut Opponent,
        tier_a: Difficulty,
        tier_b: Difficulty,
    ) -> Result<MatchResult, EngineError> {
        let size = BoardSize::try_from(self.config.board_size)
            .map_err(|e| EngineError::Config(e.to_string()))?;
        let (name_a, name_b) = participant_names(tier_a, tier_b);
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let a_first = !self.config.alternate_first || game_num % 2 == 0;

            let (first, second) = if a_first {
                ((name_a.as_str(), tier_a), (name_b.as_str(), tier_b))
            } else {
                ((name_b.as_str(), tier_b), (name_a.as_str(), tier_a))
            };
            let outcome = self.play_game(opponent, size, first, second)?;
            let game_result = if a_first { outcome } else { outcome.flip() };
            result.add(game_result);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                first = first.0,
                result = ?game_result,
                wins = result.wins,
                losses = result.losses,
                draws = result.draws,
                "game finished"
            );
        }

        info!(
            a = %name_a,
            b = %name_b,
            wins = result.wins,
            losses = result.losses,
            draws = result.draws,
            "match finished"
        );
        Ok(result)
    }

    /// Play a single game, returns the result for the side moving first
    fn play_game(
        &mut self,
        opponent: &mut Opponent,
        size: BoardSize,
        first: (&str, Difficulty),
        second: (&str, Difficulty),
    ) -> Result<GameResult, EngineError> {
        let players = [
            Player::ai(first.0, Symbol::X),
            Player::ai(second.0, Symbol::O),
        ];
        let mut state = GameState::new(size, players.clone())
            .map_err(|e| EngineError::Config(e.to_string()))?;
        opponent.new_game();

        for _ in 0..self.config.random_opening_plies {
            let Some(mv) = state.legal_moves().choose(&mut self.rng) else {
                break;
            };
            self.apply_logged(&mut state, mv)?;
        }

        while !state.status().is_terminal() {
            let tier = if state.current_player().symbol == Symbol::X {
                first.1
            } else {
                second.1
            };
            let chosen = opponent.select_move(&state, tier, self.config.time_budget())?;
            self.apply_logged(&mut state, chosen.best_move)?;
        }

        let status = state.status();
        self.scoreboard.record(&status, &players);
        Ok(match status {
            Status::Won { winner, .. } if winner == Symbol::X => GameResult::Win,
            Status::Won { .. } => GameResult::Loss,
            Status::Tie | Status::Ongoing => GameResult::Draw,
        })
    }

    fn apply_logged(&self, state: &mut GameState, mv: Position) -> Result<(), EngineError> {
        let player = state.current_player().clone();
        state.apply_move(mv)?;
        debug!(
            player = %player.name,
            symbol = %player.symbol,
            mv = %mv,
            "move\n{}",
            state.board()
        );
        Ok(())
    }
}

/// Scoreboard names for both sides; a tier playing itself gets numbered.
pub fn participant_names(tier_a: Difficulty, tier_b: Difficulty) -> (String, String) {
    if tier_a == tier_b {
        (format!("{tier_a}#1"), format!("{tier_b}#2"))
    } else {
        (tier_a.to_string(), tier_b.to_string())
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
