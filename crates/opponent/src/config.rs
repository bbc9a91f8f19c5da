//! Tunable constants of the AI tiers.
//!
//! Every key is optional in TOML; missing keys keep their defaults:
//!
//! ```toml
//! [medium]
//! error_rate = 0.2
//! depth_4x4 = 3
//!
//! [hard]
//! depth_4x4 = 4
//!
//! [very_hard]
//! time_budget_ms = 2500
//! max_depth_4x4 = 16
//!
//! [weights]
//! fork = 150
//! ```

use std::time::Duration;

use search_engine::EvalWeights;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tictactoe_core::{BoardSize, EngineError};

use crate::difficulty::Difficulty;

/// Largest accepted magnitude of a heuristic weight. Keeps every heuristic
/// sum well inside `i32`.
pub const MAX_WEIGHT: i32 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse AI config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("MEDIUM error rate {0} is outside [0, 1]")]
    ErrorRate(f64),
    #[error("{0} search depth must be at least 1")]
    ZeroDepth(Difficulty),
    #[error("weight {name} = {value} is outside [-10000, 10000]")]
    Weight { name: &'static str, value: i32 },
    #[error("unknown difficulty '{0}', expected easy, medium, hard or very-hard")]
    UnknownDifficulty(String),
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediumConfig {
    /// Probability of replacing the minimax answer with a random move
    pub error_rate: f64,
    /// Look-ahead on 4x4; 3x3 is always searched to the end
    pub depth_4x4: u8,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            error_rate: 0.2,
            depth_4x4: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardConfig {
    pub depth_4x4: u8,
}

impl Default for HardConfig {
    fn default() -> Self {
        Self { depth_4x4: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeryHardConfig {
    /// Budget used when the caller passes none
    pub time_budget_ms: u64,
    pub max_depth_4x4: u8,
}

impl Default for VeryHardConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 2500,
            max_depth_4x4: 16,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub medium: MediumConfig,
    pub hard: HardConfig,
    pub very_hard: VeryHardConfig,
    pub weights: EvalWeights,
}

impl AiConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.medium.error_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::ErrorRate(rate));
        }
        if self.medium.depth_4x4 == 0 {
            return Err(ConfigError::ZeroDepth(Difficulty::Medium));
        }
        if self.hard.depth_4x4 == 0 {
            return Err(ConfigError::ZeroDepth(Difficulty::Hard));
        }
        if self.very_hard.max_depth_4x4 == 0 {
            return Err(ConfigError::ZeroDepth(Difficulty::VeryHard));
        }
        if let Some((name, value)) = self
            .weights
            .named()
            .into_iter()
            .find(|(_, w)| w.unsigned_abs() > MAX_WEIGHT.unsigned_abs())
        {
            return Err(ConfigError::Weight { name, value });
        }
        Ok(())
    }

    /// Look-ahead in plies for a searching tier. 3x3 boards are always
    /// searched to terminal states; EASY never searches.
    pub fn search_depth(&self, difficulty: Difficulty, size: BoardSize) -> u8 {
        match (difficulty, size) {
            (Difficulty::Easy, _) => 0,
            (_, BoardSize::Three) => u8::MAX,
            (Difficulty::Medium, BoardSize::Four) => self.medium.depth_4x4,
            (Difficulty::Hard, BoardSize::Four) => self.hard.depth_4x4,
            (Difficulty::VeryHard, BoardSize::Four) => self.very_hard.max_depth_4x4,
        }
    }

    pub fn default_time_budget(&self) -> Duration {
        Duration::from_millis(self.very_hard.time_budget_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
