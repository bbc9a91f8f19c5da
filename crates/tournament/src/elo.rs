//! Elo rating calculation and tracking

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Default starting Elo for new tiers
pub const DEFAULT_ELO: f64 = 1500.0;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

/// Elo rating system for tracking tier strength
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EloTracker {
    /// Ratings for each participant
    pub ratings: HashMap<String, f64>,
    /// Number of games played by each participant
    pub games_played: HashMap<String, u32>,
    /// Match history for analysis
    pub history: Vec<MatchRecord>,
}

/// Record of a single match result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub first: String,
    pub second: String,
    pub result: MatchResult,
    pub elo_change: f64,
}

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// The same game seen from the other side
    pub fn flip(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, game: GameResult) {
        match game {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from the first participant's perspective (1 win, 0.5 draw, 0 loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

impl EloTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or initialize a rating
    pub fn get_rating(&mut self, name: &str) -> f64 {
        *self.ratings.entry(name.to_string()).or_insert(DEFAULT_ELO)
    }

    /// Expected score for `first` against `second`
    pub fn expected_score(&mut self, first: &str, second: &str) -> f64 {
        let r1 = self.get_rating(first);
        let r2 = self.get_rating(second);
        1.0 / (1.0 + 10.0_f64.powf((r2 - r1) / 400.0))
    }

    /// Update ratings after a match
    pub fn update_ratings(&mut self, first: &str, second: &str, result: &MatchResult) {
        let expected = self.expected_score(first, second);
        let actual = result.score();

        let games = result.total_games() as f64;
        let elo_change = K_FACTOR * games * (actual - expected);

        let r1 = self.get_rating(first);
        let r2 = self.get_rating(second);
        self.ratings.insert(first.to_string(), r1 + elo_change);
        self.ratings.insert(second.to_string(), r2 - elo_change);

        *self.games_played.entry(first.to_string()).or_insert(0) += result.total_games();
        *self.games_played.entry(second.to_string()).or_insert(0) += result.total_games();

        self.history.push(MatchRecord {
            first: first.to_string(),
            second: second.to_string(),
            result: *result,
            elo_change,
        });
    }

    /// Sorted leaderboard, highest rating first
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(name, &rating)| {
                let games = self.games_played.get(name).copied().unwrap_or(0);
                (name.clone(), rating, games)
            })
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn format_leaderboard(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Tier Leaderboard ===\n");
        let _ = writeln!(out, "{:<20} {:>8} {:>8}", "Tier", "Elo", "Games");
        out.push_str(&"-".repeat(40));
        out.push('\n');
        for (name, rating, games) in self.leaderboard() {
            let _ = writeln!(out, "{:<20} {:>8.1} {:>8}", name, rating, games);
        }
        out
    }
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
