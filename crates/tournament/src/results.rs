//! Tournament results and reporting

use serde::{Deserialize, Serialize};

use crate::elo::MatchResult;
use crate::match_runner::MatchConfig;
use crate::scoreboard::Scoreboard;

/// Complete tournament results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name/description of the tournament
    pub name: String,
    /// Participating tiers
    pub participants: Vec<String>,
    /// All match results in play order
    pub matches: Vec<MatchEntry>,
    /// Configuration used
    pub config: MatchConfig,
    /// Standings after the last match
    pub scoreboard: Scoreboard,
}

/// A single match entry in the tournament
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub first: String,
    pub second: String,
    pub result: MatchResult,
}

impl TournamentResults {
    pub fn new(name: &str, participants: Vec<String>, config: MatchConfig) -> Self {
        Self {
            name: name.to_string(),
            participants,
            matches: Vec::new(),
            config,
            scoreboard: Scoreboard::new(),
        }
    }

    pub fn add_match(&mut self, first: &str, second: &str, result: MatchResult) {
        self.matches.push(MatchEntry {
            first: first.to_string(),
            second: second.to_string(),
            result,
        });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        report.push_str(&format!(
            "Config: {} games/match, {}x{} board\n\n",
            self.config.num_games, self.config.board_size, self.config.board_size
        ));

        report.push_str("Results:\n");
        report.push_str(&format!(
            "{:<12} vs {:<12} {:>5}-{:<5}-{:<5}\n",
            "Tier 1", "Tier 2", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(48));
        report.push('\n');

        for entry in &self.matches {
            report.push_str(&format!(
                "{:<12} vs {:<12} {:>5}-{:<5}-{:<5}\n",
                entry.first, entry.second, entry.result.wins, entry.result.losses, entry.result.draws
            ));
        }

        report.push_str("\nStandings:\n");
        report.push_str(&self.scoreboard.format_ranking());
        report
    }
}
