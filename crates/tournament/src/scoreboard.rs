//! In-memory player standings
//!
//! A win is worth 3 points, a tie 1 point to each side. Counters wrap like a
//! fixed-width display: score and games at 1000, wins at 100.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tictactoe_core::{Player, Status};

pub const WIN_POINTS: u32 = 3;
pub const TIE_POINTS: u32 = 1;

const SCORE_WRAP: u32 = 1000;
const GAMES_WRAP: u32 = 1000;
const WINS_WRAP: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub score: u32,
    pub wins: u32,
    pub games: u32,
}

impl Standing {
    /// Wins per game in percent, rounded to two decimals. 0 before any game.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let rate = f64::from(self.wins) / f64::from(self.games) * 100.0;
        (rate * 100.0).round() / 100.0
    }

    fn add_game(&mut self, points: u32, won: bool) {
        self.score = (self.score + points) % SCORE_WRAP;
        self.games = (self.games + 1) % GAMES_WRAP;
        if won {
            self.wins = (self.wins + 1) % WINS_WRAP;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    standings: BTreeMap<String, Standing>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits a finished game to both players. Ongoing games are ignored.
    pub fn record(&mut self, outcome: &Status, players: &[Player; 2]) {
        match outcome {
            Status::Ongoing => {}
            Status::Tie => {
                for player in players {
                    self.entry(player).add_game(TIE_POINTS, false);
                }
            }
            Status::Won { winner, .. } => {
                for player in players {
                    let won = player.symbol == *winner;
                    let points = if won { WIN_POINTS } else { 0 };
                    self.entry(player).add_game(points, won);
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Standing> {
        self.standings.get(name)
    }

    /// Standings ordered by win rate, then score, best first.
    pub fn ranking(&self) -> Vec<(&str, Standing)> {
        let mut rows: Vec<(&str, Standing)> = self
            .standings
            .iter()
            .map(|(name, standing)| (name.as_str(), *standing))
            .collect();
        rows.sort_by(|a, b| {
            b.1.win_rate()
                .total_cmp(&a.1.win_rate())
                .then(b.1.score.cmp(&a.1.score))
        });
        rows
    }

    pub fn format_ranking(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<4} {:<20} {:>6} {:>6} {:>6} {:>9}",
            "Pos", "Player", "Games", "Wins", "Score", "Rate"
        );
        out.push_str(&"-".repeat(56));
        out.push('\n');
        for (pos, (name, s)) in self.ranking().into_iter().enumerate() {
            let _ = writeln!(
                out,
                "{:<4} {:<20} {:>6} {:>6} {:>6} {:>7.2} %",
                pos + 1,
                name,
                s.games,
                s.wins,
                s.score,
                s.win_rate()
            );
        }
        out
    }

    fn entry(&mut self, player: &Player) -> &mut Standing {
        self.standings.entry(player.name.clone()).or_default()
    }
}

#[cfg(test)]
#[path = "scoreboard_tests.rs"]
mod scoreboard_tests;
