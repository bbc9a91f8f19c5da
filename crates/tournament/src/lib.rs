//! Tournament Runner for tic-tac-toe AI tiers
//!
//! This crate provides infrastructure for:
//! - Playing matches between difficulty tiers
//! - Keeping an in-memory scoreboard of points, wins and games
//! - Rating tiers with Elo to check EASY < MEDIUM < HARD < VERY HARD
//!
//! # Usage
//!
//! ```bash
//! # Run a match between two tiers
//! cargo run -p tournament -- match hard medium --games 100
//!
//! # Round robin of every tier on the 4x4 board
//! cargo run -p tournament -- ladder --size 4 --games 10 --budget-ms 200
//! ```

mod elo;
mod match_runner;
mod results;
mod scoreboard;

pub use elo::*;
pub use match_runner::*;
pub use results::*;
pub use scoreboard::*;
