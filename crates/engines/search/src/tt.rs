//! Transposition table for one root search
//!
//! Entries are keyed by the canonical board (see [`crate::symmetry`]) plus the
//! side to move, so transpositions and rotated or reflected copies of a
//! position share one entry. Scores are ply-adjusted from the root; this is
//! sound because a board with k marks is always k minus the root's marks plies
//! deep. A table must not outlive the root it was filled from.

use std::collections::HashMap;

use tictactoe_core::{Position, Symbol};

use crate::symmetry::BoardKey;

/// How a stored score relates to the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window
    Exact,
    /// True value >= score (the node failed high)
    Lower,
    /// True value <= score (the node failed low)
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TtKey {
    pub board: BoardKey,
    pub to_move: Symbol,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    /// Remaining depth the score was searched to
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    /// Best reply, in canonical board coordinates
    pub best_move: Option<Position>,
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<TtKey, TtEntry>,
    hits: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score usable for a search of `depth` plies in the window
    /// `(alpha, beta)`, if one is stored.
    pub fn lookup(&mut self, key: &TtKey, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entries.get(key)?;
        if entry.depth < depth {
            return None;
        }
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => entry.score >= beta,
            Bound::Upper => entry.score <= alpha,
        };
        if usable {
            self.hits += 1;
            Some(entry.score)
        } else {
            None
        }
    }

    /// Stored best reply for move ordering, whatever its depth.
    pub fn best_move(&self, key: &TtKey) -> Option<Position> {
        self.entries.get(key).and_then(|e| e.best_move)
    }

    /// Depth-preferred replacement: a shallower result never overwrites a
    /// deeper one.
    pub fn store(&mut self, key: TtKey, entry: TtEntry) {
        match self.entries.get(&key) {
            Some(old) if old.depth > entry.depth => {}
            _ => {
                self.entries.insert(key, entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups that returned a usable score.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}
