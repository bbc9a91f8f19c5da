//! Position scoring for the pruned and heuristic search tiers.
//!
//! All functions are pure: the score depends only on the board snapshot and
//! the perspective symbol, never on move history or turn order. Any symbol
//! other than the perspective counts as the opponent.

use serde::{Deserialize, Serialize};
use tictactoe_core::{Board, BoardSize, Cell, Line, LineKind, Position, Status, Symbol};

/// Base score of a won game, before the depth adjustment.
pub const WIN_SCORE: i32 = 10_000;

/// Heuristic scores stay strictly inside this bound, so any proven win or
/// loss within the search horizon outranks every heuristic estimate.
pub const HEURISTIC_BOUND: i32 = WIN_SCORE / 2;

/// Scores a finished (or still ongoing) game for `perspective`.
///
/// Wins found `ply` moves from the root score `WIN_SCORE - ply` and losses
/// `-WIN_SCORE + ply`, so faster wins and slower losses are preferred.
/// Ties and ongoing games score 0.
pub fn score_terminal(status: &Status, perspective: Symbol, ply: u8) -> i32 {
    match status {
        Status::Won { winner, .. } if *winner == perspective => WIN_SCORE - i32::from(ply),
        Status::Won { .. } => -WIN_SCORE + i32::from(ply),
        Status::Tie | Status::Ongoing => 0,
    }
}

/// Tunable weights of the heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Occupying a central cell
    pub center: i32,
    /// Occupying a corner
    pub corner: i32,
    /// Occupying any other border cell
    pub edge: i32,
    /// Per own mark in a line the opponent has not touched
    pub line_unit: i32,
    /// Extra for a line one mark short of complete with its last cell empty
    pub threat: i32,
    /// Per mark spent in a line both players hold
    pub blocked_penalty: i32,
    /// Percentage added to line credit for the diagonals and, on odd boards,
    /// the middle row and column
    pub axis_bonus: i32,
    /// Per threat beyond the first (fork)
    pub fork: i32,
    /// Per empty cell that would extend two or more open lines at once
    pub fork_point: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            center: 4,
            corner: 3,
            edge: 1,
            line_unit: 10,
            threat: 60,
            blocked_penalty: 4,
            axis_bonus: 25,
            fork: 150,
            fork_point: 15,
        }
    }
}

impl EvalWeights {
    /// Every weight with its config key.
    pub fn named(&self) -> [(&'static str, i32); 9] {
        [
            ("center", self.center),
            ("corner", self.corner),
            ("edge", self.edge),
            ("line_unit", self.line_unit),
            ("threat", self.threat),
            ("blocked_penalty", self.blocked_penalty),
            ("axis_bonus", self.axis_bonus),
            ("fork", self.fork),
            ("fork_point", self.fork_point),
        ]
    }
}

/// Heuristic evaluator. Holds only its weights.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    pub fn score_terminal(&self, status: &Status, perspective: Symbol, ply: u8) -> i32 {
        score_terminal(status, perspective, ply)
    }

    /// Estimates a non-terminal position for `perspective`.
    ///
    /// Sum of positional weights, line potential (with the symmetry-axis
    /// bonus), and the fork boost, clamped inside [`HEURISTIC_BOUND`]. Every
    /// component is invariant under rotation and reflection, so boards
    /// reachable from each other by a symmetry always score the same.
    pub fn score_heuristic(&self, board: &Board, perspective: Symbol) -> i32 {
        let raw = self.positional(board, perspective)
            + self.line_potential(board, perspective)
            + self.boost(board, perspective);
        raw.clamp(-(HEURISTIC_BOUND - 1), HEURISTIC_BOUND - 1)
    }

    /// Weight table: center and corners above other border cells.
    pub fn cell_weight(&self, pos: Position, size: BoardSize) -> i32 {
        if is_center(pos, size) {
            self.weights.center
        } else if is_corner(pos, size) {
            self.weights.corner
        } else {
            self.weights.edge
        }
    }

    /// Own cell weights minus the opponent's.
    pub fn positional(&self, board: &Board, perspective: Symbol) -> i32 {
        board
            .positions()
            .map(|pos| {
                let w = self.cell_weight(pos, board.size());
                match board.cell(pos) {
                    Cell::Empty => 0,
                    Cell::Occupied(s) if s == perspective => w,
                    Cell::Occupied(_) => -w,
                }
            })
            .sum()
    }

    /// Credit for lines still open to one side, penalty for marks in lines
    /// both sides hold.
    pub fn line_potential(&self, board: &Board, perspective: Symbol) -> i32 {
        let n = board.size().n();
        Line::all(board.size())
            .map(|line| {
                let counts = LineCounts::of(board, line, perspective);
                let score = match (counts.own, counts.opponent) {
                    (0, 0) => 0,
                    (own, 0) => self.open_line_credit(own, n),
                    (0, opp) => -self.open_line_credit(opp, n),
                    (own, opp) => self.weights.blocked_penalty * (opp as i32 - own as i32),
                };
                if is_axis(line) {
                    score * (100 + self.weights.axis_bonus) / 100
                } else {
                    score
                }
            })
            .sum()
    }

    /// Fork adjustment: rewards holding two or more simultaneous threats and
    /// empty cells that would extend two or more open lines. Mirrored for the
    /// opponent.
    pub fn boost(&self, board: &Board, perspective: Symbol) -> i32 {
        let lines: Vec<(Line, LineCounts)> = Line::all(board.size())
            .map(|line| (line, LineCounts::of(board, line, perspective)))
            .collect();

        let n = board.size().n();
        let own_threats = lines
            .iter()
            .filter(|(_, c)| c.own == n - 1 && c.opponent == 0)
            .count() as i32;
        let opp_threats = lines
            .iter()
            .filter(|(_, c)| c.opponent == n - 1 && c.own == 0)
            .count() as i32;

        let mut score = self.weights.fork * ((own_threats - 1).max(0) - (opp_threats - 1).max(0));

        for pos in board.positions().filter(|p| board.cell(*p).is_empty()) {
            let through = || lines.iter().filter(move |(line, _)| line.contains(pos));
            let own_open = through().filter(|(_, c)| c.own > 0 && c.opponent == 0).count();
            let opp_open = through().filter(|(_, c)| c.opponent > 0 && c.own == 0).count();
            if own_open >= 2 {
                score += self.weights.fork_point;
            }
            if opp_open >= 2 {
                score -= self.weights.fork_point;
            }
        }
        score
    }

    fn open_line_credit(&self, marks: usize, n: usize) -> i32 {
        let mut credit = self.weights.line_unit * marks as i32;
        if marks == n - 1 {
            credit += self.weights.threat;
        }
        credit
    }
}

#[derive(Debug, Clone, Copy)]
struct LineCounts {
    own: usize,
    opponent: usize,
}

impl LineCounts {
    fn of(board: &Board, line: Line, perspective: Symbol) -> Self {
        let mut counts = LineCounts {
            own: 0,
            opponent: 0,
        };
        for cell in board.line_cells(line) {
            match cell {
                Cell::Empty => {}
                Cell::Occupied(s) if s == perspective => counts.own += 1,
                Cell::Occupied(_) => counts.opponent += 1,
            }
        }
        counts
    }
}

/// The middle cell on odd boards, the central 2x2 block on even ones.
pub(crate) fn is_center(pos: Position, size: BoardSize) -> bool {
    let n = size.n();
    let mid = n / 2;
    if n % 2 == 1 {
        pos.row == mid && pos.col == mid
    } else {
        (mid - 1..=mid).contains(&pos.row) && (mid - 1..=mid).contains(&pos.col)
    }
}

pub(crate) fn is_corner(pos: Position, size: BoardSize) -> bool {
    let last = size.n() - 1;
    (pos.row == 0 || pos.row == last) && (pos.col == 0 || pos.col == last)
}

fn is_axis(line: Line) -> bool {
    let n = line.size.n();
    match line.kind {
        LineKind::Diagonal | LineKind::AntiDiagonal => true,
        LineKind::Row(i) | LineKind::Column(i) => n % 2 == 1 && i == n / 2,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
