//! Rotation/reflection symmetry (the dihedral group D4) of square boards.
//!
//! Boards related by one of the eight transforms have the same game value,
//! so search can explore one representative of each class.

use tictactoe_core::{Board, Cell, Position, MAX_CELLS};

/// A D4 transform: optional left-right mirror, then clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    quarter_turns: u8,
    reflect: bool,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        quarter_turns: 0,
        reflect: false,
    };

    /// All 8 transforms, identity first.
    pub fn all() -> [Transform; 8] {
        let mut out = [Transform::IDENTITY; 8];
        for (i, t) in out.iter_mut().enumerate() {
            *t = Transform {
                quarter_turns: (i / 2) as u8,
                reflect: i % 2 == 1,
            };
        }
        out
    }

    pub fn inverse(self) -> Transform {
        if self.reflect {
            // a mirror followed by a rotation is itself a mirror
            self
        } else {
            Transform {
                quarter_turns: (4 - self.quarter_turns) % 4,
                reflect: false,
            }
        }
    }

    /// Image of `pos` on an `n`x`n` board.
    pub fn apply(self, pos: Position, n: usize) -> Position {
        let (mut row, mut col) = (pos.row, pos.col);
        if self.reflect {
            col = n - 1 - col;
        }
        for _ in 0..self.quarter_turns {
            (row, col) = (col, n - 1 - row);
        }
        Position::new(row, col)
    }

    pub fn apply_to_board(self, board: &Board) -> Board {
        let n = board.size().n();
        let inverse = self.inverse();
        Board::from_fn(board.size(), |pos| board.cell(inverse.apply(pos, n)))
    }
}

/// Comparable encoding of a board's cells.
pub type BoardKey = [u32; MAX_CELLS];

fn key(board: &Board) -> BoardKey {
    let mut out = [0; MAX_CELLS];
    for (slot, cell) in out.iter_mut().zip(board.cells()) {
        *slot = match cell {
            Cell::Empty => 0,
            Cell::Occupied(s) => u32::from(s.as_char()) + 1,
        };
    }
    out
}

/// Smallest key over the board's symmetry class. Equal for two boards
/// exactly when one is a rotation or reflection of the other.
pub fn canonical_key(board: &Board) -> BoardKey {
    canonical_form(board).0
}

/// Canonical key plus a transform taking the board onto it. A cell `pos` of
/// the board sits at `transform.apply(pos, n)` on the canonical board.
pub fn canonical_form(board: &Board) -> (BoardKey, Transform) {
    let mut best = (key(board), Transform::IDENTITY);
    for t in Transform::all().into_iter().skip(1) {
        let k = key(&t.apply_to_board(board));
        if k < best.0 {
            best = (k, t);
        }
    }
    best
}

pub fn equivalent(a: &Board, b: &Board) -> bool {
    a.size() == b.size() && canonical_key(a) == canonical_key(b)
}
