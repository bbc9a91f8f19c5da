use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, InvalidMoveError};
use crate::types::*;

/// Largest supported board, 4x4.
pub const MAX_CELLS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Symbol),
}

impl Cell {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(s) => Some(s),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// N×N grid of cells stored row-major in a fixed array.
///
/// The array is owned inline, so cloning a board never shares storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    cells: [Cell; MAX_CELLS],
}

impl Board {
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: [Cell::Empty; MAX_CELLS],
        }
    }

    /// Builds a board cell by cell in row-major order.
    pub fn from_fn(size: BoardSize, mut f: impl FnMut(Position) -> Cell) -> Self {
        let mut board = Board::new(size);
        for i in 0..size.cells() {
            board.cells[i] = f(Position::from_index(i, size));
        }
        board
    }

    /// Parses a row-major layout such as `"XX./.O./..."`.
    ///
    /// `.`, `_` and `-` are empty cells, whitespace and `/` are ignored, and any
    /// other character is taken as a symbol. The size follows from the number
    /// of cells (9 or 16).
    pub fn parse(layout: &str) -> Result<Self, GameError> {
        let cells: Vec<Cell> = layout
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .map(|c| match c {
                '.' | '_' | '-' => Cell::Empty,
                other => Cell::Occupied(Symbol::new(other)),
            })
            .collect();

        let size = match cells.len() {
            9 => BoardSize::Three,
            16 => BoardSize::Four,
            n => {
                return Err(GameError::InvalidLayout(format!(
                    "expected 9 or 16 cells, found {n}"
                )));
            }
        };

        let mut board = Board::new(size);
        board.cells[..cells.len()].copy_from_slice(&cells);
        Ok(board)
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        pos.is_within(self.size)
            .then(|| self.cells[pos.index(self.size)])
    }

    /// Cell at an in-bounds position; empty for anything outside the board.
    pub fn cell(&self, pos: Position) -> Cell {
        self.get(pos).unwrap_or(Cell::Empty)
    }

    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), InvalidMoveError> {
        if !pos.is_within(self.size) {
            return Err(InvalidMoveError::OutOfBounds {
                position: pos,
                size: self.size.n(),
            });
        }
        self.cells[pos.index(self.size)] = cell;
        Ok(())
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.size.cells()]
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size.cells()).map(move |i| Position::from_index(i, size))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells().iter().filter(|c| !c.is_empty()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.size.cells() - self.occupied_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells().iter().all(|c| !c.is_empty())
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells()
            .iter()
            .filter(|c| **c == Cell::Occupied(symbol))
            .count()
    }

    pub fn line_cells(&self, line: Line) -> impl Iterator<Item = Cell> + '_ {
        line.positions().map(move |p| self.cell(p))
    }

    /// The symbol filling a line, if the whole line holds one symbol.
    pub fn line_owner(&self, line: Line) -> Option<Symbol> {
        let mut cells = self.line_cells(line);
        let first = cells.next()?.symbol()?;
        cells.all(|c| c == Cell::Occupied(first)).then_some(first)
    }

    /// First completed line in scan order (rows, columns, diagonals).
    pub fn winning_line(&self) -> Option<(Symbol, Line)> {
        Line::all(self.size).find_map(|line| self.line_owner(line).map(|s| (s, line)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size.n();
        for (i, cell) in self.cells().iter().enumerate() {
            let c = cell.symbol().map(Symbol::as_char).unwrap_or('.');
            write!(f, "{c}")?;
            if i % n == n - 1 && i + 1 < self.size.cells() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
