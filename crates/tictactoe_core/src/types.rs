use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Opaque per-player marker placed on the board.
///
/// The character is only an identity; nothing in the core assumes `X` or `O`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(char);

impl Symbol {
    pub const X: Symbol = Symbol('X');
    pub const O: Symbol = Symbol('O');

    pub const fn new(c: char) -> Self {
        Symbol(c)
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub symbol: Symbol,
    pub name: String,
    pub is_ai: bool,
}

impl Player {
    pub fn human(name: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            symbol,
            name: name.into(),
            is_ai: false,
        }
    }

    pub fn ai(name: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            symbol,
            name: name.into(),
            is_ai: true,
        }
    }
}

/// Supported board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    Three,
    Four,
}

impl BoardSize {
    /// Side length N.
    pub const fn n(self) -> usize {
        match self {
            BoardSize::Three => 3,
            BoardSize::Four => 4,
        }
    }

    /// Number of cells, N².
    pub const fn cells(self) -> usize {
        self.n() * self.n()
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = GameError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            3 => Ok(BoardSize::Three),
            4 => Ok(BoardSize::Four),
            other => Err(GameError::UnsupportedBoardSize(other)),
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.n();
        write!(f, "{n}x{n}")
    }
}

/// A cell coordinate, 0-indexed. Ordering is row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_within(self, size: BoardSize) -> bool {
        self.row < size.n() && self.col < size.n()
    }

    /// Row-major index. Caller must have checked bounds.
    pub fn index(self, size: BoardSize) -> usize {
        self.row * size.n() + self.col
    }

    pub fn from_index(index: usize, size: BoardSize) -> Self {
        Self {
            row: index / size.n(),
            col: index % size.n(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

/// Which row, column, or diagonal a line is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    Diagonal,
    AntiDiagonal,
}

/// One of the 2N + 2 lines that win the game when filled by one symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub kind: LineKind,
    pub size: BoardSize,
}

impl Line {
    /// All lines of a board: rows, then columns, then the two diagonals.
    pub fn all(size: BoardSize) -> impl Iterator<Item = Line> {
        let n = size.n();
        (0..n)
            .map(LineKind::Row)
            .chain((0..n).map(LineKind::Column))
            .chain([LineKind::Diagonal, LineKind::AntiDiagonal])
            .map(move |kind| Line { kind, size })
    }

    pub fn positions(self) -> impl Iterator<Item = Position> {
        let n = self.size.n();
        let kind = self.kind;
        (0..n).map(move |i| match kind {
            LineKind::Row(r) => Position::new(r, i),
            LineKind::Column(c) => Position::new(i, c),
            LineKind::Diagonal => Position::new(i, i),
            LineKind::AntiDiagonal => Position::new(i, n - 1 - i),
        })
    }

    pub fn contains(self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }
}
