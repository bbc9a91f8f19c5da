use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::{Board, Cell};
use crate::error::{GameError, InvalidMoveError};
use crate::types::*;

/// Outcome of a game so far. `Won` and `Tie` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Won { winner: Symbol, line: Line },
    Tie,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Ongoing)
    }

    pub fn winner(&self) -> Option<Symbol> {
        match self {
            Status::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

/// A match in progress: the board plus turn and status bookkeeping.
///
/// Every change goes through [`GameState::apply_move`]. Clones are fully
/// independent boards; only the immutable player list is shared.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    players: Arc<[Player; 2]>,
    current: usize,
    move_count: usize,
    status: Status,
    last_move: Option<Position>,
}

impl GameState {
    /// Creates an empty board. `players[0]` moves first.
    pub fn new(size: BoardSize, players: [Player; 2]) -> Result<Self, GameError> {
        ensure_distinct(&players)?;
        Ok(Self {
            board: Board::new(size),
            players: Arc::new(players),
            current: 0,
            move_count: 0,
            status: Status::Ongoing,
            last_move: None,
        })
    }

    /// Builds a state from a layout string (see [`Board::parse`]) with `to_move`
    /// as the side to play. Turn order is not checked against piece counts.
    pub fn from_layout(
        layout: &str,
        players: [Player; 2],
        to_move: Symbol,
    ) -> Result<Self, GameError> {
        ensure_distinct(&players)?;
        let board = Board::parse(layout)?;

        if let Some(stray) = board
            .cells()
            .iter()
            .filter_map(|c| c.symbol())
            .find(|s| players.iter().all(|p| p.symbol != *s))
        {
            return Err(GameError::InvalidLayout(format!(
                "symbol {stray} does not belong to either player"
            )));
        }

        let current = players
            .iter()
            .position(|p| p.symbol == to_move)
            .ok_or_else(|| {
                GameError::InvalidLayout(format!("side to move {to_move} is not a player"))
            })?;

        let mut state = Self {
            move_count: board.occupied_count(),
            board,
            players: Arc::new(players),
            current,
            status: Status::Ongoing,
            last_move: None,
        };
        state.status = state.check_terminal();
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[1 - self.current]
    }

    pub fn player(&self, symbol: Symbol) -> Option<&Player> {
        self.players.iter().find(|p| p.symbol == symbol)
    }

    /// Places the current player's symbol at `position`.
    ///
    /// Rejected moves leave the state untouched.
    pub fn apply_move(&mut self, position: Position) -> Result<Status, InvalidMoveError> {
        if self.status.is_terminal() {
            return Err(InvalidMoveError::GameOver);
        }
        match self.board.get(position) {
            None => {
                return Err(InvalidMoveError::OutOfBounds {
                    position,
                    size: self.size().n(),
                });
            }
            Some(Cell::Occupied(_)) => return Err(InvalidMoveError::Occupied(position)),
            Some(Cell::Empty) => {}
        }

        let symbol = self.current_player().symbol;
        self.board.set(position, Cell::Occupied(symbol))?;
        self.move_count += 1;
        self.last_move = Some(position);
        self.status = self.check_terminal();
        if !self.status.is_terminal() {
            self.current = 1 - self.current;
        }

        trace!(%position, %symbol, status = ?self.status, "move applied");
        Ok(self.status)
    }

    /// Empty cells in row-major order; nothing once the game is over.
    pub fn legal_moves(&self) -> LegalMoves<'_> {
        let end = if self.status.is_terminal() {
            0
        } else {
            self.size().cells()
        };
        LegalMoves {
            board: &self.board,
            next: 0,
            end,
        }
    }

    /// Recomputes the status from the board. A completed line wins even when
    /// the same move fills the board.
    pub fn check_terminal(&self) -> Status {
        if let Some((winner, line)) = self.board.winning_line() {
            Status::Won { winner, line }
        } else if self.move_count == self.size().cells() {
            Status::Tie
        } else {
            Status::Ongoing
        }
    }

    /// True when every line already holds both symbols, so neither player can
    /// still win. Does not change the status: a tie needs a full board.
    pub fn is_dead_draw(&self) -> bool {
        match self.status {
            Status::Won { .. } => false,
            Status::Tie => true,
            Status::Ongoing => Line::all(self.size()).all(|line| {
                let mut owners = self.board.line_cells(line).filter_map(|c| c.symbol());
                match owners.next() {
                    Some(first) => owners.any(|s| s != first),
                    None => false,
                }
            }),
        }
    }

    /// Clears the board for a new match with the same players.
    pub fn reset(&mut self) {
        self.board = Board::new(self.size());
        self.current = 0;
        self.move_count = 0;
        self.status = Status::Ongoing;
        self.last_move = None;
    }
}

fn ensure_distinct(players: &[Player; 2]) -> Result<(), GameError> {
    if players[0].symbol == players[1].symbol {
        return Err(GameError::DuplicateSymbol(players[0].symbol));
    }
    Ok(())
}

/// Lazy row-major iterator over empty cells. Clone it to restart.
#[derive(Clone, Debug)]
pub struct LegalMoves<'a> {
    board: &'a Board,
    next: usize,
    end: usize,
}

impl Iterator for LegalMoves<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let size = self.board.size();
        while self.next < self.end {
            let pos = Position::from_index(self.next, size);
            self.next += 1;
            if self.board.cell(pos).is_empty() {
                return Some(pos);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.next))
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
