use thiserror::Error;

use crate::types::{Position, Symbol};

/// Why a move was rejected. The game state is left unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMoveError {
    #[error("position {position} is outside the {size}x{size} board")]
    OutOfBounds { position: Position, size: usize },
    #[error("cell {0} is already occupied")]
    Occupied(Position),
    #[error("the game is already over")]
    GameOver,
}

/// Errors raised while setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unsupported board size {0}, expected 3 or 4")]
    UnsupportedBoardSize(usize),
    #[error("both players use the symbol {0}")]
    DuplicateSymbol(Symbol),
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),
}

/// Errors raised by move selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine was asked to move on a finished game.
    #[error("no legal move available")]
    NoLegalMove,
    /// Look-ahead tried to apply a move the game rejected; the search is aborted.
    #[error("search explored an illegal continuation: {0}")]
    IllegalExploration(#[from] InvalidMoveError),
    #[error("invalid engine configuration: {0}")]
    Config(String),
}
