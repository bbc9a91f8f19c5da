pub mod board;
pub mod error;
pub mod game;
pub mod time_control;
pub mod types;

use std::time::Duration;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use game::*;
pub use time_control::*;
pub use types::*;

/// Starts a match on an empty `board_size` x `board_size` board.
///
/// `player_symbols[0]` moves first. Both players start out human; use
/// [`GameState::new`] to name players or flag one as the AI.
pub fn new_game(board_size: usize, player_symbols: [Symbol; 2]) -> Result<GameState, GameError> {
    let size = BoardSize::try_from(board_size)?;
    let [first, second] = player_symbols;
    GameState::new(
        size,
        [
            Player::human("Player 1", first),
            Player::human("Player 2", second),
        ],
    )
}

/// Applies a move for whichever player is to move.
pub fn apply_move(state: &mut GameState, position: Position) -> Result<Status, InvalidMoveError> {
    state.apply_move(position)
}

pub fn legal_moves(state: &GameState) -> LegalMoves<'_> {
    state.legal_moves()
}

// =============================================================================
// Engine trait, implemented by every AI tier
// =============================================================================

/// Result of one move selection. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move, always one of `legal_moves()`
    pub best_move: Position,
    /// Score of the chosen move from the mover's perspective (0 when not evaluated)
    pub score: i32,
    /// Deepest completed search depth in plies
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Wall-clock time spent
    pub elapsed: Duration,
    /// Whether the search was cut short by its deadline
    pub stopped: bool,
}

/// Move selection strategy for the side to move.
///
/// Engines read the state and explore on private clones; the caller applies
/// the returned move to the live game.
pub trait Engine: Send {
    /// Selects a move for `state.current_player()` within `limits`.
    ///
    /// Fails with [`EngineError::NoLegalMove`] on a finished game.
    fn search(&mut self, state: &GameState, limits: SearchLimits)
    -> Result<SearchResult, EngineError>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
