//! Search Engines
//!
//! Three minimax variants over cloned game states:
//! - [`MinimaxEngine`]: exhaustive minimax without pruning (MEDIUM tier)
//! - [`AlphaBetaEngine`]: minimax with alpha-beta pruning (HARD tier)
//! - [`HeuristicEngine`]: iterative deepening alpha-beta with heuristic
//!   cutoffs under a wall-clock deadline (VERY HARD tier)

pub mod eval;
pub mod search;
pub mod symmetry;
pub mod tt;

use tictactoe_core::{Engine, EngineError, GameState, SearchLimits, SearchResult};
use tracing::{debug, warn};

pub use eval::{EvalWeights, Evaluator, HEURISTIC_BOUND, WIN_SCORE};
pub use search::SearchOutcome;
pub use tt::TranspositionTable;

fn ensure_playable(state: &GameState) -> Result<(), EngineError> {
    if state.status().is_terminal() {
        return Err(EngineError::NoLegalMove);
    }
    Ok(())
}

fn into_result(outcome: SearchOutcome, nodes: u64, limits: &SearchLimits) -> SearchResult {
    SearchResult {
        best_move: outcome.best.0,
        score: outcome.best.1,
        depth: outcome.depth,
        nodes,
        elapsed: limits.time_control.elapsed(),
        stopped: outcome.stopped,
    }
}

/// Unpruned minimax, scoring terminal outcomes only.
///
/// `limits.depth` bounds the look-ahead; open positions at the bound count
/// as draws.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for MinimaxEngine {
    fn search(
        &mut self,
        state: &GameState,
        limits: SearchLimits,
    ) -> Result<SearchResult, EngineError> {
        ensure_playable(state)?;
        self.nodes = 0;
        limits.start();

        let outcome = search::pick_minimax(state, limits.depth, &mut self.nodes)?;
        debug!(mv = %outcome.best.0, score = outcome.best.1, depth = outcome.depth, nodes = self.nodes, "minimax");
        Ok(into_result(outcome, self.nodes, &limits))
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Minimax with alpha-beta pruning. Same move as [`MinimaxEngine`] at equal
/// depth, with fewer nodes.
#[derive(Debug, Clone, Default)]
pub struct AlphaBetaEngine {
    nodes: u64,
}

impl AlphaBetaEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for AlphaBetaEngine {
    fn search(
        &mut self,
        state: &GameState,
        limits: SearchLimits,
    ) -> Result<SearchResult, EngineError> {
        ensure_playable(state)?;
        self.nodes = 0;
        limits.start();

        let outcome = search::pick_alpha_beta(state, limits.depth, None, &mut self.nodes)?;
        debug!(mv = %outcome.best.0, score = outcome.best.1, depth = outcome.depth, nodes = self.nodes, "alpha-beta");
        Ok(into_result(outcome, self.nodes, &limits))
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Time-bounded iterative deepening with heuristic evaluation at the cutoff.
///
/// Always returns a legal move on a live game, even when the deadline has
/// already passed on entry.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEngine {
    evaluator: Evaluator,
    nodes: u64,
}

impl HeuristicEngine {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            nodes: 0,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}

impl Engine for HeuristicEngine {
    fn search(
        &mut self,
        state: &GameState,
        limits: SearchLimits,
    ) -> Result<SearchResult, EngineError> {
        ensure_playable(state)?;
        self.nodes = 0;
        limits.start();

        let outcome = search::pick_iterative(
            state,
            limits.depth,
            &self.evaluator,
            &limits.time_control,
            &mut self.nodes,
        )?;
        if outcome.stopped && outcome.depth == 0 {
            warn!(
                budget = ?limits.move_time,
                elapsed = ?limits.time_control.elapsed(),
                "deadline hit before depth 1, using shallow choice"
            );
        }
        debug!(
            mv = %outcome.best.0,
            score = outcome.best.1,
            depth = outcome.depth,
            nodes = self.nodes,
            stopped = outcome.stopped,
            "heuristic search"
        );
        Ok(into_result(outcome, self.nodes, &limits))
    }

    fn name(&self) -> &str {
        "Heuristic v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
