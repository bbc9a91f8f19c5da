//! Minimax search over cloned game states
//!
//! Every branch clones the state and applies the move through
//! `GameState::apply_move`, so the caller's state is never touched. Root moves
//! are tried in row-major order and a later move must score strictly higher
//! to replace the current best, which makes the lowest-index move win ties.

use tictactoe_core::{BoardSize, EngineError, GameState, Position, Symbol, TimeControl};
use tracing::trace;

use crate::eval::{is_center, is_corner, score_terminal, Evaluator, WIN_SCORE};
use crate::symmetry::{canonical_form, canonical_key, BoardKey};
use crate::tt::{Bound, TranspositionTable, TtEntry, TtKey};

const INF: i32 = i32::MAX / 2;

/// Result of a root search.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Chosen move and its score from the mover's perspective
    pub best: (Position, i32),
    /// Deepest fully completed depth in plies
    pub depth: u8,
    /// True if the deadline cut the search short
    pub stopped: bool,
}

fn play(state: &GameState, mv: Position) -> Result<GameState, EngineError> {
    let mut child = state.clone();
    child.apply_move(mv)?;
    Ok(child)
}

fn depth_to_end(state: &GameState, depth: u8) -> u8 {
    let empties = u8::try_from(state.board().empty_count()).unwrap_or(u8::MAX);
    depth.min(empties)
}

// =============================================================================
// Unpruned minimax
// =============================================================================

/// Plain minimax to `depth` plies, scoring only terminal outcomes.
///
/// Positions still open at the depth limit count as draws.
pub fn pick_minimax(
    state: &GameState,
    depth: u8,
    nodes: &mut u64,
) -> Result<SearchOutcome, EngineError> {
    let perspective = state.current_player().symbol;
    let depth = depth_to_end(state, depth);
    let mut best: Option<(Position, i32)> = None;

    for mv in state.legal_moves() {
        let child = play(state, mv)?;
        *nodes += 1;
        let score = minimax(&child, depth.saturating_sub(1), 1, perspective, nodes)?;
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((mv, score));
        }
    }

    let best = best.ok_or(EngineError::NoLegalMove)?;
    Ok(SearchOutcome {
        best,
        depth,
        stopped: false,
    })
}

fn minimax(
    state: &GameState,
    depth: u8,
    ply: u8,
    perspective: Symbol,
    nodes: &mut u64,
) -> Result<i32, EngineError> {
    let status = state.status();
    if status.is_terminal() {
        return Ok(score_terminal(&status, perspective, ply));
    }
    if depth == 0 {
        return Ok(0);
    }

    let maximizing = state.current_player().symbol == perspective;
    let mut best = if maximizing { -INF } else { INF };
    for mv in state.legal_moves() {
        let child = play(state, mv)?;
        *nodes += 1;
        let score = minimax(&child, depth - 1, ply + 1, perspective, nodes)?;
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    Ok(best)
}

// =============================================================================
// Alpha-beta
// =============================================================================

/// Minimax with alpha-beta pruning to `depth` plies, with a fresh
/// transposition table.
///
/// Without an evaluator, positions open at the depth limit score 0; with one
/// they get the heuristic score.
pub fn pick_alpha_beta(
    state: &GameState,
    depth: u8,
    evaluator: Option<&Evaluator>,
    nodes: &mut u64,
) -> Result<SearchOutcome, EngineError> {
    let mut table = TranspositionTable::new();
    pick_alpha_beta_with(state, depth, evaluator, Some(&mut table), nodes)
}

/// [`pick_alpha_beta`] with a caller-owned table, or none to search every
/// transposition again.
pub fn pick_alpha_beta_with(
    state: &GameState,
    depth: u8,
    evaluator: Option<&Evaluator>,
    table: Option<&mut TranspositionTable>,
    nodes: &mut u64,
) -> Result<SearchOutcome, EngineError> {
    if state.legal_moves().next().is_none() {
        return Err(EngineError::NoLegalMove);
    }

    let depth = depth_to_end(state, depth);
    let mut search = AlphaBeta::new(state.current_player().symbol, evaluator, None, table);
    let best = search.root(state, depth.max(1), false);
    *nodes += search.nodes;

    match best? {
        Some(best) => Ok(SearchOutcome {
            best,
            depth,
            stopped: false,
        }),
        None => Err(EngineError::NoLegalMove),
    }
}

/// Iterative deepening alpha-beta with heuristic cutoffs under a deadline.
///
/// The answer is seeded with a one-ply heuristic choice, then replaced by the
/// result of each fully completed depth. An iteration cut by the deadline is
/// discarded, so the returned move always comes from a finished search.
/// Root moves whose resulting boards are symmetric to an earlier one are
/// skipped. One transposition table serves every iteration.
pub fn pick_iterative(
    state: &GameState,
    max_depth: u8,
    evaluator: &Evaluator,
    tc: &TimeControl,
    nodes: &mut u64,
) -> Result<SearchOutcome, EngineError> {
    let mut table = TranspositionTable::new();
    pick_iterative_with(state, max_depth, evaluator, tc, Some(&mut table), nodes)
}

/// [`pick_iterative`] with a caller-owned table, or none.
pub fn pick_iterative_with(
    state: &GameState,
    max_depth: u8,
    evaluator: &Evaluator,
    tc: &TimeControl,
    mut table: Option<&mut TranspositionTable>,
    nodes: &mut u64,
) -> Result<SearchOutcome, EngineError> {
    let perspective = state.current_player().symbol;
    let mut outcome = SearchOutcome {
        best: shallow_choice(state, evaluator, nodes)?,
        depth: 0,
        stopped: false,
    };

    let limit = depth_to_end(state, max_depth);
    for depth in 1..=limit {
        if tc.check_time() {
            outcome.stopped = true;
            break;
        }

        let mut search =
            AlphaBeta::new(perspective, Some(evaluator), Some(tc), table.as_deref_mut());
        let result = search.root(state, depth, true);
        *nodes += search.nodes;

        match result? {
            Some(best) => {
                trace!(depth, mv = %best.0, score = best.1, nodes = *nodes, "iteration complete");
                outcome.best = best;
                outcome.depth = depth;
                if best.1 >= WIN_SCORE - i32::from(limit) {
                    // forced win inside the horizon; deeper search cannot improve it
                    break;
                }
            }
            None => {
                outcome.stopped = true;
                break;
            }
        }
    }

    Ok(outcome)
}

/// Best move by static evaluation of each immediate reply.
fn shallow_choice(
    state: &GameState,
    evaluator: &Evaluator,
    nodes: &mut u64,
) -> Result<(Position, i32), EngineError> {
    let perspective = state.current_player().symbol;
    let mut best: Option<(Position, i32)> = None;

    for mv in state.legal_moves() {
        let child = play(state, mv)?;
        *nodes += 1;
        let status = child.status();
        let score = if status.is_terminal() {
            score_terminal(&status, perspective, 1)
        } else {
            evaluator.score_heuristic(child.board(), perspective)
        };
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((mv, score));
        }
    }

    best.ok_or(EngineError::NoLegalMove)
}

struct AlphaBeta<'a> {
    perspective: Symbol,
    evaluator: Option<&'a Evaluator>,
    tc: Option<&'a TimeControl>,
    table: Option<&'a mut TranspositionTable>,
    nodes: u64,
}

impl<'a> AlphaBeta<'a> {
    fn new(
        perspective: Symbol,
        evaluator: Option<&'a Evaluator>,
        tc: Option<&'a TimeControl>,
        table: Option<&'a mut TranspositionTable>,
    ) -> Self {
        Self {
            perspective,
            evaluator,
            tc,
            table,
            nodes: 0,
        }
    }

    fn expired(&self) -> bool {
        self.tc.is_some_and(|tc| tc.check_time())
    }

    fn leaf(&self, state: &GameState) -> i32 {
        self.evaluator
            .map_or(0, |e| e.score_heuristic(state.board(), self.perspective))
    }

    /// Root loop in row-major order. `Ok(None)` means the deadline expired.
    ///
    /// The root itself is never read from the table, so its move choice is
    /// the same with or without one.
    fn root(
        &mut self,
        state: &GameState,
        depth: u8,
        skip_symmetric: bool,
    ) -> Result<Option<(Position, i32)>, EngineError> {
        let mut alpha = -INF;
        let mut best: Option<(Position, i32)> = None;
        let mut explored: Vec<BoardKey> = Vec::new();

        for mv in state.legal_moves() {
            if self.expired() {
                return Ok(None);
            }
            let child = play(state, mv)?;
            self.nodes += 1;

            if skip_symmetric {
                // an equivalent board can tie the earlier move but never beat it
                let key = canonical_key(child.board());
                if explored.contains(&key) {
                    continue;
                }
                explored.push(key);
            }

            let Some(score) = self.search(&child, depth - 1, 1, alpha, INF)? else {
                return Ok(None);
            };
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        Ok(best)
    }

    fn search(
        &mut self,
        state: &GameState,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<Option<i32>, EngineError> {
        let status = state.status();
        if status.is_terminal() {
            return Ok(Some(score_terminal(&status, self.perspective, ply)));
        }
        if depth == 0 {
            return Ok(Some(self.leaf(state)));
        }

        let n = state.size().n();
        let mut slot = None;
        let mut hint = None;
        if let Some(table) = self.table.as_deref_mut() {
            let (board, transform) = canonical_form(state.board());
            let key = TtKey {
                board,
                to_move: state.current_player().symbol,
            };
            if let Some(score) = table.lookup(&key, depth, alpha, beta) {
                return Ok(Some(score));
            }
            hint = table
                .best_move(&key)
                .map(|mv| transform.inverse().apply(mv, n));
            slot = Some((key, transform));
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let maximizing = state.current_player().symbol == self.perspective;
        let mut best = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for mv in ordered_moves(state, hint) {
            if self.expired() {
                return Ok(None);
            }
            let child = play(state, mv)?;
            self.nodes += 1;

            let Some(score) = self.search(&child, depth - 1, ply + 1, alpha, beta)? else {
                return Ok(None);
            };
            let improved = if maximizing { score > best } else { score < best };
            if improved {
                best = score;
                best_move = Some(mv);
            }
            if maximizing {
                alpha = alpha.max(best);
            } else {
                beta = beta.min(best);
            }
            if alpha >= beta {
                break; // cutoff
            }
        }

        if let (Some(table), Some((key, transform))) = (self.table.as_deref_mut(), slot) {
            let bound = if best <= alpha_in {
                Bound::Upper
            } else if best >= beta_in {
                Bound::Lower
            } else {
                Bound::Exact
            };
            table.store(
                key,
                TtEntry {
                    depth,
                    score: best,
                    bound,
                    best_move: best_move.map(|mv| transform.apply(mv, n)),
                },
            );
        }

        Ok(Some(best))
    }
}

/// Legal moves with `first` (a stored best reply) leading, then the center,
/// then corners, then the rest.
fn ordered_moves(state: &GameState, first: Option<Position>) -> Vec<Position> {
    let size = state.size();
    let mut moves: Vec<Position> = state.legal_moves().collect();
    moves.sort_by_key(|&pos| (Some(pos) != first, std::cmp::Reverse(move_priority(pos, size))));
    moves
}

fn move_priority(pos: Position, size: BoardSize) -> u8 {
    if is_center(pos, size) {
        3
    } else if is_corner(pos, size) {
        2
    } else {
        1
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
