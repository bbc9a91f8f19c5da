//! Search limits and the wall-clock deadline used by time-bounded search.
//!
//! The deadline is cooperative: search code calls [`TimeControl::check_time`]
//! before descending into each child and unwinds once it reports true.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Depth and time limits for one move selection.
///
/// Engines stop at whichever limit comes first. Depth is counted in plies; a
/// depth of at least the number of empty cells searches to terminal states.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Maximum time allowed for this move (None = no deadline)
    pub move_time: Option<Duration>,
    /// Deadline tracker shared by the whole search
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth limit only.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Depth and time limits.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Time limit only (search as deep as the board allows).
    pub fn time(move_time: Duration) -> Self {
        Self::depth_and_time(u8::MAX, move_time)
    }

    /// No limits: search every line to a terminal state.
    pub fn full() -> Self {
        Self::depth(u8::MAX)
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::full()
    }
}

/// Single-threaded deadline tracker.
///
/// Clones carry their own clock; one search owns one `TimeControl`.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Cell<bool>,
    start_time: Cell<Option<Instant>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Cell::new(false),
            start_time: Cell::new(None),
            time_limit,
        }
    }

    /// Start (or restart) the clock.
    pub fn start(&self) {
        self.start_time.set(Some(Instant::now()));
        self.stopped.set(false);
    }

    fn stop(&self) {
        self.stopped.set(true);
    }

    fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Reads the clock and latches the stop flag once the limit has elapsed.
    ///
    /// An unstarted clock never expires.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let (Some(limit), Some(start)) = (self.time_limit, self.start_time.get()) {
            if start.elapsed() >= limit {
                self.stop();
                return true;
            }
        }

        false
    }

    /// Time since the clock started, zero if it never did. Engines report
    /// this as the search time.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .get()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
