//! Buffered direction requests.
//!
//! Holds at most one pending request. A newer request made before the next
//! tick replaces the older one (last write wins), so rapid multi-key input can
//! skip intermediate turns. Reversal filtering is left to the engine, which
//! compares against the heading from before the tick.

use crate::types::{Direction, GameStatus};

/// Single-slot direction buffer between input events and the tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputController {
    pending: Option<Direction>,
    /// Requests dropped because the session was not running.
    discarded: u32,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a direction request.
    ///
    /// Only accepted while `status` is `Running`; requests made while ready,
    /// paused or over are discarded. Returns whether the request was buffered.
    pub fn request(&mut self, direction: Direction, status: GameStatus) -> bool {
        if status != GameStatus::Running {
            self.discarded = self.discarded.wrapping_add(1);
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Take the pending request for the tick that is about to run.
    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Drop any pending request (on pause and reset).
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn discarded(&self) -> u32 {
        self.discarded
    }
}
