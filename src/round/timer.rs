//! Scheduled follow-up after a reveal
//!
//! The engine holds at most one `PendingAdvance`. The event loop polls it
//! with the current instant; dropping the handle is the cancellation.

use std::time::{Duration, Instant};

/// What happens when the reveal delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceAction {
    /// Generate the next question
    NextQuestion,
    /// Lives are exhausted; leave the game for the end screen
    EndGame,
}

/// An armed, not yet fired advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub action: AdvanceAction,
    pub due: Instant,
}

impl PendingAdvance {
    pub fn new(action: AdvanceAction, now: Instant, delay: Duration) -> Self {
        Self {
            action,
            due: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Time left before firing, zero once due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}
