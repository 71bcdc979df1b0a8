//! UI state for the terminal front end

use std::collections::VecDeque;

use crate::coach::CoachFeedback;

/// Maximum event log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Display-only state; nothing here feeds back into the round engine
#[derive(Debug, Default)]
pub struct GameUI {
    /// Latest coach remark for the current round
    pub feedback: Option<CoachFeedback>,
    /// Round whose feedback is still in flight
    pub awaiting_feedback: Option<u64>,
    /// Event log entries, oldest first
    pub event_log: VecDeque<LogEntry>,
}

/// An entry in the event log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub round: u64,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Correct,
    Wrong,
    System,
}

impl GameUI {
    pub fn new() -> Self {
        Self {
            feedback: None,
            awaiting_feedback: None,
            event_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    /// Add an entry to the event log
    pub fn log(&mut self, round: u64, message: String, category: LogCategory) {
        if self.event_log.len() >= MAX_LOG_ENTRIES {
            self.event_log.pop_front();
        }
        self.event_log.push_back(LogEntry {
            round,
            message,
            category,
        });
    }

    /// Forget feedback when a new round starts
    pub fn reset_round(&mut self) {
        self.feedback = None;
        self.awaiting_feedback = None;
    }

    /// Accept feedback only for the round that requested it
    pub fn deliver_feedback(&mut self, round: u64, feedback: CoachFeedback) -> bool {
        if self.awaiting_feedback != Some(round) {
            return false;
        }
        self.awaiting_feedback = None;
        self.feedback = Some(feedback);
        true
    }
}
