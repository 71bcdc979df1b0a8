//! Accuracy figures derived from a history view

pub mod trend;

pub use trend::moving_accuracy;

use crate::history::HistoryEntry;

/// Headline numbers for one history view
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total: usize,
    pub correct: usize,
    /// Percentage in [0, 100]
    pub accuracy: f32,
}

impl Summary {
    pub fn of(entries: &[HistoryEntry]) -> Self {
        let correct = entries.iter().filter(|e| e.is_correct).count();
        Self {
            total: entries.len(),
            correct,
            accuracy: percent(correct, entries.len()),
        }
    }
}

/// Percentage of correct answers, 0 for an empty view
pub fn accuracy(entries: &[HistoryEntry]) -> f32 {
    Summary::of(entries).accuracy
}

fn percent(correct: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        correct as f32 / total as f32 * 100.0
    }
}
