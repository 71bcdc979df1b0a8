//! Moving-average accuracy trend
//!
//! The input view is newest-first. The trend is computed over the most
//! recent `cap` entries in chronological order; each point averages the
//! trailing window ending at that point, so the first few windows are
//! shorter than `window`.

use crate::history::HistoryEntry;

/// Fraction correct over a trailing window, oldest point first
///
/// Returns an empty series when fewer than two entries exist.
pub fn moving_accuracy(entries: &[HistoryEntry], window: usize, cap: usize) -> Vec<f32> {
    if entries.len() < 2 || window == 0 {
        return Vec::new();
    }

    let recent = entries.len().min(cap);
    let chronological: Vec<bool> = entries[..recent].iter().rev().map(|e| e.is_correct).collect();

    (0..chronological.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &chronological[start..=i];
            let correct = slice.iter().filter(|&&ok| ok).count();
            correct as f32 / slice.len() as f32
        })
        .collect()
}
