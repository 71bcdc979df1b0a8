//! Newest-first answer log with an optional length cap

use crate::history::entry::HistoryEntry;

/// Ordered sequence of entries, newest first
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    /// Maximum length; oldest entries are dropped past it
    cap: Option<usize>,
}

impl HistoryLog {
    /// Log without a length limit
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Log keeping only the `cap` most recent entries
    pub fn bounded(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap: Some(cap),
        }
    }

    /// Build from newest-first entries, applying the cap
    pub fn from_entries(mut entries: Vec<HistoryEntry>, cap: Option<usize>) -> Self {
        if let Some(cap) = cap {
            entries.truncate(cap);
        }
        Self { entries, cap }
    }

    /// Prepend an entry, dropping the oldest ones past the cap
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        if let Some(cap) = self.cap {
            self.entries.truncate(cap);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
