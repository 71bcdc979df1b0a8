//! History store - session and all-time answer logs
//!
//! The store outlives individual games: the session log is cleared when a
//! new game starts, the all-time log is capped and mirrored to durable
//! storage after every append. In-memory state is authoritative; storage
//! failures are logged and never propagated.

use crate::catalog::{Item, RecipeCatalog};
use crate::core::config::QuizConfig;
use crate::core::types::{EntryId, TimestampMs};
use crate::history::entry::{HistoryEntry, PersistedEntry};
use crate::history::log::HistoryLog;
use crate::history::storage::SlotStorage;

/// Which log a consumer is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryView {
    #[default]
    Session,
    AllTime,
}

impl HistoryView {
    pub fn toggled(self) -> Self {
        match self {
            HistoryView::Session => HistoryView::AllTime,
            HistoryView::AllTime => HistoryView::Session,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoryView::Session => "Session",
            HistoryView::AllTime => "All time",
        }
    }
}

pub struct HistoryStore {
    session: HistoryLog,
    all_time: HistoryLog,
    storage: Box<dyn SlotStorage>,
    key: String,
    /// Highest entry id handed out or loaded so far
    last_id: EntryId,
}

impl HistoryStore {
    /// Load the persisted all-time log and start with an empty session
    pub fn load(storage: Box<dyn SlotStorage>, catalog: &RecipeCatalog, config: &QuizConfig) -> Self {
        let entries = load_entries(storage.as_ref(), &config.storage_key, catalog);
        let all_time = HistoryLog::from_entries(entries, Some(config.history_cap));
        let last_id = all_time.entries().iter().map(|e| e.id).max().unwrap_or(0);

        tracing::info!(entries = all_time.len(), "Loaded answer history");

        Self {
            session: HistoryLog::unbounded(),
            all_time,
            storage,
            key: config.storage_key.clone(),
            last_id,
        }
    }

    /// Create an entry for a fresh verdict and append it to both logs
    pub fn record(&mut self, target: Item, is_correct: bool, timestamp: TimestampMs) -> HistoryEntry {
        let entry = HistoryEntry::new(self.next_id(timestamp), target, is_correct, timestamp);
        self.append(entry.clone(), true);
        entry
    }

    /// Monotonic id derived from the timestamp
    fn next_id(&mut self, timestamp: TimestampMs) -> EntryId {
        let id = timestamp.max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Prepend to the all-time log (and optionally the session log), then persist
    pub fn append(&mut self, entry: HistoryEntry, to_session: bool) {
        self.last_id = self.last_id.max(entry.id);
        if to_session {
            self.session.push(entry.clone());
        }
        self.all_time.push(entry);
        self.persist();
    }

    /// Reset the session log; all-time history is untouched
    pub fn clear_session(&mut self) {
        self.session.clear();
    }

    /// Forget all-time history, in memory and in storage
    pub fn clear_all_time(&mut self) {
        self.all_time.clear();
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::error!(error = %e, "Failed to remove persisted history");
        }
    }

    pub fn view(&self, view: HistoryView) -> &[HistoryEntry] {
        match view {
            HistoryView::Session => self.session.entries(),
            HistoryView::AllTime => self.all_time.entries(),
        }
    }

    pub fn session(&self) -> &HistoryLog {
        &self.session
    }

    pub fn all_time(&self) -> &HistoryLog {
        &self.all_time
    }

    fn persist(&mut self) {
        let records: Vec<PersistedEntry> =
            self.all_time.entries().iter().map(HistoryEntry::to_persisted).collect();

        let result = match serde_json::to_string(&records) {
            Ok(json) => self.storage.set(&self.key, &json),
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to save history");
        }
    }
}

/// Read and rehydrate the persisted log, newest first
///
/// A failed read or a slot that is not a JSON array yields an empty log.
/// Malformed rows and rows whose item is no longer in the catalog are
/// dropped one by one; the rest are kept.
pub fn load_entries(storage: &dyn SlotStorage, key: &str, catalog: &RecipeCatalog) -> Vec<HistoryEntry> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load history");
            return Vec::new();
        }
    };

    let rows: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse history");
            return Vec::new();
        }
    };

    let total = rows.len();
    let mut malformed = 0;
    let entries: Vec<HistoryEntry> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<PersistedEntry>(row) {
            Ok(record) => record.rehydrate(catalog),
            Err(_) => {
                malformed += 1;
                None
            }
        })
        .collect();

    if entries.len() < total {
        tracing::warn!(
            dropped = total - entries.len(),
            malformed,
            "Skipped unreadable history entries or items missing from the catalog"
        );
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::small_catalog;
    use crate::history::storage::MemoryStorage;

    fn item(catalog: &RecipeCatalog, id: &str) -> Item {
        catalog.item(id).unwrap().clone()
    }

    #[test]
    fn test_record_appends_to_both_logs() {
        let catalog = small_catalog();
        let mut store = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &QuizConfig::default());

        let entry = store.record(item(&catalog, "red_buff"), true, 1_000);
        assert_eq!(store.session().newest(), Some(&entry));
        assert_eq!(store.all_time().newest(), Some(&entry));
        assert!(entry.is_correct);
    }

    #[test]
    fn test_ids_stay_monotonic_within_one_millisecond() {
        let catalog = small_catalog();
        let mut store = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &QuizConfig::default());

        let a = store.record(item(&catalog, "red_buff"), true, 5_000);
        let b = store.record(item(&catalog, "red_buff"), false, 5_000);
        let c = store.record(item(&catalog, "red_buff"), false, 4_000);
        assert!(a.id < b.id && b.id < c.id);
        assert_eq!(c.timestamp, 4_000);
    }

    #[test]
    fn test_append_without_session() {
        let catalog = small_catalog();
        let mut store = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &QuizConfig::default());

        store.append(HistoryEntry::new(1, item(&catalog, "deathblade"), false, 1), false);
        assert!(store.session().is_empty());
        assert_eq!(store.all_time().len(), 1);
    }

    #[test]
    fn test_clear_session_keeps_all_time() {
        let catalog = small_catalog();
        let mut store = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &QuizConfig::default());

        store.record(item(&catalog, "red_buff"), true, 1);
        store.clear_session();
        assert!(store.view(HistoryView::Session).is_empty());
        assert_eq!(store.view(HistoryView::AllTime).len(), 1);
    }

    #[test]
    fn test_cap_applies_to_all_time_only() {
        let catalog = small_catalog();
        let config = QuizConfig {
            history_cap: 3,
            ..QuizConfig::default()
        };
        let mut store = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &config);

        for ts in 0..5 {
            store.record(item(&catalog, "red_buff"), true, ts);
        }
        assert_eq!(store.all_time().len(), 3);
        assert_eq!(store.session().len(), 5);
    }

    #[test]
    fn test_garbage_slot_loads_empty() {
        let catalog = small_catalog();
        let mut storage = MemoryStorage::new();
        storage.set("forge_quiz_history", "not json").unwrap();

        let store = HistoryStore::load(Box::new(storage), &catalog, &QuizConfig::default());
        assert!(store.all_time().is_empty());
    }

    #[test]
    fn test_load_drops_unknown_items() {
        let catalog = small_catalog();
        let mut storage = MemoryStorage::new();
        storage
            .set(
                "forge_quiz_history",
                r#"[{"id":3,"itemId":"red_buff","isCorrect":true,"timestamp":3},
                    {"id":2,"itemId":"retired_item","isCorrect":false,"timestamp":2},
                    {"id":1,"itemId":"deathblade","isCorrect":false,"timestamp":1}]"#,
            )
            .unwrap();

        let entries = load_entries(&storage, "forge_quiz_history", &catalog);
        let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_load_keeps_rows_around_malformed_ones() {
        let catalog = small_catalog();
        let mut storage = MemoryStorage::new();
        storage
            .set(
                "forge_quiz_history",
                r#"[{"id":4,"itemId":"red_buff","isCorrect":true,"timestamp":4},
                    {"id":3,"itemId":null,"isCorrect":false,"timestamp":3},
                    {"id":"two","itemId":"red_buff","isCorrect":true,"timestamp":2},
                    {"id":1,"itemId":"deathblade","timestamp":1},
                    {"id":0,"itemId":"deathblade","isCorrect":false,"timestamp":0}]"#,
            )
            .unwrap();

        let store = HistoryStore::load(Box::new(storage), &catalog, &QuizConfig::default());
        let ids: Vec<_> = store.all_time().entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 0]);
    }

    #[test]
    fn test_non_array_slot_loads_empty() {
        let catalog = small_catalog();
        let mut storage = MemoryStorage::new();
        storage
            .set("forge_quiz_history", r#"{"id":1,"itemId":"red_buff"}"#)
            .unwrap();

        assert!(load_entries(&storage, "forge_quiz_history", &catalog).is_empty());
    }

    #[test]
    fn test_clear_all_time_removes_slot() {
        let catalog = small_catalog();
        let mut store = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &QuizConfig::default());
        store.record(item(&catalog, "red_buff"), true, 1);

        store.clear_all_time();
        assert!(store.all_time().is_empty());
        assert_eq!(store.session().len(), 1);
        assert_eq!(store.storage.get("forge_quiz_history").unwrap(), None);
    }

    #[test]
    fn test_view_toggle() {
        assert_eq!(HistoryView::Session.toggled(), HistoryView::AllTime);
        assert_eq!(HistoryView::AllTime.toggled(), HistoryView::Session);
        assert_eq!(HistoryView::default(), HistoryView::Session);
    }
}
