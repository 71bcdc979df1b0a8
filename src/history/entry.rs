//! History entries and their persisted projection

use serde::{Deserialize, Serialize};

use crate::catalog::{Item, RecipeCatalog};
use crate::core::types::{EntryId, ItemId, TimestampMs};

/// One answered question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: EntryId,
    /// The completed item the player was asked to build
    pub target: Item,
    pub is_correct: bool,
    pub timestamp: TimestampMs,
}

impl HistoryEntry {
    pub fn new(id: EntryId, target: Item, is_correct: bool, timestamp: TimestampMs) -> Self {
        Self {
            id,
            target,
            is_correct,
            timestamp,
        }
    }

    /// Minimal form written to durable storage
    pub fn to_persisted(&self) -> PersistedEntry {
        PersistedEntry {
            id: self.id,
            item_id: self.target.id.clone(),
            is_correct: self.is_correct,
            timestamp: self.timestamp,
        }
    }
}

/// Stored record: the target item is kept by id and rehydrated on load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEntry {
    pub id: EntryId,
    pub item_id: ItemId,
    pub is_correct: bool,
    pub timestamp: TimestampMs,
}

impl PersistedEntry {
    /// Resolve the item id against the catalog; `None` if it no longer exists
    pub fn rehydrate(self, catalog: &RecipeCatalog) -> Option<HistoryEntry> {
        let target = catalog.item(&self.item_id)?.clone();
        Some(HistoryEntry::new(self.id, target, self.is_correct, self.timestamp))
    }
}
