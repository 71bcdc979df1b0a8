//! Answer history: entries, bounded logs, durable storage

pub mod entry;
pub mod log;
pub mod storage;
pub mod store;

pub use entry::{HistoryEntry, PersistedEntry};
pub use log::HistoryLog;
pub use storage::{FileStorage, MemoryStorage, SlotStorage};
pub use store::{load_entries, HistoryStore, HistoryView};
