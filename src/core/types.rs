//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a catalog item (component or completed)
pub type ItemId = String;

/// Identifier of a history entry, monotonic within one process
pub type EntryId = i64;

/// Wall-clock time in milliseconds since the Unix epoch
pub type TimestampMs = i64;

/// Unique identifier for one played game (menu -> end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> TimestampMs {
    chrono::Utc::now().timestamp_millis()
}
