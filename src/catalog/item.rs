//! Items - the components the player combines and the completed results

use serde::{Deserialize, Serialize};

use crate::core::types::ItemId;

/// Whether an item is a basic ingredient or a crafted result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Component,
    Completed,
}

/// An immutable catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Human-readable name
    pub name: String,
    pub kind: ItemKind,
    pub description: String,
    /// Visual reference (image URL or asset path)
    pub image: String,
}

impl Item {
    pub fn is_component(&self) -> bool {
        self.kind == ItemKind::Component
    }
}
