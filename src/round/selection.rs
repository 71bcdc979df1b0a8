//! The player's picks for the current round

use crate::core::types::ItemId;

/// Components a recipe needs
pub const SLOTS: usize = 2;

/// Up to two component ids in pick order; duplicates allowed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            ids: Vec::with_capacity(SLOTS),
        }
    }

    /// Add a pick; returns false when both slots are taken
    pub fn push(&mut self, id: impl Into<ItemId>) -> bool {
        if self.is_full() {
            return false;
        }
        self.ids.push(id.into());
        true
    }

    /// Remove the pick in a slot, shifting later picks down
    pub fn remove(&mut self, slot: usize) -> Option<ItemId> {
        (slot < self.ids.len()).then(|| self.ids.remove(slot))
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn slot(&self, slot: usize) -> Option<&str> {
        self.ids.get(slot).map(String::as_str)
    }

    /// How many times a component was picked
    pub fn count(&self, id: &str) -> usize {
        self.ids.iter().filter(|s| *s == id).count()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= SLOTS
    }
}
