//! Crafting recipes - two components combine into one completed item
//!
//! A recipe's component pair is unordered but duplicates count: two swords
//! are a different recipe from a sword and a bow.

use serde::{Deserialize, Serialize};

use crate::core::types::ItemId;

/// A crafting recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// The two component ids, in catalog order
    pub components: [ItemId; 2],
    /// Completed item produced by the pair
    pub result: ItemId,
}

impl Recipe {
    pub fn new(a: impl Into<ItemId>, b: impl Into<ItemId>, result: impl Into<ItemId>) -> Self {
        Self {
            components: [a.into(), b.into()],
            result: result.into(),
        }
    }

    /// Components in canonical (sorted) order
    pub fn sorted_components(&self) -> [&str; 2] {
        sorted_pair(&self.components[0], &self.components[1])
    }

    /// Multiset comparison against a player selection
    ///
    /// Returns false unless the selection holds exactly two ids.
    pub fn matches<S: AsRef<str>>(&self, selection: &[S]) -> bool {
        match selection {
            [a, b] => sorted_pair(a.as_ref(), b.as_ref()) == self.sorted_components(),
            _ => false,
        }
    }

    /// True when both components are the same item
    pub fn is_doubled(&self) -> bool {
        self.components[0] == self.components[1]
    }
}

fn sorted_pair<'a>(a: &'a str, b: &'a str) -> [&'a str; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}
