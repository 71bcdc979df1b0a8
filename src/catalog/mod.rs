//! Recipe catalog - static item and recipe tables
//!
//! The catalog is built once at startup, validated, and then shared
//! read-only. A catalog that references unknown items never gets built, so
//! the round engine can assume every recipe resolves.

pub mod item;
pub mod recipe;

pub use item::{Item, ItemKind};
pub use recipe::Recipe;

use std::path::Path;

use ahash::{AHashMap, AHashSet};
use serde::Deserialize;
use thiserror::Error;

use crate::core::types::ItemId;

/// Default catalog shipped with the binary
const DEFAULT_CATALOG: &str = include_str!("../../data/catalog.toml");

/// Error type for catalog loading and validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Catalog has no recipes")]
    NoRecipes,

    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),

    #[error("Recipe for {result} references unknown item: {id}")]
    UnknownItem { result: ItemId, id: ItemId },

    #[error("Item {id} used as {expected:?} but is not one")]
    WrongKind { id: ItemId, expected: ItemKind },

    #[error("Recipe pair {0} + {1} is listed twice")]
    DuplicateRecipe(ItemId, ItemId),
}

/// Catalog of all items and recipes
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    items: AHashMap<ItemId, Item>,
    /// Component ids in display order
    components: Vec<ItemId>,
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// Build and validate a catalog
    pub fn new(
        components: Vec<Item>,
        completed: Vec<Item>,
        recipes: Vec<Recipe>,
    ) -> Result<Self, CatalogError> {
        let mut items = AHashMap::with_capacity(components.len() + completed.len());
        let mut component_ids = Vec::with_capacity(components.len());

        for item in components.into_iter().chain(completed) {
            if item.kind == ItemKind::Component {
                component_ids.push(item.id.clone());
            }
            if items.contains_key(&item.id) {
                return Err(CatalogError::DuplicateItem(item.id));
            }
            items.insert(item.id.clone(), item);
        }

        let catalog = Self {
            items,
            components: component_ids,
            recipes,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the embedded default catalog
    pub fn with_defaults() -> Result<Self, CatalogError> {
        Self::parse_toml(DEFAULT_CATALOG)
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, CatalogError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, CatalogError> {
        let data: TomlCatalog =
            toml::from_str(content).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let components = data
            .components
            .into_iter()
            .map(|i| i.into_item(ItemKind::Component))
            .collect();
        let completed = data
            .completed
            .into_iter()
            .map(|i| i.into_item(ItemKind::Completed))
            .collect();
        let recipes = data
            .recipes
            .into_iter()
            .map(|r| Recipe {
                components: r.components,
                result: r.result,
            })
            .collect();

        Self::new(components, completed, recipes)
    }

    /// Check that every recipe resolves to items of the right kind
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.recipes.is_empty() {
            return Err(CatalogError::NoRecipes);
        }

        let mut seen_pairs = AHashSet::with_capacity(self.recipes.len());
        for recipe in &self.recipes {
            for id in &recipe.components {
                self.expect_kind(recipe, id, ItemKind::Component)?;
            }
            self.expect_kind(recipe, &recipe.result, ItemKind::Completed)?;

            let [a, b] = recipe.sorted_components();
            if !seen_pairs.insert((a, b)) {
                return Err(CatalogError::DuplicateRecipe(a.into(), b.into()));
            }
        }
        Ok(())
    }

    fn expect_kind(&self, recipe: &Recipe, id: &str, expected: ItemKind) -> Result<(), CatalogError> {
        match self.items.get(id) {
            None => Err(CatalogError::UnknownItem {
                result: recipe.result.clone(),
                id: id.into(),
            }),
            Some(item) if item.kind != expected => Err(CatalogError::WrongKind {
                id: id.into(),
                expected,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Get an item by ID
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Components in display order
    pub fn components(&self) -> impl Iterator<Item = &Item> {
        self.components.iter().filter_map(move |id| self.items.get(id))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Get all recipes
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Every recipe producing the given completed item
    pub fn recipes_producing<'a>(&'a self, result: &'a str) -> impl Iterator<Item = &'a Recipe> {
        self.recipes.iter().filter(move |r| r.result == result)
    }

    /// Display form of a recipe's components, e.g. "2x Recurve Bow"
    pub fn recipe_label(&self, recipe: &Recipe) -> String {
        let name = |id: &str| self.item(id).map_or_else(|| id.to_string(), |item| item.name.clone());
        if recipe.is_doubled() {
            format!("2x {}", name(&recipe.components[0]))
        } else {
            format!("{} + {}", name(&recipe.components[0]), name(&recipe.components[1]))
        }
    }
}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    components: Vec<TomlItem>,
    #[serde(default)]
    completed: Vec<TomlItem>,
    #[serde(default)]
    recipes: Vec<TomlRecipe>,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
}

#[derive(Debug, Deserialize)]
struct TomlRecipe {
    components: [String; 2],
    result: String,
}

impl TomlItem {
    fn into_item(self, kind: ItemKind) -> Item {
        Item {
            id: self.id,
            name: self.name,
            kind,
            description: self.description,
            image: self.image,
        }
    }
}
