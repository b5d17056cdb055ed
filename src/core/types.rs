//! FD-001: Core types — recipes, favorites, configuration, journal events.
//!
//! Everything here derives Serialize/Deserialize so it can round-trip through
//! the JSON documents in storage and the YAML config file.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Recipes
// ============================================================================

/// Stable unique identifier of a user-authored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A user-authored recipe as stored in the recipe document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Image URI
    #[serde(default)]
    pub image: Option<String>,
}

/// The user-editable part of a recipe. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl RecipeDraft {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    /// Bind the draft to an id.
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
        }
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(r: &Recipe) -> Self {
        Self {
            title: r.title.clone(),
            description: r.description.clone(),
            image: r.image.clone(),
        }
    }
}

// ============================================================================
// Favorites
// ============================================================================

/// A recipe marked as favorite, with enough display data to render a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(rename = "idFood")]
    pub id_food: String,

    #[serde(rename = "recipeName", default)]
    pub recipe_name: String,

    #[serde(rename = "recipeImage", default)]
    pub recipe_image: Option<String>,
}

impl From<&Recipe> for FavoriteEntry {
    fn from(r: &Recipe) -> Self {
        Self {
            id_food: r.id.0.clone(),
            recipe_name: r.title.clone(),
            recipe_image: r.image.clone(),
        }
    }
}

// ============================================================================
// foodie.yaml
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodieConfig {
    /// Schema version (must be "1.0")
    pub version: String,

    /// Directory holding the documents and the journal
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Storage key of the recipe document
    #[serde(default = "default_recipes_key")]
    pub recipes_key: String,

    /// Storage key of the favorites document
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,

    /// Keep favorites between runs
    #[serde(default = "default_true")]
    pub persist_favorites: bool,

    /// Append mutation events to events.jsonl
    #[serde(default = "default_true")]
    pub journal: bool,

    /// Diagnostic level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for FoodieConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            storage_dir: default_storage_dir(),
            recipes_key: default_recipes_key(),
            favorites_key: default_favorites_key(),
            persist_favorites: true,
            journal: true,
            log_level: default_log_level(),
        }
    }
}

fn default_storage_dir() -> String {
    "data".to_string()
}

fn default_recipes_key() -> String {
    "customrecipes".to_string()
}

fn default_favorites_key() -> String {
    "favorites".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Journal events
// ============================================================================

/// Mutation event appended to the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    RecipeAdded {
        id: RecipeId,
        title: String,
        digest: String,
    },
    RecipeUpdated {
        id: RecipeId,
        digest: String,
    },
    RecipeRemoved {
        id: RecipeId,
        digest: String,
    },
    FavoriteToggled {
        id_food: String,
        favorite: bool,
        digest: String,
    },
    DocumentReplaced {
        key: String,
        reason: String,
    },
}

/// Journal line: event plus timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub ts: String,
    #[serde(flatten)]
    pub event: StoreEvent,
}
