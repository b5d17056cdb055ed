//! FD-005: Favorites set — toggle membership by recipe identifier.
//!
//! The set itself is plain in-memory state. `load_favorites`/`save_favorites`
//! let a caller carry it across process runs through a storage key.

use super::types::FavoriteEntry;
use crate::storage::KeyValueStore;
use indexmap::IndexMap;
use tracing::warn;

/// Favorite entries keyed by `idFood`, in the order they were favorited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    entries: IndexMap<String, FavoriteEntry>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list; later duplicates of an id are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = FavoriteEntry>) -> Self {
        let mut set = Self::new();
        for e in entries {
            set.entries.entry(e.id_food.clone()).or_insert(e);
        }
        set
    }

    pub fn is_favorite(&self, id_food: &str) -> bool {
        self.entries.contains_key(id_food)
    }

    /// Remove the entry if its id is present, otherwise append it.
    /// Returns whether the id is a favorite afterwards.
    pub fn toggle(&mut self, entry: FavoriteEntry) -> bool {
        if self.entries.shift_remove(&entry.id_food).is_some() {
            false
        } else {
            self.entries.insert(entry.id_food.clone(), entry);
            true
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &FavoriteEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strict read of a persisted favorites document.
pub fn read_favorites<S: KeyValueStore>(storage: &S, key: &str) -> Result<FavoritesSet, String> {
    let Some(doc) = storage.get_item(key)?.filter(|d| !d.trim().is_empty()) else {
        return Ok(FavoritesSet::new());
    };
    let entries: Vec<FavoriteEntry> =
        serde_json::from_str(&doc).map_err(|e| format!("malformed favorites document: {}", e))?;
    Ok(FavoritesSet::from_entries(entries))
}

/// Lenient read: failures are logged and yield an empty set.
pub fn load_favorites<S: KeyValueStore>(storage: &S, key: &str) -> FavoritesSet {
    read_favorites(storage, key).unwrap_or_else(|e| {
        warn!(key, error = %e, "cannot load favorites, treating as empty");
        FavoritesSet::new()
    })
}

/// Rewrite the favorites document. Returns the written document.
pub fn save_favorites<S: KeyValueStore>(
    storage: &S,
    key: &str,
    set: &FavoritesSet,
) -> Result<String, String> {
    let entries: Vec<&FavoriteEntry> = set.entries().collect();
    let doc =
        serde_json::to_string(&entries).map_err(|e| format!("JSON serialize error: {}", e))?;
    storage.set_item(key, &doc)?;
    Ok(doc)
}
