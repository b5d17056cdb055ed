//! FD-004: Recipe store — list/add/update/remove over a single document.
//!
//! The whole recipe list lives under one storage key and every mutation
//! rewrites it in full. There is no locking: the last write wins. Records
//! carry stable ids, so a stale `update`/`remove` by id misses instead of
//! hitting whatever record slid into the old position.

use super::document;
use super::types::{Recipe, RecipeDraft, RecipeId, StoreEvent};
use crate::journal::digest::hash_string;
use crate::journal::Journal;
use crate::storage::KeyValueStore;
use tracing::{debug, warn};

/// The recipe list persisted under `key` in `storage`.
#[derive(Debug)]
pub struct RecipeStore<S> {
    storage: S,
    key: String,
    journal: Option<Journal>,
}

impl<S: KeyValueStore> RecipeStore<S> {
    pub fn new(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            journal: None,
        }
    }

    /// Record every successful mutation in `journal`.
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Strict read: `Ok(vec![])` when nothing is stored (a missing or blank
    /// value), `Err` when the document cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<Recipe>, String> {
        match self.storage.get_item(&self.key)? {
            Some(doc) if !doc.trim().is_empty() => document::decode(&doc),
            _ => Ok(Vec::new()),
        }
    }

    /// Lenient read: failures are logged and yield an empty list.
    pub fn list(&self) -> Vec<Recipe> {
        self.load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "cannot load recipes, treating as empty");
            Vec::new()
        })
    }

    pub fn get(&self, id: &RecipeId) -> Option<Recipe> {
        self.list().into_iter().find(|r| &r.id == id)
    }

    /// Find a recipe by exact id, list position, or unique id prefix.
    pub fn find(&self, selector: &str) -> Option<Recipe> {
        let recipes = self.list();
        if let Some(r) = recipes.iter().find(|r| r.id.as_str() == selector) {
            return Some(r.clone());
        }
        if let Ok(index) = selector.parse::<usize>() {
            return recipes.get(index).cloned();
        }
        let mut matches = recipes
            .iter()
            .filter(|r| !selector.is_empty() && r.id.as_str().starts_with(selector));
        match (matches.next(), matches.next()) {
            (Some(r), None) => Some(r.clone()),
            _ => None,
        }
    }

    /// Append a recipe and rewrite the document.
    pub fn add(&self, draft: RecipeDraft) -> Result<Recipe, String> {
        let (mut recipes, replaced) = self.load_for_write();
        let id = document::new_recipe_id(&draft.title);
        let recipe = draft.into_recipe(id);
        recipes.push(recipe.clone());
        let digest = self.persist(&recipes, replaced)?;
        debug!(id = %recipe.id, count = recipes.len(), "recipe added");
        self.record(StoreEvent::RecipeAdded {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            digest,
        });
        Ok(recipe)
    }

    /// Replace the recipe with `id`, keeping its position. Returns `false`
    /// without writing when no such recipe exists.
    pub fn update(&self, id: &RecipeId, draft: RecipeDraft) -> Result<bool, String> {
        let (mut recipes, replaced) = self.load_for_write();
        let Some(slot) = recipes.iter_mut().find(|r| &r.id == id) else {
            debug!(%id, "update of unknown recipe ignored");
            return Ok(false);
        };
        *slot = draft.into_recipe(id.clone());
        let digest = self.persist(&recipes, replaced)?;
        self.record(StoreEvent::RecipeUpdated {
            id: id.clone(),
            digest,
        });
        Ok(true)
    }

    /// Remove the recipe with `id`. Returns `None` without writing when no
    /// such recipe exists.
    pub fn remove(&self, id: &RecipeId) -> Result<Option<Recipe>, String> {
        let (mut recipes, replaced) = self.load_for_write();
        let Some(pos) = recipes.iter().position(|r| &r.id == id) else {
            debug!(%id, "remove of unknown recipe ignored");
            return Ok(None);
        };
        let removed = recipes.remove(pos);
        let digest = self.persist(&recipes, replaced)?;
        self.record(StoreEvent::RecipeRemoved {
            id: removed.id.clone(),
            digest,
        });
        Ok(Some(removed))
    }

    /// Replace the recipe at `index` of the persisted list. Out of range is
    /// a logged no-op.
    pub fn update_at(&self, index: usize, draft: RecipeDraft) -> Result<bool, String> {
        match self.list().get(index) {
            Some(r) => self.update(&r.id, draft),
            None => {
                warn!(index, key = %self.key, "update index out of range, ignored");
                Ok(false)
            }
        }
    }

    /// Remove the recipe at `index` of the persisted list. Out of range is
    /// a logged no-op.
    pub fn remove_at(&self, index: usize) -> Result<Option<Recipe>, String> {
        match self.list().get(index) {
            Some(r) => self.remove(&r.id),
            None => {
                warn!(index, key = %self.key, "remove index out of range, ignored");
                Ok(None)
            }
        }
    }

    /// BLAKE3 digest of the stored document as it is right now.
    pub fn digest(&self) -> Result<String, String> {
        Ok(crate::journal::digest::document_digest(
            self.storage.get_item(&self.key)?.as_deref(),
        ))
    }

    // An unreadable document is replaced by the next write; the reason is
    // returned so it can be journaled once that write succeeds.
    fn load_for_write(&self) -> (Vec<Recipe>, Option<String>) {
        match self.load() {
            Ok(recipes) => (recipes, None),
            Err(e) => {
                warn!(key = %self.key, error = %e, "replacing unreadable recipe document");
                (Vec::new(), Some(e))
            }
        }
    }

    fn persist(&self, recipes: &[Recipe], replaced: Option<String>) -> Result<String, String> {
        let doc = document::encode(recipes)?;
        self.storage.set_item(&self.key, &doc)?;
        if let Some(reason) = replaced {
            self.record(StoreEvent::DocumentReplaced {
                key: self.key.clone(),
                reason,
            });
        }
        Ok(hash_string(&doc))
    }

    fn record(&self, event: StoreEvent) {
        if let Some(journal) = &self.journal {
            journal.record(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::eventlog::read_events;
    use crate::storage::{FileStore, MemoryStore};

    /// Storage whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, String> {
            self.0.get_item(key)
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("disk full".to_string())
        }
    }

    /// Storage whose reads always fail.
    struct BrokenReadStore;

    impl KeyValueStore for BrokenReadStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, String> {
            Err("device not ready".to_string())
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
            Ok(())
        }
    }

    fn store_with(titles: &[&str]) -> RecipeStore<MemoryStore> {
        let store = RecipeStore::new(MemoryStore::new(), "customrecipes");
        for t in titles {
            store.add(RecipeDraft::new(t, &format!("{} description", t))).unwrap();
        }
        store
    }

    fn titles(store: &RecipeStore<MemoryStore>) -> Vec<String> {
        store.list().into_iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_fd004_list_never_stored() {
        let store = RecipeStore::new(MemoryStore::new(), "customrecipes");
        assert!(store.list().is_empty());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_fd004_list_malformed_document() {
        let storage = MemoryStore::new();
        storage.set_item("customrecipes", "{oops").unwrap();
        let store = RecipeStore::new(storage, "customrecipes");
        assert!(store.list().is_empty());
        assert!(store.load().is_err());
    }

    #[test]
    fn test_fd004_blank_document_is_nothing_stored() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStore::new(dir.path());
        storage.set_item("customrecipes", "").unwrap();
        let store =
            RecipeStore::new(storage, "customrecipes").with_journal(Journal::in_dir(dir.path()));
        assert!(store.load().unwrap().is_empty());

        store.storage().set_item("customrecipes", "  \n").unwrap();
        assert!(store.load().unwrap().is_empty());

        store.add(RecipeDraft::new("first", "")).unwrap();
        let events = read_events(&dir.path().join("events.jsonl")).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].event, StoreEvent::RecipeAdded { .. }));
    }

    #[test]
    fn test_fd004_list_read_failure() {
        let store = RecipeStore::new(BrokenReadStore, "customrecipes");
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_fd004_add_then_list_ends_with_added() {
        let store = store_with(&["Soup", "Stew"]);
        let added = store
            .add(RecipeDraft::new("Curry", "Spicy").with_image("file:///c.jpg"))
            .unwrap();
        let list = store.list();
        assert_eq!(list.len(), 3);
        assert_eq!(list.last(), Some(&added));
        assert_eq!(added.title, "Curry");
        assert_eq!(added.image.as_deref(), Some("file:///c.jpg"));
    }

    #[test]
    fn test_fd004_ids_unique() {
        let store = store_with(&["Same", "Same", "Same"]);
        let list = store.list();
        assert_ne!(list[0].id, list[1].id);
        assert_ne!(list[1].id, list[2].id);
        assert_ne!(list[0].id, list[2].id);
    }

    #[test]
    fn test_fd004_remove_at_preserves_order() {
        let store = store_with(&["a", "b", "c", "d"]);
        let removed = store.remove_at(1).unwrap().unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(titles(&store), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_fd004_update_at_replaces_only_that_position() {
        let store = store_with(&["a", "b", "c"]);
        let before = store.list();
        assert!(store.update_at(1, RecipeDraft::new("B", "new")).unwrap());
        let after = store.list();
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].title, "B");
        assert_eq!(after[1].description, "new");
        assert_eq!(after[1].id, before[1].id);
    }

    #[test]
    fn test_fd004_out_of_range_is_noop() {
        let store = store_with(&["a", "b"]);
        let digest = store.digest().unwrap();
        assert!(!store.update_at(5, RecipeDraft::new("x", "")).unwrap());
        assert!(store.remove_at(2).unwrap().is_none());
        assert_eq!(store.digest().unwrap(), digest);
        assert_eq!(titles(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_fd004_stale_id_remove_is_noop() {
        let store = store_with(&["a", "b", "c"]);
        let stale = store.list();
        store.remove(&stale[0].id).unwrap();
        // A second delete from the stale view must not take out "b".
        assert!(store.remove(&stale[0].id).unwrap().is_none());
        assert_eq!(titles(&store), vec!["b", "c"]);
    }

    #[test]
    fn test_fd004_update_unknown_id() {
        let store = store_with(&["a"]);
        let changed = store
            .update(&RecipeId::from("rcp-missing"), RecipeDraft::new("x", ""))
            .unwrap();
        assert!(!changed);
        assert_eq!(titles(&store), vec!["a"]);
    }

    #[test]
    fn test_fd004_write_failure_keeps_previous_document() {
        let inner = MemoryStore::new();
        inner
            .set_item("customrecipes", r#"[{"id":"rcp-1","title":"kept","description":""}]"#)
            .unwrap();
        let store = RecipeStore::new(ReadOnlyStore(inner), "customrecipes");
        let err = store.add(RecipeDraft::new("lost", "")).unwrap_err();
        assert!(err.contains("disk full"));
        let list = store.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "kept");
    }

    #[test]
    fn test_fd004_mutation_replaces_malformed_document() {
        let storage = MemoryStore::new();
        storage.set_item("customrecipes", "not json").unwrap();
        let store = RecipeStore::new(storage, "customrecipes");
        store.add(RecipeDraft::new("fresh", "")).unwrap();
        assert_eq!(titles(&store), vec!["fresh"]);
    }

    #[test]
    fn test_fd004_legacy_document_migrates_on_write() {
        let storage = MemoryStore::new();
        storage
            .set_item(
                "customrecipes",
                r#"[{"title":"old","description":"from before ids","image":"file:///o.png"}]"#,
            )
            .unwrap();
        let store = RecipeStore::new(storage, "customrecipes");
        let legacy_id = store.list()[0].id.clone();
        store.add(RecipeDraft::new("new", "")).unwrap();

        let raw = store.storage().get_item("customrecipes").unwrap().unwrap();
        assert!(raw.contains(legacy_id.as_str()));
        assert_eq!(store.get(&legacy_id).unwrap().title, "old");
    }

    #[test]
    fn test_fd004_find_selectors() {
        let store = store_with(&["a", "b"]);
        let list = store.list();
        assert_eq!(store.find(list[1].id.as_str()).unwrap().title, "b");
        assert_eq!(store.find("0").unwrap().title, "a");
        assert!(store.find("7").is_none());
        assert!(store.find("").is_none());
        // "rcp-" prefixes both
        assert!(store.find("rcp-").is_none());
        let unique_prefix = &list[0].id.as_str()[..12];
        if !list[1].id.as_str().starts_with(unique_prefix) {
            assert_eq!(store.find(unique_prefix).unwrap().title, "a");
        }
    }

    #[test]
    fn test_fd004_file_store_roundtrip_with_journal() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecipeStore::new(FileStore::new(dir.path()), "customrecipes")
            .with_journal(Journal::in_dir(dir.path()));
        let r = store.add(RecipeDraft::new("Bread", "Knead")).unwrap();
        store.update(&r.id, RecipeDraft::new("Bread", "Knead well")).unwrap();
        store.remove(&r.id).unwrap();

        let reopened = RecipeStore::new(FileStore::new(dir.path()), "customrecipes");
        assert!(reopened.list().is_empty());

        let events = read_events(&dir.path().join("events.jsonl")).unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0].event, StoreEvent::RecipeAdded { .. }));
        assert!(matches!(events[1].event, StoreEvent::RecipeUpdated { .. }));
        match &events[2].event {
            StoreEvent::RecipeRemoved { id, digest } => {
                assert_eq!(id, &r.id);
                assert_eq!(digest, &reopened.digest().unwrap());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_fd004_replaced_document_is_journaled() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStore::new(dir.path());
        storage.set_item("customrecipes", "garbage").unwrap();
        let store =
            RecipeStore::new(storage, "customrecipes").with_journal(Journal::in_dir(dir.path()));
        store.add(RecipeDraft::new("x", "")).unwrap();
        let events = read_events(&dir.path().join("events.jsonl")).unwrap();
        assert!(matches!(events[0].event, StoreEvent::DocumentReplaced { .. }));
        assert!(matches!(events[1].event, StoreEvent::RecipeAdded { .. }));
    }

    proptest::proptest! {
        #[test]
        fn prop_remove_at_keeps_relative_order(n in 1usize..8, pick in 0usize..8) {
            let names: Vec<String> = (0..n).map(|i| format!("r{}", i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let store = store_with(&refs);
            let index = pick % n;
            store.remove_at(index).unwrap();

            let mut expected = names.clone();
            expected.remove(index);
            proptest::prop_assert_eq!(titles(&store), expected);
        }
    }
}
