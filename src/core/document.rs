//! FD-003: Recipe document codec — JSON encode/decode, id assignment.
//!
//! The document is a JSON array of `{id, title, description, image}`.
//! Documents written before ids existed carry only `title`, `description`
//! and `image`; those records get a deterministic `legacy-` id derived from
//! their position and content, so every load agrees on the same ids until
//! the next write persists them.

use super::types::{Recipe, RecipeId};
use crate::journal::digest::composite_hex;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// On-disk shape of a record, tolerant of missing and null fields.
#[derive(Debug, Deserialize)]
struct StoredRecipe {
    #[serde(default)]
    id: Option<RecipeId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

/// Encode the recipe list as a compact JSON array.
pub fn encode(recipes: &[Recipe]) -> Result<String, String> {
    serde_json::to_string(recipes).map_err(|e| format!("JSON serialize error: {}", e))
}

/// Decode a recipe document.
pub fn decode(document: &str) -> Result<Vec<Recipe>, String> {
    let stored: Vec<StoredRecipe> =
        serde_json::from_str(document).map_err(|e| format!("malformed recipe document: {}", e))?;

    Ok(stored
        .into_iter()
        .enumerate()
        .map(|(index, s)| {
            let title = s.title.unwrap_or_default();
            let description = s.description.unwrap_or_default();
            let image = s.image.filter(|i| !i.is_empty());
            let id = match s.id {
                Some(id) if !id.0.is_empty() => id,
                _ => legacy_id(index, &title, &description, image.as_deref()),
            };
            Recipe {
                id,
                title,
                description,
                image,
            }
        })
        .collect())
}

/// Deterministic id for a record that was stored without one.
pub fn legacy_id(index: usize, title: &str, description: &str, image: Option<&str>) -> RecipeId {
    let hex = composite_hex(&[
        index.to_string().as_bytes(),
        title.as_bytes(),
        description.as_bytes(),
        image.unwrap_or("").as_bytes(),
    ]);
    RecipeId(format!("legacy-{}", &hex[..12]))
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh recipe id: `rcp-` + 16 hex chars.
pub fn new_recipe_id(title: &str) -> RecipeId {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let hex = composite_hex(&[
        &nanos.to_le_bytes(),
        &seq.to_le_bytes(),
        &std::process::id().to_le_bytes(),
        title.as_bytes(),
    ]);
    RecipeId(format!("rcp-{}", &hex[..16]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RecipeDraft;
    use std::collections::HashSet;

    #[test]
    fn test_fd003_encode_decode() {
        let recipes = vec![
            RecipeDraft::new("Soup", "Boil water").into_recipe(RecipeId::from("rcp-a")),
            RecipeDraft::new("Toast", "")
                .with_image("file:///toast.jpg")
                .into_recipe(RecipeId::from("rcp-b")),
        ];
        let doc = encode(&recipes).unwrap();
        assert!(doc.starts_with('['));
        assert_eq!(decode(&doc).unwrap(), recipes);
    }

    #[test]
    fn test_fd003_decode_legacy_document() {
        let doc = r#"[
            {"title":"Pancakes","description":"Flour, eggs, milk","image":"file:///p.jpg"},
            {"title":"Salad","description":"Greens"}
        ]"#;
        let recipes = decode(doc).unwrap();
        assert_eq!(recipes.len(), 2);
        assert!(recipes[0].id.as_str().starts_with("legacy-"));
        assert_eq!(recipes[0].image.as_deref(), Some("file:///p.jpg"));
        assert_eq!(recipes[1].image, None);
        assert_ne!(recipes[0].id, recipes[1].id);

        // Stable across loads
        let again = decode(doc).unwrap();
        assert_eq!(recipes[0].id, again[0].id);
        assert_eq!(recipes[1].id, again[1].id);
    }

    #[test]
    fn test_fd003_legacy_duplicates_get_distinct_ids() {
        let doc = r#"[{"title":"Same","description":"x"},{"title":"Same","description":"x"}]"#;
        let recipes = decode(doc).unwrap();
        assert_ne!(recipes[0].id, recipes[1].id);
    }

    #[test]
    fn test_fd003_decode_tolerates_nulls_and_empty_image() {
        let doc = r#"[{"id":"rcp-1","title":null,"description":null,"image":""}]"#;
        let recipes = decode(doc).unwrap();
        assert_eq!(recipes[0].title, "");
        assert_eq!(recipes[0].description, "");
        assert_eq!(recipes[0].image, None);
    }

    #[test]
    fn test_fd003_decode_malformed() {
        assert!(decode("{not json").is_err());
        assert!(decode(r#"{"title":"not a list"}"#).is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_fd003_decode_empty_list() {
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_fd003_new_ids_are_unique() {
        let ids: HashSet<RecipeId> = (0..500).map(|_| new_recipe_id("same")).collect();
        assert_eq!(ids.len(), 500);
        let id = new_recipe_id("x");
        assert!(id.as_str().starts_with("rcp-"));
        assert_eq!(id.as_str().len(), 4 + 16);
    }
}
