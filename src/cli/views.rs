//! FD-018: Text views for recipes and favorites.
//!
//! Each view is a pure function returning the text to print, so the empty
//! and populated states can be tested without a terminal.

use crate::core::favorites::FavoritesSet;
use crate::core::types::Recipe;
use std::fmt::Write;

pub const EMPTY_RECIPES: &str = "No recipes added yet!";
pub const EMPTY_FAVORITES: &str = "No favorite recipes yet!";
pub const MISSING_RECIPE: &str = "No Recipe Details Available";

const DESCRIPTION_PREVIEW: usize = 50;
const NAME_PREVIEW: usize = 20;

/// First 50 characters of a description, with `…` when cut.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
        format!("{}…", head)
    } else {
        description.to_string()
    }
}

/// First 20 characters of a recipe name, with `...` when cut.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_PREVIEW {
        let head: String = name.chars().take(NAME_PREVIEW).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

fn heart(favorite: bool) -> &'static str {
    if favorite {
        "♥"
    } else {
        "♡"
    }
}

/// The "my recipes" list.
pub fn render_recipe_list(recipes: &[Recipe], favorites: &FavoritesSet) -> String {
    if recipes.is_empty() {
        return format!("{}\nAdd one with `foodie add --title <title>`.\n", EMPTY_RECIPES);
    }

    let mut out = String::new();
    for (index, r) in recipes.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {} {}  ({})",
            index,
            heart(favorites.is_favorite(r.id.as_str())),
            r.title,
            r.id
        );
        match &r.image {
            Some(uri) => {
                let _ = writeln!(out, "    image: {}", uri);
            }
            None => {
                let _ = writeln!(out, "    No Image");
            }
        }
        if !r.description.is_empty() {
            let _ = writeln!(out, "    {}", truncate_description(&r.description));
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{} recipe(s).", recipes.len());
    out
}

/// A single recipe with its favorite marker.
pub fn render_recipe_detail(recipe: Option<&Recipe>, favorite: bool) -> String {
    let Some(r) = recipe else {
        return format!("{}\n", MISSING_RECIPE);
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", heart(favorite), r.title);
    let _ = writeln!(out, "  id: {}", r.id);
    if let Some(uri) = &r.image {
        let _ = writeln!(out, "  image: {}", uri);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Content");
    let _ = writeln!(out, "{}", r.description);
    out
}

/// The favorites list.
pub fn render_favorites(favorites: &FavoritesSet) -> String {
    if favorites.is_empty() {
        return format!("{}\n", EMPTY_FAVORITES);
    }

    let mut out = String::new();
    let _ = writeln!(out, "My Favorite Recipes");
    for e in favorites.entries() {
        let _ = writeln!(out, "  ♥ {}  ({})", truncate_name(&e.recipe_name), e.id_food);
    }
    out
}
