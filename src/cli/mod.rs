//! FD-017: CLI subcommands — init, list, show, add, edit, delete, favorite, status.

pub mod views;

use crate::core::favorites::{self, FavoritesSet};
use crate::core::types::{FavoriteEntry, FoodieConfig, RecipeDraft, StoreEvent};
use crate::core::{config, store::RecipeStore};
use crate::journal::{digest, eventlog, Journal};
use crate::storage::{FileStore, KeyValueStore};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::error;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new foodie project
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List your recipes
    List,

    /// Show one recipe
    Show {
        /// Recipe id, id prefix, or list position
        recipe: String,
    },

    /// Add a recipe
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Image URI
        #[arg(short, long)]
        image: Option<String>,
    },

    /// Edit a recipe (only the given fields change)
    Edit {
        /// Recipe id, id prefix, or list position
        recipe: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Image URI
        #[arg(short, long, conflicts_with = "no_image")]
        image: Option<String>,

        /// Drop the image
        #[arg(long)]
        no_image: bool,
    },

    /// Delete a recipe
    Delete {
        /// Recipe id, id prefix, or list position
        recipe: String,
    },

    /// Toggle a recipe's favorite status
    Favorite {
        /// Recipe id, id prefix, or list position
        recipe: String,
    },

    /// List favorite recipes
    Favorites,

    /// Show storage location, counts and document digest
    Status,
}

/// Loaded configuration plus the resolved storage directory.
#[derive(Debug)]
pub struct Session {
    pub config: FoodieConfig,
    pub storage_dir: PathBuf,
}

impl Session {
    /// Load and validate the config at `config_path` (defaults if absent).
    pub fn open(config_path: &Path) -> Result<Self, String> {
        let config = config::load_or_default(config_path)?;
        let errors = config::validate_config(&config);
        if !errors.is_empty() {
            for e in &errors {
                eprintln!("  ERROR: {}", e);
            }
            return Err(format!("{} validation error(s)", errors.len()));
        }
        let storage_dir = config::resolve_storage_dir(&config, config_path);
        Ok(Self {
            config,
            storage_dir,
        })
    }

    pub fn storage(&self) -> FileStore {
        FileStore::new(&self.storage_dir)
    }

    pub fn journal(&self) -> Option<Journal> {
        self.config
            .journal
            .then(|| Journal::in_dir(&self.storage_dir))
    }

    pub fn recipes(&self) -> RecipeStore<FileStore> {
        let store = RecipeStore::new(self.storage(), &self.config.recipes_key);
        match self.journal() {
            Some(j) => store.with_journal(j),
            None => store,
        }
    }

    /// Persisted favorites, or an empty process-lifetime set when
    /// persistence is off.
    pub fn favorites(&self) -> FavoritesSet {
        if self.config.persist_favorites {
            favorites::load_favorites(&self.storage(), &self.config.favorites_key)
        } else {
            FavoritesSet::new()
        }
    }

    fn save_favorites(&self, set: &FavoritesSet) -> Result<Option<String>, String> {
        if !self.config.persist_favorites {
            return Ok(None);
        }
        let doc = favorites::save_favorites(&self.storage(), &self.config.favorites_key, set)?;
        Ok(Some(digest::hash_string(&doc)))
    }
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, config_path: &Path) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        other => {
            let session = Session::open(config_path)?;
            run(other, &session)
        }
    }
}

fn run(cmd: Commands, session: &Session) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::List => cmd_list(session),
        Commands::Show { recipe } => cmd_show(session, &recipe),
        Commands::Add {
            title,
            description,
            image,
        } => cmd_add(session, title, description, image),
        Commands::Edit {
            recipe,
            title,
            description,
            image,
            no_image,
        } => cmd_edit(session, &recipe, title, description, image, no_image),
        Commands::Delete { recipe } => cmd_delete(session, &recipe),
        Commands::Favorite { recipe } => cmd_favorite(session, &recipe),
        Commands::Favorites => cmd_favorites(session),
        Commands::Status => cmd_status(session),
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join("foodie.yaml");
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }

    let config = FoodieConfig::default();
    let storage_dir = path.join(&config.storage_dir);
    std::fs::create_dir_all(&storage_dir)
        .map_err(|e| format!("cannot create storage dir: {}", e))?;

    let template = format!(
        r#"version: "1.0"
storage_dir: {}
recipes_key: {}
favorites_key: {}
persist_favorites: true
journal: true
log_level: warn
"#,
        config.storage_dir, config.recipes_key, config.favorites_key
    );
    std::fs::write(&config_path, template)
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;

    println!("Initialized foodie project at {}", path.display());
    println!("  Created: {}", config_path.display());
    println!("  Created: {}/", storage_dir.display());
    Ok(())
}

fn cmd_list(session: &Session) -> Result<(), String> {
    let recipes = session.recipes().list();
    print!("{}", views::render_recipe_list(&recipes, &session.favorites()));
    Ok(())
}

fn cmd_show(session: &Session, selector: &str) -> Result<(), String> {
    let recipe = session.recipes().find(selector);
    let favorite = recipe
        .as_ref()
        .is_some_and(|r| session.favorites().is_favorite(r.id.as_str()));
    print!("{}", views::render_recipe_detail(recipe.as_ref(), favorite));
    Ok(())
}

fn cmd_add(
    session: &Session,
    title: String,
    description: String,
    image: Option<String>,
) -> Result<(), String> {
    let draft = RecipeDraft {
        title,
        description,
        image: image.filter(|i| !i.is_empty()),
    };
    match session.recipes().add(draft) {
        Ok(recipe) => println!("Added: {} ({})", recipe.title, recipe.id),
        Err(e) => error!(error = %e, "could not save recipe"),
    }
    Ok(())
}

fn cmd_edit(
    session: &Session,
    selector: &str,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    no_image: bool,
) -> Result<(), String> {
    let store = session.recipes();
    let Some(current) = store.find(selector) else {
        print!("{}", views::render_recipe_detail(None, false));
        return Ok(());
    };

    let mut draft = RecipeDraft::from(&current);
    if let Some(t) = title {
        draft.title = t;
    }
    if let Some(d) = description {
        draft.description = d;
    }
    if no_image {
        draft.image = None;
    } else if let Some(i) = image {
        draft.image = Some(i).filter(|i| !i.is_empty());
    }

    match store.update(&current.id, draft) {
        Ok(true) => println!("Updated: {}", current.id),
        Ok(false) => print!("{}", views::render_recipe_detail(None, false)),
        Err(e) => error!(error = %e, id = %current.id, "could not update recipe"),
    }
    Ok(())
}

fn cmd_delete(session: &Session, selector: &str) -> Result<(), String> {
    let store = session.recipes();
    let Some(current) = store.find(selector) else {
        print!("{}", views::render_recipe_detail(None, false));
        return Ok(());
    };
    match store.remove(&current.id) {
        Ok(Some(removed)) => println!("Deleted: {} ({})", removed.title, removed.id),
        Ok(None) => print!("{}", views::render_recipe_detail(None, false)),
        Err(e) => error!(error = %e, id = %current.id, "could not delete recipe"),
    }
    Ok(())
}

fn cmd_favorite(session: &Session, selector: &str) -> Result<(), String> {
    let Some(recipe) = session.recipes().find(selector) else {
        print!("{}", views::render_recipe_detail(None, false));
        return Ok(());
    };

    let mut set = session.favorites();
    let entry = FavoriteEntry::from(&recipe);
    let favorite = set.toggle(entry);

    match session.save_favorites(&set) {
        Ok(saved) => {
            if let (Some(journal), Some(digest)) = (session.journal(), saved) {
                journal.record(StoreEvent::FavoriteToggled {
                    id_food: recipe.id.0.clone(),
                    favorite,
                    digest,
                });
            }
            print!("{}", views::render_recipe_detail(Some(&recipe), favorite));
        }
        Err(e) => {
            error!(error = %e, id = %recipe.id, "could not save favorites");
            print!("{}", views::render_recipe_detail(Some(&recipe), !favorite));
        }
    }
    Ok(())
}

fn cmd_favorites(session: &Session) -> Result<(), String> {
    print!("{}", views::render_favorites(&session.favorites()));
    Ok(())
}

fn cmd_status(session: &Session) -> Result<(), String> {
    let store = session.recipes();
    let storage = session.storage();

    println!("Storage: {}", storage.dir().display());
    println!(
        "Recipes: {} (key: {})",
        storage.item_path(store.key()).display(),
        store.key()
    );
    match store.load() {
        Ok(recipes) => println!("  Records: {}", recipes.len()),
        Err(e) => println!("  UNREADABLE: {}", e),
    }
    match store.digest() {
        Ok(d) => println!("  Digest:  {}", d),
        Err(e) => error!(error = %e, "cannot read recipe document"),
    }

    if session.config.persist_favorites {
        let key = &session.config.favorites_key;
        match favorites::read_favorites(&storage, key) {
            Ok(set) => println!("Favorites: {} (key: {})", set.len(), key),
            Err(e) => println!("Favorites: UNREADABLE (key: {}): {}", key, e),
        }
        if let Ok(doc) = storage.get_item(key) {
            println!("  Digest:  {}", digest::document_digest(doc.as_deref()));
        }
    } else {
        println!("Favorites: not persisted");
    }

    match session.journal() {
        Some(journal) => match eventlog::read_events(journal.path()) {
            Ok(events) => match events.last() {
                Some(last) => println!("Journal: {} event(s), last at {}", events.len(), last.ts),
                None => println!("Journal: empty"),
            },
            Err(e) => {
                error!(error = %e, "cannot read journal");
                println!("Journal: UNREADABLE");
            }
        },
        None => println!("Journal: disabled"),
    }
    Ok(())
}
