//! FD-002: foodie.yaml parsing and validation.
//!
//! Validates structural constraints:
//! - Version must be "1.0"
//! - Storage keys must be valid and distinct
//! - Log level must be known

use super::types::FoodieConfig;
use crate::storage::validate_key;
use std::path::{Path, PathBuf};

/// Levels accepted for `log_level`.
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a foodie.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<FoodieConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a foodie.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<FoodieConfig, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Load the config at `path`, falling back to defaults when the file is absent.
pub fn load_or_default(path: &Path) -> Result<FoodieConfig, String> {
    if path.exists() {
        parse_config_file(path)
    } else {
        Ok(FoodieConfig::default())
    }
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &FoodieConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(ValidationError {
            message: format!("version must be \"1.0\", got \"{}\"", config.version),
        });
    }

    if config.storage_dir.trim().is_empty() {
        errors.push(ValidationError {
            message: "storage_dir must not be empty".to_string(),
        });
    }

    for (field, key) in [
        ("recipes_key", &config.recipes_key),
        ("favorites_key", &config.favorites_key),
    ] {
        if let Err(e) = validate_key(key) {
            errors.push(ValidationError {
                message: format!("{}: {}", field, e),
            });
        }
    }

    if config.recipes_key == config.favorites_key {
        errors.push(ValidationError {
            message: format!(
                "recipes_key and favorites_key must differ (both '{}')",
                config.recipes_key
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        errors.push(ValidationError {
            message: format!(
                "log_level must be one of: {}, got '{}'",
                LOG_LEVELS.join(", "),
                config.log_level
            ),
        });
    }

    errors
}

/// Resolve `storage_dir` against the directory holding the config file.
pub fn resolve_storage_dir(config: &FoodieConfig, config_path: &Path) -> PathBuf {
    let dir = Path::new(&config.storage_dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match config_path.parent() {
        Some(parent) => parent.join(dir),
        None => dir.to_path_buf(),
    }
}
