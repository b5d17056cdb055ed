//! FD-010: File-backed storage — one JSON file per key, atomic writes.

use super::{validate_key, KeyValueStore};
use std::path::{Path, PathBuf};

/// Storage rooted at a directory. Each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Derive the file path for a key.
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Ok(Some(content))
    }

    /// Write atomically: temp file, then rename over the old value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        validate_key(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| format!("cannot create dir {}: {}", self.dir.display(), e))?;

        let path = self.item_path(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)
            .map_err(|e| format!("cannot write {}: {}", tmp_path.display(), e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            format!(
                "cannot rename {} → {}: {}",
                tmp_path.display(),
                path.display(),
                e
            )
        })?;
        Ok(())
    }
}
