//! FD-010/011: Key-value storage abstraction — file-backed and in-memory.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// String-keyed, string-valued storage. One value per key, whole-value writes.
pub trait KeyValueStore {
    /// Read the value at `key`. `Ok(None)` when nothing was ever stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;

    /// Replace the value at `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set_item(key, value)
    }
}

/// Check that a key is usable by every store: non-empty, `[A-Za-z0-9_-]`.
pub fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("storage key must not be empty".to_string());
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(format!("storage key '{}' contains invalid character '{}'", key, bad));
    }
    Ok(())
}
