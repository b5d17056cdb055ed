//! Journal — mutation provenance and document digests.

pub mod digest;
pub mod eventlog;

use crate::core::types::StoreEvent;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Handle to a journal file. Appends never fail the caller.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Journal living next to the documents in a storage directory.
    pub fn in_dir(storage_dir: &Path) -> Self {
        Self::new(eventlog::event_log_path(storage_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event; failures are logged and dropped.
    pub fn record(&self, event: StoreEvent) {
        if let Err(e) = eventlog::append_event(&self.path, event) {
            warn!(error = %e, path = %self.path.display(), "journal append failed");
        }
    }
}
