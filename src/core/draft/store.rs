//! Pluggable draft storage port.
//!
//! The draft manager talks to durable storage through the [`DraftStore`]
//! trait so it can be exercised in tests without touching the filesystem
//! and ported to any key-value substrate. Two implementations ship:
//! [`FileDraftStore`] (one JSON file per key under the data directory) and
//! [`MemoryDraftStore`] (tests, ephemeral sessions).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("draft storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Minimal key-value port for draft persistence.
///
/// Implementations are last-write-wins and hold at most one value per key.
/// There is no cross-process coordination: two concurrent instances writing
/// the same key will clobber each other, which is accepted behavior.
pub trait DraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, DraftStoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), DraftStoreError>;
    fn delete(&self, key: &str) -> Result<(), DraftStoreError>;
}

/// File-backed store: `<dir>/<key>.json`.
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, DraftStoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), DraftStoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock only means a panicking test thread; the map itself
        // is still usable.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DraftStore for MemoryDraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, DraftStoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), DraftStoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryDraftStore::new();
        assert!(store.read("k").unwrap().is_none());
        store.write("k", "v1").unwrap();
        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));
        store.delete("k").unwrap();
        assert!(store.read("k").unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDraftStore::new(dir.path().join("drafts"));

        assert!(store.read("draft").unwrap().is_none());
        store.write("draft", "{\"x\":1}").unwrap();
        assert_eq!(store.read("draft").unwrap().as_deref(), Some("{\"x\":1}"));

        store.delete("draft").unwrap();
        assert!(store.read("draft").unwrap().is_none());
        // Deleting an absent key is not an error.
        store.delete("draft").unwrap();
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());
        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();
        store.delete("a").unwrap();
        assert_eq!(store.read("b").unwrap().as_deref(), Some("2"));
    }
}
