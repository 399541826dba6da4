//! Durable string key-value storage.
//!
//! A small analogue of browser local storage: string keys mapped to string
//! values, each write durable before `set_item` returns.

use advisor_core::error::{AdvisorError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::atomic_json::AtomicJsonFile;

pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}

type Document = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object on disk.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<Document>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    fn write_with<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Document),
    {
        self.file
            .update_or_reset(Document::new(), |document| {
                apply(document);
                Ok(())
            })
            .map_err(|e| AdvisorError::persistence(e.to_string()))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let document = self
            .file
            .load()
            .map_err(|e| AdvisorError::persistence(e.to_string()))?;
        Ok(document.and_then(|mut document| document.remove(key)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.write_with(|document| {
            document.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.write_with(|document| {
            document.remove(key);
        })
    }
}

/// Process-local store, used in tests and when no storage directory is available.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<Document>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, Document>> {
        self.items
            .lock()
            .map_err(|e| AdvisorError::persistence(format!("Failed to lock store: {}", e)))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        FileKeyValueStore::new(path.clone())
            .set_item("basket", "[1,2]")
            .unwrap();

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(reopened.get_item("basket").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(reopened.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_file_store_keeps_unrelated_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("storage.json"));

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.remove_item("a").unwrap();

        assert_eq!(store.get_item("a").unwrap(), None);
        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();
        let store = FileKeyValueStore::new(path);

        assert!(store.get_item("basket").is_err());
        store.set_item("basket", "[]").unwrap();
        assert_eq!(store.get_item("basket").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKeyValueStore::new();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }
}
