//! # Storage
//!
//! Key-value persistence for session state. Each key holds one JSON
//! document; the file-backed store keeps one `.json` file per key in the
//! data directory.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// String-valued key-value persistence
///
/// Values are stored as JSON text. [`KeyValueStore::load`] never fails: a
/// missing key, an unreadable entry or a corrupt value all yield the
/// caller's default.
pub trait KeyValueStore {
    /// Read the raw stored text for a key
    fn load_raw(&self, key: &str) -> Result<Option<String>>;

    /// Store raw text under a key
    fn save_raw(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn clear(&mut self, key: &str) -> Result<()>;

    /// Load and deserialize a value, falling back to `default`
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        let raw = match self.load_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("Failed to read stored key '{}': {:#}", key, e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring corrupt stored value for key '{}': {}", key, e);
                default
            }
        }
    }

    /// Serialize and store a value
    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for key '{}'", key))?;
        self.save_raw(key, &json)
    }
}

/// In-memory store, used for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        info!("Using data directory {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!("Loaded key '{}' from {}", key, path.display());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Saved key '{}' to {}", key, path.display());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Cleared key '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.save("numbers", &vec![1, 2, 3]).unwrap();
        assert_eq!(store.load("numbers", Vec::<i32>::new()), vec![1, 2, 3]);

        store.clear("numbers").unwrap();
        assert!(!store.contains_key("numbers"));
        assert_eq!(store.load("numbers", vec![9]), vec![9]);
    }

    #[test]
    fn test_corrupt_value_yields_default() {
        let mut store = MemoryStore::new();
        store.save_raw("flag", "{not json").unwrap();
        assert!(!store.load("flag", false));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("data")).unwrap();

        store.save("grocery-store-mode", &true).unwrap();
        assert!(store.path_for("grocery-store-mode").exists());
        assert!(store.load("grocery-store-mode", false));

        store.clear("grocery-store-mode").unwrap();
        assert!(!store.path_for("grocery-store-mode").exists());
        store.clear("grocery-store-mode").unwrap();
    }

    #[test]
    fn test_file_store_missing_and_corrupt_keys() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        assert_eq!(store.load_raw("absent").unwrap(), None);
        assert_eq!(store.load("absent", 42), 42);

        fs::write(store.path_for("broken"), "[1, 2").unwrap();
        assert_eq!(store.load("broken", vec![0]), vec![0]);

        store.save_raw("broken", "[1, 2]").unwrap();
        assert_eq!(store.load("broken", vec![0]), vec![1, 2]);
    }

    #[test]
    fn test_path_for_sanitizes_keys() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let path = store.path_for("../escape/key");
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.file_name().unwrap(), "___escape_key.json");
    }
}
