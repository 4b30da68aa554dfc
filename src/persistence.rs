//! Durable key-value storage for small boolean flags
//!
//! The tour only ever stores a single completion flag, so the port is kept
//! to three boolean operations. Backends are swappable: a JSON file under the
//! user's data directory for normal runs and an in-memory map for tests or
//! `--memory-storage`.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence port used by the tour store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StorageError>;
    fn set(&mut self, key: &str, value: bool) -> Result<(), StorageError>;
    fn clear(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Session-only storage, nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StorageError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Flat JSON object (`{"key": true}`) stored on disk
/// Every write rewrites the whole file; the map is tiny
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data_dir>/orbit-dashboard/state.json`
    pub fn default_path() -> Result<PathBuf, StorageError> {
        let mut path = dirs::data_dir()
            .ok_or_else(|| StorageError::Unavailable("no data directory for this user".into()))?;
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::storage::STATE_FILENAME);
        Ok(path)
    }

    fn read_map(&self) -> Result<BTreeMap<String, bool>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "State file missing, treating as empty");
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        // Unreadable content counts as empty so the next write repairs the file
        let value: serde_json::Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "State file is not valid JSON, ignoring it");
                return Ok(BTreeMap::new());
            }
        };
        let serde_json::Value::Object(entries) = value else {
            warn!(path = %self.path.display(), "State file is not a JSON object, ignoring it");
            return Ok(BTreeMap::new());
        };

        let mut map = BTreeMap::new();
        for (key, value) in entries {
            match value.as_bool() {
                Some(flag) => {
                    map.insert(key, flag);
                }
                None => warn!(path = %self.path.display(), key = %key, "Ignoring non-boolean state entry"),
            }
        }
        Ok(map)
    }

    fn write_map(&self, map: &BTreeMap<String, bool>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(map).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, json).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), entries = map.len(), "Saved state file");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StorageError> {
        Ok(self.read_map()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value);
        self.write_map(&map)
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_clear() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("flag").unwrap(), None);

        store.set("flag", true).unwrap();
        assert_eq!(store.get("flag").unwrap(), Some(true));

        store.clear("flag").unwrap();
        assert_eq!(store.get("flag").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get("walkthrough_completed").unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = JsonFileStore::new(&path);
        store.set("walkthrough_completed", true).unwrap();
        drop(store);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("walkthrough_completed").unwrap(), Some(true));
    }

    #[test]
    fn test_file_store_clear_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("state.json"));
        store.set("a", true).unwrap();
        store.set("b", false).unwrap();

        store.clear("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), Some(false));
    }

    #[test]
    fn test_file_store_clear_missing_key_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = JsonFileStore::new(&path);

        store.clear("walkthrough_completed").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_invalid_json_reads_empty_and_is_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("walkthrough_completed").unwrap(), None);

        store.set("walkthrough_completed", true).unwrap();
        assert_eq!(JsonFileStore::new(&path).get("walkthrough_completed").unwrap(), Some(true));
    }

    #[test]
    fn test_file_store_skips_non_boolean_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"walkthrough_completed": "true", "other": false}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("walkthrough_completed").unwrap(), None);
        assert_eq!(store.get("other").unwrap(), Some(false));
    }

    #[test]
    fn test_file_store_non_object_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[true]").unwrap();

        assert_eq!(JsonFileStore::new(&path).get("walkthrough_completed").unwrap(), None);
    }
}
