//! High score persistence
//!
//! The high score is a single scalar stored under a fixed key: read once
//! at startup, written whenever a run beats it. Settings ride along in the
//! same key-value store.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key the high score lives under
pub const HIGH_SCORE_KEY: &str = "troubledWatersHighScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("storage rejected write to `{0}`")]
    Rejected(String),
}

/// Key-value storage collaborator
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Stored high score, zero when nothing was saved yet
    fn load_high_score(&self) -> Result<u64, StoreError> {
        match self.get(HIGH_SCORE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(raw.trim())?),
            None => Ok(0),
        }
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), StoreError> {
        self.set(HIGH_SCORE_KEY, &score.to_string())
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json)
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// Number of successful writes
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(score: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(HIGH_SCORE_KEY.to_string(), score.to_string());
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// JSON file holding a flat key-value map (native builds)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<std::collections::BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Default::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        log::debug!("Wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage (wasm only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Rejected(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_high_score_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.load_high_score().unwrap(), 0);
    }

    #[test]
    fn test_high_score_round_trip() {
        let mut store = MemoryStore::new();
        store.save_high_score(451).unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("451"));
        assert_eq!(store.load_high_score().unwrap(), 451);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_malformed_high_score() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        assert!(matches!(
            store.load_high_score(),
            Err(StoreError::Malformed(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_persists_between_instances() {
        let path = std::env::temp_dir().join(format!(
            "troubled-waters-store-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::new(&path);
        assert_eq!(store.load_high_score().unwrap(), 0);
        store.save_high_score(77).unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load_high_score().unwrap(), 77);
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));

        let _ = std::fs::remove_file(&path);
    }
}
