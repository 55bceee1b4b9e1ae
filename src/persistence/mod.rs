//! Save/load persistence
//!
//! Features:
//! - Key-value `Store` abstraction (memory, file, browser LocalStorage)
//! - Versioned JSON envelope, legacy unversioned saves still readable
//! - Corrupt snapshots rejected on load; the fresh state is kept
//! - `SavedGame` adapter that saves after every state change

pub mod envelope;
pub mod saved_game;

use std::collections::HashMap;

use thiserror::Error;

pub use envelope::{SAVE_VERSION, SnapshotError, decode_snapshot, encode_snapshot};
pub use saved_game::SavedGame;

/// Default namespace for the game snapshot
pub const DEFAULT_SAVE_KEY: &str = "game2048";

/// Failure talking to a store. Never swallowed by the engine adapter.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed for [{key}]: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Storage(String),
    #[error("invalid storage key [{0}]")]
    InvalidKey(String),
}

/// Durable key-value storage for JSON strings
pub trait Store {
    /// Last value saved under `key`, or None if nothing was saved
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "v1").unwrap();
        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }
}
