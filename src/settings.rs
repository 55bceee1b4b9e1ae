//! Game settings and preferences
//!
//! Persisted separately from game saves, under their own store key.

use serde::{Deserialize, Serialize};

use crate::persistence::{DEFAULT_SAVE_KEY, PersistError, Store};
use crate::sim::Board;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Store key for the game snapshot
    pub save_key: String,
    /// Fixed RNG seed (None = fresh entropy each session)
    pub seed: Option<u64>,
    /// Board copied on every start/restart (None = empty board)
    pub initial_board: Option<Board>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_key: DEFAULT_SAVE_KEY.to_string(),
            seed: None,
            initial_board: None,
        }
    }
}

impl Settings {
    /// Store key
    pub const STORAGE_KEY: &'static str = "slide_merge_settings";

    /// Starting preset, falling back to an empty board when unset or illegal
    pub fn initial_board(&self) -> Board {
        match self.initial_board {
            Some(board) if board.is_valid() => board,
            Some(_) => {
                log::warn!("Initial board preset has illegal tiles, using an empty board");
                Board::EMPTY
            }
            None => Board::EMPTY,
        }
    }

    /// Load settings, using defaults when absent or unreadable
    pub fn load(store: &impl Store) -> Self {
        match store.load(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Discarding unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut impl Store) -> Result<(), PersistError> {
        let json = serde_json::to_string(self)?;
        store.save(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
