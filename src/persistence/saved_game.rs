//! Engine + store adapter
//!
//! Loads the saved snapshot once when opened and writes it back after every
//! operation that changed the engine. Store failures are returned to the
//! caller; the in-memory game is kept so a later save can catch up.

use super::envelope::{decode_snapshot, encode_snapshot};
use super::{PersistError, Store};
use crate::settings::Settings;
use crate::sim::{Direction, Engine, MoveOutcome};

/// A game whose progress is saved to a store
#[derive(Debug)]
pub struct SavedGame<S: Store> {
    engine: Engine,
    store: S,
    key: String,
}

impl<S: Store> SavedGame<S> {
    /// Wrap `engine`, replacing its state with the snapshot saved under `key`
    /// if one exists and is valid.
    pub fn open(mut engine: Engine, store: S, key: impl Into<String>) -> Result<Self, PersistError> {
        let key = key.into();
        if let Some(json) = store.load(&key)? {
            match decode_snapshot(&json) {
                Ok(snapshot) => {
                    log::info!(
                        "Resumed saved game (score {}, status {})",
                        snapshot.score,
                        snapshot.status.as_str()
                    );
                    engine.restore(snapshot);
                }
                Err(e) => log::warn!("Ignoring saved game under [{}]: {}", key, e),
            }
        }
        Ok(Self { engine, store, key })
    }

    /// Build the engine from settings (seed, preset) and open the save
    pub fn from_settings(settings: &Settings, store: S) -> Result<Self, PersistError> {
        let initial = settings.initial_board();
        let engine = match settings.seed {
            Some(seed) => Engine::with_initial(initial, seed),
            None => Engine::from_entropy(initial),
        };
        Self::open(engine, store, settings.save_key.clone())
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Register a listener for the win event
    pub fn on_win(&mut self, listener: impl FnMut() + 'static) {
        self.engine.on_win(listener);
    }

    pub fn start(&mut self) -> Result<(), PersistError> {
        self.engine.start();
        self.save()
    }

    pub fn restart(&mut self) -> Result<(), PersistError> {
        self.engine.restart();
        self.save()
    }

    pub fn new_game(&mut self) -> Result<(), PersistError> {
        self.engine.new_game();
        self.save()
    }

    /// Apply a move; saves only if the board changed
    pub fn apply_move(&mut self, dir: Direction) -> Result<MoveOutcome, PersistError> {
        let outcome = self.engine.apply_move(dir);
        if outcome.changed() {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Write the current snapshot
    pub fn save(&mut self) -> Result<(), PersistError> {
        let json = encode_snapshot(&self.engine.snapshot())?;
        self.store.save(&self.key, &json)?;
        log::debug!("Game saved under [{}]", self.key);
        Ok(())
    }

    /// Remove the saved snapshot (the in-memory game is untouched)
    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.store.remove(&self.key)?;
        log::info!("Saved game cleared");
        Ok(())
    }

    pub fn into_parts(self) -> (Engine, S) {
        (self.engine, self.store)
    }
}
