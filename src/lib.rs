//! Slide Merge - rule engine for a 4x4 sliding-tile merge puzzle
//!
//! Core modules:
//! - `sim`: Board engine (move resolution, scoring, spawns, win/lose)
//! - `persistence`: Snapshot envelope, stores, and the saving adapter
//! - `platform`: Native/browser storage backends
//! - `settings`: Player preferences and the starting preset

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use persistence::{MemoryStore, PersistError, SavedGame, Store};
pub use settings::Settings;
pub use sim::{Board, Coord, Direction, Engine, GameStatus, MoveOutcome};

/// Game rule constants
pub mod consts {
    /// Board is GRID_SIZE x GRID_SIZE
    pub const GRID_SIZE: usize = 4;
    /// Merging into this value wins the game
    pub const WIN_TILE: u32 = 2048;
    /// Chance a spawned tile is a 4 instead of a 2
    pub const FOUR_PROBABILITY: f64 = 0.1;
    /// Largest tile a 4x4 game can produce (2^17); bigger values are corrupt
    pub const MAX_TILE: u32 = 1 << 17;
    /// Tiles placed by `Engine::start`
    pub const STARTING_TILES: usize = 2;
}
