//! Board engine
//!
//! All gameplay rules live here. This module must stay free of storage and
//! platform dependencies:
//! - Seeded RNG only
//! - Stable scan order per direction
//! - Mutating operations report whether anything changed; callers persist

pub mod board;
pub mod engine;
pub mod resolve;
pub mod spawn;
pub mod state;

pub use board::{Board, Coord};
pub use engine::Engine;
pub use resolve::{Resolution, resolve_move};
pub use spawn::spawn_tile;
pub use state::{Direction, GameStatus, MoveOutcome, Snapshot};
