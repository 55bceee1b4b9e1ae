//! Game state types
//!
//! Everything that must survive a reload lives in `Snapshot`.

use serde::{Deserialize, Serialize};

use super::board::Board;

/// Coarse phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Moves are accepted
    Playing,
    /// A merge reached the winning tile
    Win,
    /// No move or spawn is possible
    Lose,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Win => "win",
            GameStatus::Lose => "lose",
        }
    }

    /// Win and Lose end the game until restart
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Win | GameStatus::Lose)
    }
}

/// A direction to slide/merge tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row delta, col delta) of one step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Moves toward increasing index scan each line from the far end
    pub fn scans_reversed(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// Lines run along rows for horizontal moves, along columns for vertical ones
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Map browser `KeyboardEvent.key` names (and WASD) to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// What a call to `Engine::apply_move` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Status was not `Playing`; nothing happened
    Ignored,
    /// No tile could slide or merge; state untouched
    Blocked,
    /// Nothing could move and the board is full with no merges; now lost
    Stuck,
    /// Tiles moved and a tile spawned
    Moved {
        /// Points added by merges during this move
        points: u64,
        /// This move produced the winning tile for the first time
        won: bool,
    },
}

impl MoveOutcome {
    /// True when the state changed and needs saving
    pub fn changed(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. } | MoveOutcome::Stuck)
    }
}

/// Persisted portion of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub status: GameStatus,
    pub cells: Board,
}

impl Snapshot {
    /// Board values are legal tiles
    pub fn is_valid(&self) -> bool {
        self.cells.is_valid()
    }
}
