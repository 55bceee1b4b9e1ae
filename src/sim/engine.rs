//! The board engine
//!
//! Owns the grid, score, and status of one game and applies the rules.
//! The engine never touches storage: `start`/`restart`/`new_game` always
//! change the state, and `apply_move` returns a `MoveOutcome` telling the
//! caller whether anything needs saving.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::{Board, Coord};
use super::resolve::resolve_move;
use super::spawn::spawn_tile;
use super::state::{Direction, GameStatus, MoveOutcome, Snapshot};
use crate::consts::STARTING_TILES;

/// Callback fired when a game is won
pub type WinListener = Box<dyn FnMut()>;

/// Rule engine for a single game
pub struct Engine {
    /// Template copied on start/restart
    initial: Board,
    cells: Board,
    score: u64,
    status: GameStatus,
    /// Cells touched by the last operation (merges, then the spawn)
    changed: Vec<Coord>,
    seed: u64,
    rng: Pcg32,
    /// Cleared once the win event fires, re-armed by start
    win_armed: bool,
    win_listeners: Vec<WinListener>,
}

impl Engine {
    /// Idle engine on an empty board with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_initial(Board::EMPTY, seed)
    }

    /// Idle engine using `initial` as the template board.
    ///
    /// Presets with illegal tile values are replaced by an empty board.
    pub fn with_initial(initial: Board, seed: u64) -> Self {
        let initial = if initial.is_valid() {
            initial
        } else {
            log::warn!("Ignoring invalid initial board preset");
            Board::EMPTY
        };
        Self {
            initial,
            cells: initial,
            score: 0,
            status: GameStatus::Idle,
            changed: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            win_armed: true,
            win_listeners: Vec::new(),
        }
    }

    /// Idle engine seeded from system entropy
    pub fn from_entropy(initial: Board) -> Self {
        Self::with_initial(initial, rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Register a listener for the win event
    pub fn on_win(&mut self, listener: impl FnMut() + 'static) {
        self.win_listeners.push(Box::new(listener));
    }

    /// Reset to the initial board, switch to Playing, and spawn two tiles.
    pub fn start(&mut self) {
        self.cells = self.initial;
        self.status = GameStatus::Playing;
        self.changed.clear();
        self.win_armed = true;
        for _ in 0..STARTING_TILES {
            self.spawn();
        }
        log::info!("Game started (status {})", self.status.as_str());
    }

    /// Back to Idle with score 0 and the initial board. Never spawns.
    pub fn restart(&mut self) {
        self.score = 0;
        self.status = GameStatus::Idle;
        self.cells = self.initial;
        self.changed.clear();
        log::info!("Game restarted");
    }

    /// Start from idle, or restart and start again from any other status
    pub fn new_game(&mut self) {
        if self.status != GameStatus::Idle {
            self.restart();
        }
        self.start();
    }

    /// Slide and merge in `dir`, then spawn a tile if anything moved.
    pub fn apply_move(&mut self, dir: Direction) -> MoveOutcome {
        self.changed.clear();
        if self.status != GameStatus::Playing {
            return MoveOutcome::Ignored;
        }

        let res = resolve_move(&mut self.cells, dir);
        if !res.moved {
            if !self.cells.can_move() {
                self.status = GameStatus::Lose;
                log::info!("No moves left, final score {}", self.score);
                return MoveOutcome::Stuck;
            }
            log::debug!("{:?} blocked", dir);
            return MoveOutcome::Blocked;
        }

        self.score = self.score.saturating_add(res.points);
        self.changed.extend_from_slice(&res.merged);
        self.spawn();

        let won = res.reached_win && self.status != GameStatus::Win;
        if won {
            self.status = GameStatus::Win;
            self.announce_win();
        } else if !self.cells.can_move() {
            self.status = GameStatus::Lose;
            log::info!("No moves left, final score {}", self.score);
        }

        log::debug!(
            "{:?}: +{} points, {} merges, status {}",
            dir,
            res.points,
            res.merged.len(),
            self.status.as_str()
        );
        MoveOutcome::Moved {
            points: res.points,
            won,
        }
    }

    pub fn move_up(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Up)
    }

    pub fn move_down(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Down)
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Left)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Right)
    }

    /// True if an empty cell or an equal orthogonal pair exists
    pub fn can_move(&self) -> bool {
        self.cells.can_move()
    }

    /// Copy of the board; changes to it never reach the engine
    pub fn state(&self) -> Board {
        self.cells
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Cells mutated by the most recent operation, for highlighting
    pub fn changed_cells(&self) -> &[Coord] {
        &self.changed
    }

    pub fn initial_state(&self) -> Board {
        self.initial
    }

    /// Persisted portion of the state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            status: self.status,
            cells: self.cells,
        }
    }

    /// Replace the state with a saved snapshot.
    ///
    /// Returns false (leaving the engine untouched) if the snapshot holds
    /// illegal tile values.
    pub fn restore(&mut self, snapshot: Snapshot) -> bool {
        if !snapshot.is_valid() {
            return false;
        }
        self.score = snapshot.score;
        self.status = snapshot.status;
        self.cells = snapshot.cells;
        self.changed.clear();
        self.win_armed = snapshot.status != GameStatus::Win;
        true
    }

    /// Place one tile, or mark the game lost if the board is stuck
    fn spawn(&mut self) {
        if !self.cells.can_move() {
            self.status = GameStatus::Lose;
            log::warn!("Board is stuck, no tile spawned");
            return;
        }
        if let Some(at) = spawn_tile(&mut self.cells, &mut self.rng) {
            self.changed.push(at);
        }
    }

    fn announce_win(&mut self) {
        if !self.win_armed {
            return;
        }
        self.win_armed = false;
        log::info!("Winning tile reached, score {}", self.score);
        for listener in self.win_listeners.iter_mut() {
            listener();
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("cells", &self.cells)
            .field("score", &self.score)
            .field("status", &self.status)
            .field("changed", &self.changed)
            .field("seed", &self.seed)
            .field("win_listeners", &self.win_listeners.len())
            .finish_non_exhaustive()
    }
}
