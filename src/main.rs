//! Slide Merge entry point
//!
//! Native: resumes (or starts) a saved game and plays it out with a simple
//! corner-hugging autoplayer. Web: exposes `WebGame` to the page script.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use slide_merge::consts::GRID_SIZE;
    use slide_merge::platform::{self, LocalStorage};
    use slide_merge::{Direction, PersistError, SavedGame, Settings};

    fn to_js(e: PersistError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Game handle used by the page script
    #[wasm_bindgen]
    pub struct WebGame {
        game: SavedGame<LocalStorage>,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<WebGame, JsValue> {
            platform::init_logging();
            let store = LocalStorage::open().map_err(to_js)?;
            let settings = Settings::load(&store);
            let game = SavedGame::from_settings(&settings, store).map_err(to_js)?;
            log::info!("Slide Merge ready (status {})", game.engine().status().as_str());
            Ok(WebGame { game })
        }

        /// Start/Restart button
        pub fn primary_action(&mut self) -> Result<(), JsValue> {
            self.game.new_game().map_err(to_js)
        }

        /// Handle a `KeyboardEvent.key`; returns true if the board changed
        pub fn key(&mut self, key: &str) -> Result<bool, JsValue> {
            let Some(dir) = Direction::from_key(key) else {
                return Ok(false);
            };
            let outcome = self.game.apply_move(dir).map_err(to_js)?;
            Ok(outcome.changed())
        }

        /// Tile values, row-major
        pub fn board(&self) -> Vec<u32> {
            self.game.engine().state().rows().iter().flatten().copied().collect()
        }

        pub fn score(&self) -> f64 {
            self.game.engine().score() as f64
        }

        pub fn status(&self) -> String {
            self.game.engine().status().as_str().to_string()
        }

        /// Row-major indices of cells to animate
        pub fn changed_cells(&self) -> Vec<u32> {
            self.game
                .engine()
                .changed_cells()
                .iter()
                .map(|c| (c.row * GRID_SIZE + c.col) as u32)
                .collect()
        }

        /// Call `callback` when the game is won
        pub fn on_win(&mut self, callback: js_sys::Function) {
            self.game.on_win(move || {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log::warn!("Win callback failed: {:?}", e);
                }
            });
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use slide_merge::platform::{self, FileStore};
    use slide_merge::sim::resolve_move;
    use slide_merge::{Direction, GameStatus, PersistError, SavedGame, Settings};

    /// Stop the demo after this many moves even if the game is still going
    const MAX_MOVES: u32 = 10_000;

    /// Preference order: keep big tiles in the bottom-left corner
    const PREFERENCE: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    pub fn run() -> Result<(), PersistError> {
        platform::init_logging();
        log::info!("Slide Merge (native) starting...");

        let store = FileStore::open(std::env::temp_dir().join("slide-merge"))?;
        log::info!("Saving to {}", store.dir().display());
        let settings = Settings::load(&store);
        let mut game = SavedGame::from_settings(&settings, store)?;
        game.on_win(|| println!("*** 2048! ***"));

        if game.engine().status() == GameStatus::Playing {
            log::info!("Continuing saved game at score {}", game.engine().score());
        } else {
            game.new_game()?;
        }

        let mut moves = 0;
        while game.engine().status() == GameStatus::Playing && moves < MAX_MOVES {
            let board = game.engine().state();
            let dir = PREFERENCE.into_iter().find(|&dir| {
                let mut probe = board;
                resolve_move(&mut probe, dir).moved
            });
            let Some(dir) = dir else {
                break;
            };
            game.apply_move(dir)?;
            moves += 1;
        }

        let engine = game.engine();
        println!("{}", engine.state());
        println!(
            "Status: {}  Score: {}  Highest: {}  Moves: {}",
            engine.status().as_str(),
            engine.score(),
            engine.state().highest_tile(),
            moves
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = autoplay::run() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame::new, this is just to satisfy the compiler
}
