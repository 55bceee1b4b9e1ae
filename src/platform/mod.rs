//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, JSON files on native)
//! - Logger setup

pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Install the platform logger
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    env_logger::init();
}

/// Install the platform logger and panic hook
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}
