//! Store backends
//!
//! Native builds keep one JSON file per key in a directory; browser builds
//! use `window.localStorage`.

use crate::persistence::{PersistError, Store};

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{PersistError, Store};

    /// Directory of `<key>.json` files
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        /// Use `dir`, creating it if needed
        pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
            let dir = dir.into();
            fs::create_dir_all(&dir).map_err(|source| PersistError::Io {
                key: dir.display().to_string(),
                source,
            })?;
            Ok(Self { dir })
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// Keys become file names, so only `[A-Za-z0-9_.-]` is allowed and
        /// the key may not start with a dot
        fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
            let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
            if key.is_empty() || key.starts_with('.') || !key.chars().all(allowed) {
                return Err(PersistError::InvalidKey(key.to_string()));
            }
            Ok(self.dir.join(format!("{key}.json")))
        }
    }

    impl Store for FileStore {
        fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
            match fs::read_to_string(self.path_for(key)?) {
                Ok(json) => Ok(Some(json)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(source) => Err(PersistError::Io {
                    key: key.to_string(),
                    source,
                }),
            }
        }

        /// Write to a temp file, then rename over the old save
        fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
            let path = self.path_for(key)?;
            let tmp = path.with_extension("json.tmp");
            let io_err = |source| PersistError::Io {
                key: key.to_string(),
                source,
            };
            fs::write(&tmp, value).map_err(io_err)?;
            fs::rename(&tmp, &path).map_err(io_err)?;
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), PersistError> {
            match fs::remove_file(self.path_for(key)?) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(PersistError::Io {
                    key: key.to_string(),
                    source,
                }),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn scratch_dir(name: &str) -> PathBuf {
            let dir = std::env::temp_dir().join(format!(
                "slide-merge-test-{}-{}",
                name,
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&dir);
            dir
        }

        #[test]
        fn test_file_store_round_trip() {
            let dir = scratch_dir("round-trip");
            let mut store = FileStore::open(&dir).unwrap();
            assert_eq!(store.load("game2048").unwrap(), None);

            store.save("game2048", "{\"score\":4}").unwrap();
            assert_eq!(store.load("game2048").unwrap().as_deref(), Some("{\"score\":4}"));
            assert!(dir.join("game2048.json").exists());
            assert!(!dir.join("game2048.json.tmp").exists());

            store.remove("game2048").unwrap();
            store.remove("game2048").unwrap();
            assert_eq!(store.load("game2048").unwrap(), None);
            let _ = fs::remove_dir_all(&dir);
        }

        #[test]
        fn test_file_store_reopen_sees_saves() {
            let dir = scratch_dir("reopen");
            let mut store = FileStore::open(&dir).unwrap();
            store.save("k", "v").unwrap();
            let reopened = FileStore::open(&dir).unwrap();
            assert_eq!(reopened.load("k").unwrap().as_deref(), Some("v"));
            let _ = fs::remove_dir_all(&dir);
        }

        #[test]
        fn test_keys_cannot_escape_the_directory() {
            let dir = scratch_dir("escape");
            let mut store = FileStore::open(dir.join("inner")).unwrap();
            for key in ["../outside", "..", "", "a/b", "a\\b", "/etc/passwd", ".hidden"] {
                assert!(
                    matches!(store.save(key, "x"), Err(PersistError::InvalidKey(_))),
                    "key {key:?} accepted"
                );
                assert!(matches!(store.load(key), Err(PersistError::InvalidKey(_))));
                assert!(matches!(store.remove(key), Err(PersistError::InvalidKey(_))));
            }
            assert!(!dir.join("outside.json").exists());
            assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 0);

            store.save("game2048.v1", "ok").unwrap();
            assert_eq!(store.load("game2048.v1").unwrap().as_deref(), Some("ok"));
            let _ = fs::remove_dir_all(&dir);
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{PersistError, Store};

    /// Browser `window.localStorage`
    #[derive(Debug, Clone)]
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    fn js_error(e: wasm_bindgen::JsValue) -> PersistError {
        PersistError::Storage(format!("{:?}", e))
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, PersistError> {
            let window = web_sys::window()
                .ok_or_else(|| PersistError::Storage("no window".to_string()))?;
            let storage = window
                .local_storage()
                .map_err(js_error)?
                .ok_or_else(|| PersistError::Storage("localStorage unavailable".to_string()))?;
            Ok(Self { storage })
        }
    }

    impl Store for LocalStorage {
        fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
            self.storage.get_item(key).map_err(js_error)
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
            self.storage.set_item(key, value).map_err(js_error)
        }

        fn remove(&mut self, key: &str) -> Result<(), PersistError> {
            self.storage.remove_item(key).map_err(js_error)
        }
    }
}
