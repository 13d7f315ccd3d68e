//! Store keeping one JSON file per key in a directory

use super::{KeyValueStore, StoreError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Directory-backed store
///
/// Each key maps to `<dir>/<key>.json`. Writes go to a temporary file that is
/// then renamed over the old one, so a crash never leaves a half-written
/// record behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: String::new(),
            source,
        })?;
        debug!("Opened file store");
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn io_error(key: &str, source: io::Error) -> StoreError {
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(key, err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|err| Self::io_error(key, err))?;
        fs::rename(&tmp, &path).map_err(|err| Self::io_error(key, err))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(key, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("store");
        let store = FileStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn values_survive_reopen() {
        let root = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(root.path()).unwrap();
        store.set("history_state", r#"{"failures":1}"#).unwrap();

        let reopened = FileStore::open(root.path()).unwrap();
        assert_eq!(
            reopened.get("history_state").unwrap().as_deref(),
            Some(r#"{"failures":1}"#)
        );
        assert!(root.path().join("history_state.json").is_file());
        assert!(!root.path().join("history_state.json.tmp").exists());
    }

    #[test]
    fn missing_key_is_none_and_remove_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(root.path()).unwrap();

        assert_eq!(store.get("game_state").unwrap(), None);
        store.remove("game_state").unwrap();

        store.set("game_state", "{}").unwrap();
        store.remove("game_state").unwrap();
        assert_eq!(store.get("game_state").unwrap(), None);
    }
}
