use std::io;
use std::path::PathBuf;
use std::fs;

use thiserror::Error;

use crate::board::Board;

/// The one key the board lives under. Saves overwrite it unconditionally.
pub const STORAGE_KEY: &str = "kanban_tasks";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access the task store: {0}")]
    Store(#[from] io::Error),
    /// The stored payload did not parse. Surfaced to the caller rather
    /// than silently replaced with an empty board, so corrupted state is
    /// visible instead of discarded.
    #[error("stored board is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// String-keyed, string-valued storage. The board only ever uses a single
/// fixed key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> io::Result<()>;
}

/// One JSON file per key under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> FileStore {
        FileStore { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.path(key);
        if path.exists() {
            fs::read_to_string(path).map(Some)
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, value: String) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> io::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Round-trips the board through the store as pretty-printed JSON.
#[derive(Debug)]
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> PersistenceGateway<S> {
        PersistenceGateway { store }
    }

    pub fn save(&mut self, board: &Board) -> Result<(), PersistError> {
        let payload = serde_json::to_string_pretty(board)?;
        self.store.set(STORAGE_KEY, payload)?;
        Ok(())
    }

    /// `Ok(None)` when nothing was ever saved; the caller keeps whatever
    /// board it seeded. A present but unparseable payload is an error.
    pub fn load(&self) -> Result<Option<Board>, PersistError> {
        match self.store.get(STORAGE_KEY)? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }
}
