//! Key-value persistence for conversation histories.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// The store key under which the chat history lives.
pub const HISTORY_KEY: &str = "chat_history";

/// A synchronous key-value store.
///
/// Each `set` replaces the whole value for the key, so callers never
/// need transactional discipline. Implementations are expected to be
/// cheap enough to call inline from the controller.
pub trait Store: Send {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Removes the value stored under `key`. Removing an absent key
    /// is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// An in-memory store.
///
/// Clones share the same underlying map, like two views of one browser
/// storage area, so a fresh controller can be initialized from what a
/// previous one persisted. This is the default store of the controller
/// builder.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A store that keeps one file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. The directory is created on
    /// the first write.
    #[inline]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Some(raw),
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    debug!("failed to read the value of {key}: {err}");
                }
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}
