//! Persistence adapter for the task collection.
//!
//! The whole collection is stored as one JSON array under a fixed key in a
//! small key-value store. [`FileStore`] keeps each key in its own file inside
//! the data directory; [`MemoryStore`] keeps them in a map and backs tests.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::task::Task;

/// Key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks";

/// Key an unreadable collection is moved to before starting fresh.
pub const CORRUPT_KEY: &str = "tasks.corrupt";

/// Durable string key-value storage.
pub trait KvStore {
    /// Read the value stored under `key`, or `None` if the key was never set.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Key-value store backed by one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    /// Path of the file that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        // Atomic-ish write via temp + rename.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &path)?;
        Ok(())
    }
}

/// In-memory key-value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key before handing the store to a [`crate::store::TaskStore`].
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the task collection.
///
/// A missing key yields an empty collection. Content that does not parse is
/// copied to [`CORRUPT_KEY`] and an empty collection is returned.
pub fn load_tasks<S: KvStore + ?Sized>(store: &mut S) -> Result<Vec<Task>> {
    let Some(raw) = store.get_item(TASKS_KEY)? else {
        debug!("no saved tasks, starting empty");
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => {
            debug!(count = tasks.len(), "loaded tasks");
            Ok(tasks)
        }
        Err(e) => {
            warn!(error = %e, backup = CORRUPT_KEY, "saved tasks are unreadable, starting fresh");
            store.set_item(CORRUPT_KEY, &raw)?;
            Ok(Vec::new())
        }
    }
}

/// Write the full collection under [`TASKS_KEY`].
pub fn save_tasks<S: KvStore + ?Sized>(store: &mut S, tasks: &[Task]) -> Result<()> {
    let data = serde_json::to_string(tasks)?;
    store.set_item(TASKS_KEY, &data)?;
    debug!(count = tasks.len(), "saved tasks");
    Ok(())
}
