//! Key-value persistence for the progress aggregate and feature records.
//!
//! Every record is a JSON document stored under a string key. Backends only
//! move strings; typed encode/decode lives in the helpers below so the same
//! store logic runs against a directory of files or an in-memory map.

use crate::error::PersistenceError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub trait KeyValueStore: Send + Sync {
    /// Read the raw record under `key`, `None` when nothing was stored
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove the record; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Decode the record under `key`.
pub fn load_record<T, S>(store: &S, key: &str) -> Result<Option<T>, PersistenceError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistenceError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Decode the record under `key`, falling back to `T::default()` when it is
/// missing, unreadable or corrupt.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match load_record(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("No stored record for {}, starting fresh", key);
            T::default()
        }
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults", key, e);
            T::default()
        }
    }
}

pub fn save_record<T, S>(store: &S, key: &str, value: &T) -> Result<(), PersistenceError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Save and log on failure. Returns whether the write landed.
pub fn save_best_effort<T, S>(store: &S, key: &str, value: &T) -> bool
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    match save_record(store, key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to persist {}: {}. Keeping in-memory state", key, e);
            false
        }
    }
}

/// One `<key>.json` file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn io_error(key: &str, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;

        // Write-then-rename so a crash never leaves a half-written record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::io_error(key, e))
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail, to simulate unavailable storage
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Store a raw string, bypassing encoding (used to plant corrupt records)
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_writable(&self, key: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io {
                key: key.to_string(),
                source: std::io::Error::new(ErrorKind::Other, "storage unavailable"),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check_writable(key)?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.check_writable(key)?;
        self.lock().remove(key);
        Ok(())
    }
}
