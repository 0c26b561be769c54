use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use connect_logging::connect_debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to parse store {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize store: {0}")]
    Serialize(String),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistent string-list store keyed by namespaced names.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;
    fn set(&self, key: &str, value: Vec<String>) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read-modify-write of one key without interleaving other writers.
    /// Returning `None` from `f` removes the key.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<Vec<String>>) -> Option<Vec<String>>,
    ) -> Result<(), StoreError>;

    fn get_or(&self, key: &str, default: Vec<String>) -> Result<Vec<String>, StoreError> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<String>>>, StoreError> {
        self.entries.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<String>) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<Vec<String>>) -> Option<Vec<String>>,
    ) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        if let Some(value) = f(entries.remove(key)) {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedStore {
    entries: BTreeMap<String, Vec<String>>,
}

/// Whole-file RON store. Every write rewrites the file atomically.
#[derive(Debug)]
pub struct RonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<PersistedStore, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PersistedStore::default());
            }
            Err(err) => return Err(StoreError::Io(err)),
        };
        ron::from_str(&content).map_err(|err| StoreError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    fn save(&self, state: &PersistedStore) -> Result<(), StoreError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(state, pretty)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;
        AtomicFileWriter::new().write(&self.path, &content)?;
        connect_debug!("Wrote store {:?}", self.path);
        Ok(())
    }

    fn modify(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<Vec<String>>) -> Option<Vec<String>>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut state = self.load()?;
        if let Some(value) = f(state.entries.remove(key)) {
            state.entries.insert(key.to_string(), value);
        }
        self.save(&state)
    }
}

impl KeyValueStore for RonFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.entries.remove(key))
    }

    fn set(&self, key: &str, value: Vec<String>) -> Result<(), StoreError> {
        let mut value = Some(value);
        self.modify(key, &mut |_| value.take())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.modify(key, &mut |_| None)
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<Vec<String>>) -> Option<Vec<String>>,
    ) -> Result<(), StoreError> {
        self.modify(key, f)
    }
}
