//! Mode persistence backends
//!
//! Storage is a best-effort cache for the user's mode selection, never the
//! source of truth. Callers in this crate log and swallow every
//! [`StorageError`].

use crate::error::StorageError;
use rustc_hash::FxHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Key/value store for the persisted mode
pub trait ModeStorage: Send + Sync {
    /// Read the value stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage; clones share the same entries
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<FxHashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an entry directly
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Seed an entry directly
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }
}

impl ModeStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }
}

/// Storage backed by a TOML file of string entries
///
/// A missing file reads as empty. Writes rewrite the whole file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<toml::Table, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => content
                .parse::<toml::Table>()
                .map_err(|e| StorageError::Format(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(toml::Table::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ModeStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let table = self.load()?;
        match table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(StorageError::Format(format!(
                "entry {key:?} is a {}, expected a string",
                other.type_str()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut table = self.load()?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string(&table).map_err(|e| StorageError::Format(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Storage that always fails, as when storage is disabled
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStorage;

impl ModeStorage for UnavailableStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage is disabled".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".into()))
    }
}
