//! File-backed key-value store with automatic serialization.

use crate::PrefsError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Typed key-value store persisted as a single JSON file.
///
/// Values are serialized through `serde_json`; every mutation is flushed to
/// disk so the store survives an abrupt exit. An unreadable backing file is
/// treated as an empty store rather than a fatal error, the same way a
/// browser would survive corrupt `localStorage` content.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl LocalStore {
    /// Open the store at the given path, creating parent directories as
    /// needed. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "discarding unreadable store file");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self { path, entries })
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist. A value that no longer
    /// deserializes to `T` is a `Serialize` error, which callers may treat
    /// as a corrupt record and remove.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PrefsError> {
        match self.entries.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Set a value and flush to disk.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PrefsError> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    /// Remove a value and flush to disk. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PrefsError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
