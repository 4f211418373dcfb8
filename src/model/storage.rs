//! Storage adapter for record collections
//!
//! Backends only move raw strings under a key; the provided `load`/`save`
//! methods handle (de)serialization of a whole collection.

use super::record::Record;
use crate::error::{StorageError, TableError};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// Prefix for every table's storage key
pub const KEY_PREFIX: &str = "animalTable_";

/// Storage key for a table identifier
pub fn storage_key(table_id: &str) -> String {
    format!("{}{}", KEY_PREFIX, table_id)
}

/// Key/value backend holding serialized collections
pub trait Storage {
    /// Raw value under `key`, `None` when nothing was stored
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError>;

    /// Load a collection. Missing or unreadable data yields `None`.
    fn load(&self, key: &str) -> Option<Vec<Record>> {
        let parsed = self.read(key).and_then(|raw| match raw {
            Some(raw) => Ok(Some(serde_json::from_str::<Vec<Record>>(&raw)?)),
            None => Ok(None),
        });

        match parsed {
            Ok(records) => records,
            Err(source) => {
                let err = TableError::StorageRead {
                    key: key.to_string(),
                    source,
                };
                warn!("Ignoring persisted data: {}", err);
                None
            }
        }
    }

    fn save(&self, key: &str, records: &[Record]) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(records)?;
        self.write(key, &contents)
    }
}

/// One JSON file per key inside a data directory
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), contents)?;
        Ok(())
    }
}

/// In-memory backend for tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    values: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value, bypassing serialization
    pub fn insert_raw(&self, key: &str, contents: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        self.insert_raw(key, contents);
        Ok(())
    }
}
