//! Error taxonomy for table operations
//!
//! Validation and duplicate errors are shown to the user; read failures and
//! missing ids are swallowed by the caller. Nothing here is fatal.

use crate::model::record::Field;
use thiserror::Error;

/// Low-level failure of a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A field on the input form did not pass the presence/type checks
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("{field} must be a whole number (got '{value}')")]
    NotANumber { field: Field, value: String },
}

/// Errors surfaced by `AnimalTable` operations
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("an animal named '{0}' already exists")]
    Duplicate(String),

    #[error("no record with id {0}")]
    NotFound(i64),

    /// Persisted data under `key` is unreadable and was ignored
    #[error("could not read '{key}': {source}")]
    StorageRead {
        key: String,
        #[source]
        source: StorageError,
    },

    /// The in-memory change was applied but could not be persisted
    #[error("could not save '{key}': {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: StorageError,
    },
}

impl TableError {
    /// Errors the shell should not report to the user
    pub fn is_silent(&self) -> bool {
        matches!(self, TableError::NotFound(_) | TableError::StorageRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let missing = TableError::from(ValidationError::Missing(Field::Name));
        assert_eq!(missing.to_string(), "Name is required");

        let bad_size = TableError::from(ValidationError::NotANumber {
            field: Field::Size,
            value: "huge".to_string(),
        });
        assert_eq!(bad_size.to_string(), "Size must be a whole number (got 'huge')");
    }

    #[test]
    fn test_silent_errors() {
        assert!(TableError::NotFound(7).is_silent());
        assert!(!TableError::Duplicate("Lion".to_string()).is_silent());
        assert!(!TableError::from(ValidationError::Missing(Field::Location)).is_silent());
    }
}
