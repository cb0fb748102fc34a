//! Durable key-value storage for the task blob.
//!
//! # Responsibility
//! - Abstract the on-device key-value store behind `KeyValueStore`.
//! - Read and write the whole task list as one JSON value.
//! - Serialize writes on a single background writer.
//!
//! # Invariants
//! - The task list lives under exactly one key, `TASKS_STORAGE_KEY`.
//! - Callers of `load_tasks`/the writer never see storage errors; they are logged.

use crate::db::DbError;
use crate::model::task::TaskValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod task_store;
pub mod writer;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serde(serde_json::Error),
    InvalidData(TaskValidationError),
    Io(std::io::Error),
    /// A previous writer panicked while holding the store.
    Poisoned,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serde(err) => write!(f, "task blob is not valid: {err}"),
            Self::InvalidData(err) => write!(f, "task blob is not valid: {err}"),
            Self::Io(err) => write!(f, "storage io failure: {err}"),
            Self::Poisoned => write!(f, "storage lock poisoned"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serde(err) => Some(err),
            Self::InvalidData(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<TaskValidationError> for StorageError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidData(value)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
