//! Task list persistence over a `KeyValueStore`.
//!
//! # Responsibility
//! - Encode the full task list as one JSON array under `TASKS_STORAGE_KEY`.
//! - Decode it back, treating any shape mismatch as "nothing stored".
//!
//! # Invariants
//! - A decoded list always has unique ids.
//! - Logs carry counts and sizes only, never task titles.

use crate::model::task::{validate_unique_ids, Task};
use crate::storage::kv::KeyValueStore;
use crate::storage::{StorageError, StorageResult};
use log::{debug, error, warn};

/// The single key holding the serialized task list.
pub const TASKS_STORAGE_KEY: &str = "TodoApp";

/// Reads the persisted task list.
///
/// Returns `None` when the key is unset or the stored value is unreadable.
/// Failures are logged and never surfaced.
pub fn load_tasks(store: &dyn KeyValueStore) -> Option<Vec<Task>> {
    match try_load_tasks(store) {
        Ok(Some(tasks)) => {
            debug!(
                "event=tasks_load module=storage status=ok count={}",
                tasks.len()
            );
            Some(tasks)
        }
        Ok(None) => {
            debug!("event=tasks_load module=storage status=empty");
            None
        }
        Err(err) => {
            warn!("event=tasks_load module=storage status=error error={err}");
            None
        }
    }
}

/// Same as [`load_tasks`] but reports why nothing usable was read.
pub fn try_load_tasks(store: &dyn KeyValueStore) -> StorageResult<Option<Vec<Task>>> {
    let Some(raw) = store.get(TASKS_STORAGE_KEY)? else {
        return Ok(None);
    };
    let tasks: Vec<Task> = serde_json::from_str(&raw)?;
    validate_unique_ids(&tasks)?;
    Ok(Some(tasks))
}

/// Overwrites the persisted task list with `tasks`.
///
/// The error is logged here and also returned for callers that care; the
/// write-behind path ignores it.
pub fn save_tasks(store: &dyn KeyValueStore, tasks: &[Task]) -> StorageResult<()> {
    let result = serde_json::to_string(tasks)
        .map_err(StorageError::from)
        .and_then(|blob| store.set(TASKS_STORAGE_KEY, &blob).map(|()| blob.len()));
    match result {
        Ok(bytes) => {
            debug!(
                "event=tasks_save module=storage status=ok count={} bytes={bytes}",
                tasks.len()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=tasks_save module=storage status=error count={} error={err}",
                tasks.len()
            );
            Err(err)
        }
    }
}

/// Deletes the persisted task list so the next open starts from the seed.
pub fn clear_tasks(store: &dyn KeyValueStore) -> StorageResult<()> {
    store.remove(TASKS_STORAGE_KEY)
}
