//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its JSON shape.
//! - Validate whole lists read back from storage.
//!
//! # Invariants
//! - `id` is unique within one list.
//! - `title` is non-blank when a task is created through `Task::new`.
//! - Serialized shape is exactly `{ "id": int, "title": string, "completed": bool }`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric task identifier, assigned as `max(existing) + 1`.
pub type TaskId = i64;

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Display text exactly as entered.
    pub title: String,
    pub completed: bool,
}

/// Validation failures for tasks and task lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    DuplicateId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::DuplicateId(id) => write!(f, "duplicate task id: {id}"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates an open (not completed) task.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is empty after trimming.
    pub fn new(id: TaskId, title: impl Into<String>) -> Result<Self, TaskValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            completed: false,
        })
    }

    /// Returns a copy with `completed` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Checks that every id in `tasks` appears once.
///
/// Titles are not checked: a stored title is whatever was written.
pub fn validate_unique_ids(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id) {
            return Err(TaskValidationError::DuplicateId(task.id));
        }
    }
    Ok(())
}
