//! Immutable task list value and its pure operations.

use crate::model::task::{Task, TaskId};
use log::warn;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Ordered task list, newest first after initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Wraps `tasks` without reordering.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Builds the startup list.
    ///
    /// Uses `persisted` when it holds at least one task, `seed` otherwise;
    /// the chosen source is sorted by descending id. The two are never merged.
    pub fn initialize(persisted: Option<Vec<Task>>, seed: Vec<Task>) -> Self {
        let mut tasks = match persisted {
            Some(tasks) if !tasks.is_empty() => tasks,
            _ => seed,
        };
        tasks.sort_by_key(|task| Reverse(task.id));
        Self { tasks }
    }

    /// Id the next created task receives: `max(ids) + 1`, or `1` when empty.
    ///
    /// `None` once the largest id is `TaskId::MAX`; no fresh id exists then.
    pub fn next_id(&self) -> Option<TaskId> {
        match self.tasks.iter().map(|task| task.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Prepends a new open task titled `raw_text`.
    ///
    /// Blank input (after trimming) leaves the list unchanged, as does an
    /// exhausted id space.
    pub fn add(&self, raw_text: &str) -> Self {
        let Some(id) = self.next_id() else {
            warn!("event=tasks_add module=state status=error error=id_space_exhausted");
            return self.clone();
        };
        let Ok(task) = Task::new(id, raw_text) else {
            return self.clone();
        };
        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(task);
        tasks.extend(self.tasks.iter().cloned());
        Self { tasks }
    }

    /// Flips `completed` on the task with `id`; unknown ids are a no-op.
    pub fn toggle(&self, id: TaskId) -> Self {
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    task.toggled()
                } else {
                    task.clone()
                }
            })
            .collect();
        Self { tasks }
    }

    /// Drops the task with `id`; unknown ids are a no-op.
    pub fn remove(&self, id: TaskId) -> Self {
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        Self { tasks }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
