//! Task list use-case service.
//!
//! # Responsibility
//! - Load the startup list from storage, or from the seed when nothing is stored.
//! - Apply add/toggle/remove and write every change through to storage.
//! - Resolve view intents, including navigation to the detail screen.
//!
//! # Invariants
//! - The in-memory list is authoritative; a failed write never rolls it back.
//! - Only mutations that change the list schedule a write.
//! - Writes never block the caller; see `storage::writer`.

use crate::model::task::{Task, TaskId};
use crate::seed::seed_tasks;
use crate::service::navigation::detail_route;
use crate::state::task_list::TaskList;
use crate::storage::kv::{KeyValueStore, SqliteKeyValueStore};
use crate::storage::task_store::load_tasks;
use crate::storage::writer::TaskWriter;
use crate::storage::StorageResult;
use log::{debug, error, info};
use std::path::Path;

/// User intent emitted by the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    Add(String),
    Toggle(TaskId),
    Remove(TaskId),
    OpenDetail(TaskId),
}

/// Result of dispatching a [`TaskIntent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// A list intent ran; `changed` is false for no-ops.
    Updated { changed: bool },
    /// The UI should navigate to `route`.
    Navigate { route: String },
}

/// Authoritative task list plus its background writer.
pub struct TaskService {
    list: TaskList,
    writer: TaskWriter,
}

impl TaskService {
    /// Loads the startup list from `store` and takes ownership of it for writes.
    ///
    /// Unreadable or empty storage falls back to `seed`. If the writer thread
    /// cannot be spawned the list still works but changes are not persisted.
    pub fn open<S: KeyValueStore + 'static>(store: S, seed: Vec<Task>) -> Self {
        let persisted = load_tasks(&store);
        let source = match &persisted {
            Some(tasks) if !tasks.is_empty() => "storage",
            _ => "seed",
        };
        let list = TaskList::initialize(persisted, seed);
        info!(
            "event=tasks_init module=service status=ok source={source} count={}",
            list.len()
        );
        let writer = TaskWriter::spawn(store).unwrap_or_else(|err| {
            error!("event=writer_start module=service status=error error={err}");
            TaskWriter::disabled()
        });
        Self { list, writer }
    }

    /// Opens the SQLite file at `path` with the built-in seed.
    ///
    /// # Errors
    /// - The database cannot be opened or its schema is newer than this binary.
    pub fn open_sqlite(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::open(SqliteKeyValueStore::open(path)?, seed_tasks()))
    }

    pub fn tasks(&self) -> &TaskList {
        &self.list
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.list.get(id)
    }

    /// Adds a task; returns `false` when `raw_text` is blank.
    pub fn add(&mut self, raw_text: &str) -> bool {
        let next = self.list.add(raw_text);
        self.commit("add", next)
    }

    /// Toggles task `id`; returns `false` when no task matches.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let next = self.list.toggle(id);
        self.commit("toggle", next)
    }

    /// Removes task `id`; returns `false` when no task matches.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let next = self.list.remove(id);
        self.commit("remove", next)
    }

    pub fn dispatch(&mut self, intent: TaskIntent) -> IntentOutcome {
        let changed = match intent {
            TaskIntent::Add(text) => self.add(&text),
            TaskIntent::Toggle(id) => self.toggle(id),
            TaskIntent::Remove(id) => self.remove(id),
            TaskIntent::OpenDetail(id) => {
                return IntentOutcome::Navigate {
                    route: detail_route(id),
                };
            }
        };
        IntentOutcome::Updated { changed }
    }

    /// Waits until every change made so far has been written (or failed).
    pub fn flush(&self) -> bool {
        self.writer.flush()
    }

    fn commit(&mut self, action: &'static str, next: TaskList) -> bool {
        if next == self.list {
            debug!("event=tasks_{action} module=service status=noop");
            return false;
        }
        self.writer.submit(next.clone().into_tasks());
        self.list = next;
        debug!(
            "event=tasks_{action} module=service status=ok count={}",
            self.list.len()
        );
        true
    }
}
