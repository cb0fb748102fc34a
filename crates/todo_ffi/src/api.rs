//! FFI use-case API for the mobile list screen.
//!
//! # Responsibility
//! - Expose the task list container to Dart through FRB.
//! - Map core types to flat, UI-ready records.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - List state lives in a `TodoSession` owned by the top-level view, not in
//!   a process global.

use log::error;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    seed_tasks, IntentOutcome, MemoryKeyValueStore, Task, TaskIntent, TaskList, TaskService,
};

const DB_PATH_ENV: &str = "TODO_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "todo_app.sqlite3";

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    /// Rendered with strike-through when true.
    pub completed: bool,
}

/// Snapshot of the list after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Whether the call changed the list. The add flow clears its input on `true`.
    pub changed: bool,
    /// Rows in display order.
    pub items: Vec<TaskItem>,
    /// Number of rows not yet completed.
    pub remaining_count: u32,
}

/// Task list container owned by the list screen.
#[flutter_rust_bridge::frb(opaque)]
pub struct TodoSession {
    service: Mutex<TaskService>,
    /// Storage path in use, or `None` when running on the in-memory fallback.
    db_path: Option<PathBuf>,
}

impl TodoSession {
    /// Opens the list, loading from the on-device database.
    ///
    /// `db_path` overrides `TODO_DB_PATH`, which overrides the temp-dir default.
    /// If the database cannot be opened the session keeps working in memory
    /// on the seed list; the failure is logged.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open(db_path: Option<String>) -> TodoSession {
        let path = resolve_db_path(db_path);
        match TaskService::open_sqlite(&path) {
            Ok(service) => TodoSession {
                service: Mutex::new(service),
                db_path: Some(path),
            },
            Err(err) => {
                error!(
                    "event=session_open module=ffi status=error fallback=memory error={err}"
                );
                TodoSession {
                    service: Mutex::new(TaskService::open(
                        MemoryKeyValueStore::new(),
                        seed_tasks(),
                    )),
                    db_path: None,
                }
            }
        }
    }

    /// Path of the backing database, empty when running in memory.
    #[flutter_rust_bridge::frb(sync)]
    pub fn storage_path(&self) -> String {
        self.db_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default()
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn tasks(&self) -> TaskListResponse {
        to_response(false, self.lock().tasks())
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn get(&self, id: i64) -> Option<TaskItem> {
        self.lock().get(id).map(to_task_item)
    }

    /// Adds a task from the input row; blank text leaves the list unchanged.
    #[flutter_rust_bridge::frb(sync)]
    pub fn add(&self, text: String) -> TaskListResponse {
        self.apply(TaskIntent::Add(text))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn toggle(&self, id: i64) -> TaskListResponse {
        self.apply(TaskIntent::Toggle(id))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn remove(&self, id: i64) -> TaskListResponse {
        self.apply(TaskIntent::Remove(id))
    }

    /// Route of the detail screen for `id`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open_detail(&self, id: i64) -> String {
        match self.lock().dispatch(TaskIntent::OpenDetail(id)) {
            IntentOutcome::Navigate { route } => route,
            IntentOutcome::Updated { .. } => String::new(),
        }
    }

    /// Blocks until pending writes are on disk. Call before the app is suspended.
    #[flutter_rust_bridge::frb(sync)]
    pub fn flush(&self) -> bool {
        self.lock().flush()
    }

    fn apply(&self, intent: TaskIntent) -> TaskListResponse {
        let mut service = self.lock();
        let changed = matches!(
            service.dispatch(intent),
            IntentOutcome::Updated { changed: true }
        );
        to_response(changed, service.tasks())
    }

    fn lock(&self) -> MutexGuard<'_, TaskService> {
        // The list stays valid even if a previous holder panicked.
        self.service.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn resolve_db_path(explicit: Option<String>) -> PathBuf {
    let from_env = std::env::var(DB_PATH_ENV).ok();
    [explicit, from_env]
        .into_iter()
        .flatten()
        .map(|raw| raw.trim().to_string())
        .find(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

fn to_response(changed: bool, list: &TaskList) -> TaskListResponse {
    TaskListResponse {
        changed,
        items: list.iter().map(to_task_item).collect(),
        remaining_count: u32::try_from(list.remaining_count()).unwrap_or(u32::MAX),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id,
        title: task.title.clone(),
        completed: task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::{core_version, init_logging, ping, resolve_db_path, TodoSession};

    fn session_in(dir: &tempfile::TempDir) -> TodoSession {
        let path = dir.path().join("todo.sqlite3");
        TodoSession::open(Some(path.to_str().unwrap().to_string()))
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolve_db_path(Some(" /data/todo.db ".to_string()));
        assert_eq!(path.to_str(), Some("/data/todo.db"));
    }

    #[test]
    fn blank_explicit_path_is_ignored() {
        let path = resolve_db_path(Some("  ".to_string()));
        assert!(path.is_absolute());
    }

    #[test]
    fn fresh_session_shows_seed_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let list = session.tasks();
        assert!(!list.changed);
        assert!(!list.items.is_empty());
        assert!(list.items.windows(2).all(|pair| pair[0].id > pair[1].id));
        assert!(!session.storage_path().is_empty());
    }

    #[test]
    fn add_reports_whether_input_was_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let before = session.tasks().items.len();

        let rejected = session.add("   ".to_string());
        assert!(!rejected.changed);
        assert_eq!(rejected.items.len(), before);

        let accepted = session.add("Walk dog".to_string());
        assert!(accepted.changed);
        assert_eq!(accepted.items[0].title, "Walk dog");
        assert_eq!(accepted.items.len(), before + 1);
    }

    #[test]
    fn toggle_remove_and_detail_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let id = session.add("Detail me".to_string()).items[0].id;

        let toggled = session.toggle(id);
        assert!(toggled.changed);
        assert!(session.get(id).unwrap().completed);

        assert_eq!(session.open_detail(id), format!("/todos/{id}"));

        let removed = session.remove(id);
        assert!(removed.changed);
        assert!(session.get(id).is_none());
        assert!(!session.remove(id).changed);
    }

    #[test]
    fn changes_are_visible_to_a_new_session() {
        let dir = tempfile::tempdir().unwrap();
        {
            let session = session_in(&dir);
            session.add("Survives restart".to_string());
            assert!(session.flush());
        }
        let reopened = session_in(&dir);
        assert_eq!(reopened.tasks().items[0].title, "Survives restart");
    }
}
