//! Core domain logic for the todo app.
//! This crate is the single source of truth for task list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod state;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use seed::seed_tasks;
pub use service::navigation::{detail_route, parse_detail_route};
pub use service::task_service::{IntentOutcome, TaskIntent, TaskService};
pub use state::task_list::TaskList;
pub use storage::kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use storage::task_store::{
    clear_tasks, load_tasks, save_tasks, try_load_tasks, TASKS_STORAGE_KEY,
};
pub use storage::writer::TaskWriter;
pub use storage::{StorageError, StorageResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
