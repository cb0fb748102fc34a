//! Built-in tasks shown on first launch.
//!
//! # Invariants
//! - The dataset is embedded at build time and never written back.
//! - Seed ids are unique.

use crate::model::task::{validate_unique_ids, Task};
use log::error;

const SEED_JSON: &str = include_str!("seed.json");

/// Returns the seed dataset in file order.
///
/// A malformed embedded file degrades to an empty list and is logged.
pub fn seed_tasks() -> Vec<Task> {
    let tasks = match serde_json::from_str::<Vec<Task>>(SEED_JSON) {
        Ok(tasks) => tasks,
        Err(err) => {
            error!("event=seed_parse module=seed status=error error={err}");
            return Vec::new();
        }
    };
    if let Err(err) = validate_unique_ids(&tasks) {
        error!("event=seed_parse module=seed status=error error={err}");
        return Vec::new();
    }
    tasks
}
