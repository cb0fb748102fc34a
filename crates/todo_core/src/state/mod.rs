//! In-memory task list state.
//!
//! # Invariants
//! - Every mutation returns a new list value; the receiver is never modified.
//! - Sorting happens once, in `TaskList::initialize`.

pub mod task_list;
