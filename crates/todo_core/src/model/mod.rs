//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the task record shared by state, storage and FFI layers.
//!
//! # Invariants
//! - Task ids are unique within one list.

pub mod task;
