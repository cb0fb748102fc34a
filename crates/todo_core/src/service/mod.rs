//! Use-case layer consumed by the FFI and CLI front ends.
//!
//! # Responsibility
//! - Own the authoritative task list and its write-through persistence.
//! - Translate view intents into list mutations or navigation.

pub mod navigation;
pub mod task_service;
