//! Canonical domain model for the task list.
//!
//! # Responsibility
//! - Define the single task record shape used by every screen.
//! - Keep field validation next to the data it guards.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion removes the record; there are no tombstones.

pub mod task;
