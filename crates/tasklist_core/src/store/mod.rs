//! Task collection ownership and snapshot persistence.
//!
//! # Responsibility
//! - Hold the ordered task list behind CRUD entry points.
//! - Encode/decode the single persisted blob.
//!
//! # Invariants
//! - Every mutation is followed by a full-snapshot overwrite.

pub mod snapshot;
pub mod task_store;
