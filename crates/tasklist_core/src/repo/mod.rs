//! Persistence adapter contract and implementations.
//!
//! # Responsibility
//! - Define the key-value contract the task store is written against.
//! - Isolate SQLite query details from store/service orchestration.
//!
//! # Invariants
//! - Adapters store opaque text; they never inspect the task blob.

pub mod kv_store;
