//! Full-collection snapshot codec.
//!
//! # Responsibility
//! - Encode the ordered task collection into the single persisted blob.
//! - Decode a stored blob, rejecting shapes that would break store invariants.
//!
//! # Invariants
//! - `decode_snapshot(&encode_snapshot(tasks)?)` yields `tasks` unchanged.
//! - A decoded collection never holds two records with the same id.

use crate::model::task::{Task, TaskId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key under which the whole collection lives.
pub const TASKS_KEY: &str = "tasks";

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub enum SnapshotError {
    Malformed(serde_json::Error),
    DuplicateId(TaskId),
    BlankId { index: usize },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed task snapshot: {err}"),
            Self::DuplicateId(id) => write!(f, "task snapshot repeats id `{id}`"),
            Self::BlankId { index } => write!(f, "task snapshot has blank id at index {index}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Serializes the ordered collection as a JSON array.
pub fn encode_snapshot(tasks: &[Task]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses a stored JSON array back into an ordered collection.
pub fn decode_snapshot(blob: &str) -> Result<Vec<Task>, SnapshotError> {
    let tasks: Vec<Task> = serde_json::from_str(blob)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        if task.id.as_str().trim().is_empty() {
            return Err(SnapshotError::BlankId { index });
        }
        if !seen.insert(&task.id) {
            return Err(SnapshotError::DuplicateId(task.id.clone()));
        }
    }

    Ok(tasks)
}
