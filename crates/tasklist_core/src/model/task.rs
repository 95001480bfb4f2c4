//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by the simple and detailed task screens.
//! - Validate user-entered fields before they reach the store.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is stored trimmed and is never blank.
//! - `subject` / `due_date` are either `None` or non-blank trimmed text.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier for a task.
///
/// Generated as UUID v4 text, but any non-empty token read back from storage
/// is accepted so blobs written by older screens stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Canonical persisted task record.
///
/// Serialized in camelCase. `task` and `date` are accepted on read as the
/// field names used by the detailed screen's legacy blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(alias = "task")]
    pub title: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_text"
    )]
    pub subject: Option<String>,
    #[serde(
        default,
        alias = "date",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_text"
    )]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an open task with a generated id from already validated fields.
    pub fn new(fields: TaskFields) -> Self {
        Self::with_id(TaskId::generate(), fields)
    }

    /// Creates an open task with a caller-provided id.
    pub fn with_id(id: TaskId, fields: TaskFields) -> Self {
        let fields = fields.normalized();
        Self {
            id,
            title: fields.title,
            subject: fields.subject,
            due_date: fields.due_date,
            completed: false,
        }
    }

    /// Replaces the editable fields; `id` and `completed` are untouched.
    pub fn apply(&mut self, fields: TaskFields) {
        let fields = fields.normalized();
        self.title = fields.title;
        self.subject = fields.subject;
        self.due_date = fields.due_date;
    }

    /// Flips completion and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// User-entered editable fields for add/edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub subject: Option<String>,
    pub due_date: Option<String>,
}

impl TaskFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn detailed(
        title: impl Into<String>,
        subject: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subject: Some(subject.into()),
            due_date: Some(due_date.into()),
        }
    }

    /// Validates against `requirements` before any mutation happens.
    pub fn validate(&self, requirements: FieldRequirements) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if requirements.subject && is_blank(self.subject.as_deref()) {
            return Err(TaskValidationError::EmptySubject);
        }
        if requirements.due_date && is_blank(self.due_date.as_deref()) {
            return Err(TaskValidationError::EmptyDueDate);
        }
        Ok(())
    }

    fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            subject: normalize_optional(self.subject),
            due_date: normalize_optional(self.due_date),
        }
    }
}

/// Which optional fields a screen treats as required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldRequirements {
    pub subject: bool,
    pub due_date: bool,
}

impl FieldRequirements {
    /// Simple list screen: only a title is needed.
    pub fn title_only() -> Self {
        Self::default()
    }

    /// Homework screen: title, subject and due date are all required.
    pub fn detailed() -> Self {
        Self {
            subject: true,
            due_date: true,
        }
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    EmptySubject,
    EmptyDueDate,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptySubject => write!(f, "subject must not be empty"),
            Self::EmptyDueDate => write!(f, "due date must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_optional(value))
}
