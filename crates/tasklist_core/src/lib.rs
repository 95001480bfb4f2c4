//! Core domain logic for the task list app.
//! This crate is the single source of truth for task invariants.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use calendar::date_selector::{
    days_in_month, format_date, parse_display_date, shift_month, CalendarError, DatePick,
    DatePicker, MonthStep, MONTH_NAMES,
};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{FieldRequirements, Task, TaskFields, TaskId, TaskValidationError};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use service::task_screen::{DeletePrompt, ScreenEvent, ScreenIntent, TaskDraft, TaskScreen};
pub use store::snapshot::{decode_snapshot, encode_snapshot, SnapshotError, TASKS_KEY};
pub use store::task_store::{LoadOutcome, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
