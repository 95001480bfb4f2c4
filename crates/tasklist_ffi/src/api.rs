//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task list and date picker use-cases to Dart via FRB.
//! - Own the one process-wide task store behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The store is loaded from disk before the first intent is applied.
//! - Deletion is unconditional here; the Dart side shows the confirmation.
//! - Edits never strip subject or due date from a homework task.

use log::error;
use std::sync::Mutex;
use tasklist_core::{
    core_version as core_version_inner, days_in_month, format_date,
    init_logging as init_logging_inner, ping as ping_inner, shift_month, CoreConfig,
    FieldRequirements, MonthStep, SqliteKeyValueStore, Task, TaskFields, TaskId, TaskStore,
    TaskValidationError, MONTH_NAMES,
};

static TASK_STORE: Mutex<Option<TaskStore<SqliteKeyValueStore>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One task row as rendered by the list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub subject: Option<String>,
    pub due_date: Option<String>,
    pub completed: bool,
}

/// Task list envelope with the footer counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub items: Vec<TaskItem>,
    pub total: u32,
    pub completed: u32,
    /// Empty on success; otherwise why the list could not be read.
    pub message: String,
}

/// Generic action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the collection changed.
    pub ok: bool,
    /// Affected task id, when one was found or created.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: &TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Month header + day grid for the date picker modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    pub title: String,
    pub days: Vec<u32>,
}

/// Lists all tasks in stored order.
///
/// # FFI contract
/// - Sync call; the first call opens the database and loads the snapshot.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> TaskListResponse {
    let result = with_task_store(|store| {
        (
            store.list_tasks().iter().map(to_task_item).collect::<Vec<_>>(),
            store.completed_count(),
        )
    });
    match result {
        Ok((items, completed)) => TaskListResponse {
            total: count_u32(items.len()),
            completed: count_u32(completed),
            items,
            message: String::new(),
        },
        Err(err) => TaskListResponse {
            items: Vec::new(),
            total: 0,
            completed: 0,
            message: format!("tasks_list failed: {err}"),
        },
    }
}

/// Adds a title-only task (simple list screen).
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String) -> TaskActionResponse {
    add_with(TaskFields::titled(title), FieldRequirements::title_only())
}

/// Adds a homework task; title, subject and due date are all required.
#[flutter_rust_bridge::frb(sync)]
pub fn homework_add(title: String, subject: String, due_date: String) -> TaskActionResponse {
    add_with(
        TaskFields::detailed(title, subject, due_date),
        FieldRequirements::detailed(),
    )
}

/// Replaces title/subject/due date of an existing task.
///
/// Blank `subject` / `due_date` clear the field, except on a task that
/// already carries a subject or due date: those keep the homework rules and
/// reject the edit instead.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(
    id: String,
    title: String,
    subject: Option<String>,
    due_date: Option<String>,
) -> TaskActionResponse {
    let fields = TaskFields {
        title,
        subject,
        due_date,
    };
    edit_with(TaskId::from(id), fields, None)
}

/// Edits a homework task; title, subject and due date are all required.
#[flutter_rust_bridge::frb(sync)]
pub fn homework_edit(
    id: String,
    title: String,
    subject: String,
    due_date: String,
) -> TaskActionResponse {
    edit_with(
        TaskId::from(id),
        TaskFields::detailed(title, subject, due_date),
        Some(FieldRequirements::detailed()),
    )
}

/// Flips completion of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> TaskActionResponse {
    let task_id = TaskId::from(id);
    match with_task_store(|store| store.toggle_complete(&task_id)) {
        Ok(Some(true)) => TaskActionResponse::success("Task completed.", &task_id),
        Ok(Some(false)) => TaskActionResponse::success("Task reopened.", &task_id),
        Ok(None) => TaskActionResponse::failure("Task not found."),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Deletes one task. Call only after the user confirmed.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> TaskActionResponse {
    let task_id = TaskId::from(id);
    match with_task_store(|store| store.delete_task(&task_id)) {
        Ok(true) => TaskActionResponse::success("Task deleted.", &task_id),
        Ok(false) => TaskActionResponse::failure("Task not found."),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Day numbers of a zero-based month; empty for an invalid month.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_days_in_month(month: u32, year: i32) -> Vec<u32> {
    days_in_month(month, year)
        .map(|days| days.collect())
        .unwrap_or_default()
}

/// Display string for a picked day, e.g. `"5 Januari 2025"`.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_format_date(day: u32, month: u32, year: i32) -> Option<String> {
    format_date(day, month, year).ok()
}

/// Moves the picker one month by `delta` sign; zero keeps the month.
///
/// An invalid `month` is clamped to December before stepping. A step past
/// the representable years keeps the month and returns an empty grid.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_shift_month(month: u32, year: i32, delta: i32) -> CalendarMonth {
    let month = month.min(11);
    let (month, year) = MonthStep::from_delta(delta)
        .and_then(|step| shift_month(month, year, step).ok())
        .unwrap_or((month, year));
    CalendarMonth {
        month,
        year,
        title: format!("{} {}", MONTH_NAMES[month as usize], year),
        days: calendar_days_in_month(month, year),
    }
}

fn add_with(fields: TaskFields, requirements: FieldRequirements) -> TaskActionResponse {
    if let Err(err) = fields.validate(requirements) {
        return TaskActionResponse::failure(format!("Task not added: {err}."));
    }
    match with_task_store(|store| store.add_task(fields)) {
        Ok(Some(task_id)) => TaskActionResponse::success("Task added.", &task_id),
        Ok(None) => TaskActionResponse::failure("Task not added."),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// `requirements` of `None` picks the rules from the stored record.
fn edit_with(
    task_id: TaskId,
    fields: TaskFields,
    requirements: Option<FieldRequirements>,
) -> TaskActionResponse {
    let result = with_task_store(|store| -> Result<bool, TaskValidationError> {
        let Some(existing) = store.get_task(&task_id) else {
            return Ok(false);
        };
        let requirements = requirements.unwrap_or_else(|| requirements_for(existing));
        fields.validate(requirements)?;
        Ok(store.edit_task(&task_id, fields))
    });
    match result {
        Ok(Ok(true)) => TaskActionResponse::success("Task updated.", &task_id),
        Ok(Ok(false)) => TaskActionResponse::failure("Task not found."),
        Ok(Err(err)) => TaskActionResponse::failure(format!("Task not updated: {err}.")),
        Err(err) => TaskActionResponse::failure(format!("task_edit failed: {err}")),
    }
}

fn requirements_for(task: &Task) -> FieldRequirements {
    if task.subject.is_some() || task.due_date.is_some() {
        FieldRequirements::detailed()
    } else {
        FieldRequirements::title_only()
    }
}

fn with_task_store<T>(f: impl FnOnce(&mut TaskStore<SqliteKeyValueStore>) -> T) -> Result<T, String> {
    let mut guard = TASK_STORE
        .lock()
        .map_err(|_| "task store lock poisoned".to_string())?;

    if guard.is_none() {
        let config = CoreConfig::from_env();
        let storage = SqliteKeyValueStore::open(&config.db_path).map_err(|err| {
            error!(
                "event=store_open module=ffi status=error error_code=db_open_failed error={err}"
            );
            format!("task DB open failed: {err}")
        })?;
        *guard = Some(TaskStore::open(storage, FieldRequirements::title_only()));
    }

    match guard.as_mut() {
        Some(store) => Ok(f(store)),
        None => Err("task store unavailable".to_string()),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        subject: task.subject.clone(),
        due_date: task.due_date.clone(),
        completed: task.completed,
    }
}

fn count_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
