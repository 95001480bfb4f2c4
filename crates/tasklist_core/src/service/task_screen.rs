//! Task screen use-case session.
//!
//! # Responsibility
//! - Turn UI intents into task store mutations and picker transitions.
//! - Hold the form draft, edit mode and pending delete confirmation.
//!
//! # Invariants
//! - Delete never reaches the store without `RequestDelete` followed by
//!   `ConfirmDelete` for the same pending id.
//! - The draft is cleared only after the store accepted a submit.
//! - Cancelling the picker leaves the draft's due date unchanged.
//!
//! # FFI boundary
//! The Flutter screens drive `tasklist_ffi::api` directly and keep their own
//! form state; this session is not bridged. It is the executable contract
//! those screens follow: the delete prompt texts and the
//! request/confirm/cancel sequence below are what Dart must show before it
//! calls `task_delete`, and `tests/task_screen.rs` pins that flow.

use crate::calendar::date_selector::{DatePick, DatePicker, MonthStep};
use crate::model::task::{FieldRequirements, Task, TaskFields, TaskId};
use crate::repo::kv_store::KeyValueStore;
use crate::store::task_store::{LoadOutcome, TaskStore};
use log::debug;

/// Title of the delete confirmation prompt.
pub const DELETE_PROMPT_TITLE: &str = "Hapus Tugas";
/// Body of the delete confirmation prompt.
pub const DELETE_PROMPT_MESSAGE: &str = "Apakah kamu yakin ingin menghapus tugas ini?";
/// Label of the choice that keeps the task.
pub const DELETE_PROMPT_CANCEL: &str = "Batal";
/// Label of the destructive choice.
pub const DELETE_PROMPT_CONFIRM: &str = "Hapus";

/// Raw form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub subject: String,
    /// Only ever written by the date picker.
    pub due_date: String,
}

impl TaskDraft {
    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            subject: task.subject.clone().unwrap_or_default(),
            due_date: task.due_date.clone().unwrap_or_default(),
        }
    }

    fn to_fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            subject: non_empty(&self.subject),
            due_date: non_empty(&self.due_date),
        }
    }
}

/// Two-choice blocking prompt shown before a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub task_id: TaskId,
    pub title: &'static str,
    pub message: &'static str,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
}

impl DeletePrompt {
    fn for_task(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: DELETE_PROMPT_TITLE,
            message: DELETE_PROMPT_MESSAGE,
            cancel_label: DELETE_PROMPT_CANCEL,
            confirm_label: DELETE_PROMPT_CONFIRM,
        }
    }
}

/// Everything the presentation layer can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenIntent {
    Add(TaskFields),
    Edit { id: TaskId, fields: TaskFields },
    Toggle(TaskId),
    RequestDelete(TaskId),
    ConfirmDelete,
    CancelDelete,
    SetTitle(String),
    SetSubject(String),
    StartEdit(TaskId),
    CancelEdit,
    /// Adds the draft, or saves it over the task being edited.
    Submit,
    OpenDatePicker,
    NavigateMonth(MonthStep),
    SelectDay(u32),
    CancelDatePicker,
}

/// Visible outcome of one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The task collection changed and was written back.
    TasksChanged,
    /// The intent was rejected or referred to nothing; state is unchanged.
    Ignored,
    DraftUpdated,
    DraftLoaded(TaskId),
    EditCancelled,
    ConfirmationRequired(DeletePrompt),
    DeleteCancelled,
    DatePickerOpened { month: u32, year: i32 },
    MonthChanged { month: u32, year: i32 },
    DateSelected(DatePick),
    DatePickerClosed,
}

/// One task list screen bound to a store.
pub struct TaskScreen<S: KeyValueStore> {
    store: TaskStore<S>,
    draft: TaskDraft,
    editing: Option<TaskId>,
    pending_delete: Option<TaskId>,
    picker: DatePicker,
}

impl<S: KeyValueStore> TaskScreen<S> {
    /// Opens the screen: loads the persisted collection before any intent.
    pub fn open(storage: S, requirements: FieldRequirements, picker: DatePicker) -> Self {
        let mut store = TaskStore::new(storage, requirements);
        let outcome = store.initialize();
        debug!(
            "event=screen_open module=service status=ok load={}",
            load_label(outcome)
        );
        Self {
            store,
            draft: TaskDraft::default(),
            editing: None,
            pending_delete: None,
            picker,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.list_tasks()
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&TaskId> {
        self.pending_delete.as_ref()
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    /// Applies one intent and reports what the UI should show.
    pub fn dispatch(&mut self, intent: ScreenIntent) -> ScreenEvent {
        match intent {
            ScreenIntent::Add(fields) => changed(self.store.add_task(fields).is_some()),
            ScreenIntent::Edit { id, fields } => changed(self.store.edit_task(&id, fields)),
            ScreenIntent::Toggle(id) => changed(self.store.toggle_complete(&id).is_some()),
            ScreenIntent::RequestDelete(id) => self.request_delete(id),
            ScreenIntent::ConfirmDelete => self.confirm_delete(),
            ScreenIntent::CancelDelete => match self.pending_delete.take() {
                Some(_) => ScreenEvent::DeleteCancelled,
                None => ScreenEvent::Ignored,
            },
            ScreenIntent::SetTitle(title) => {
                self.draft.title = title;
                ScreenEvent::DraftUpdated
            }
            ScreenIntent::SetSubject(subject) => {
                self.draft.subject = subject;
                ScreenEvent::DraftUpdated
            }
            ScreenIntent::StartEdit(id) => self.start_edit(id),
            ScreenIntent::CancelEdit => {
                if self.editing.take().is_none() {
                    return ScreenEvent::Ignored;
                }
                self.draft = TaskDraft::default();
                ScreenEvent::EditCancelled
            }
            ScreenIntent::Submit => self.submit(),
            ScreenIntent::OpenDatePicker => {
                self.picker.open_at(non_empty(&self.draft.due_date).as_deref());
                ScreenEvent::DatePickerOpened {
                    month: self.picker.view_month(),
                    year: self.picker.view_year(),
                }
            }
            ScreenIntent::NavigateMonth(step) => {
                if !self.picker.is_open() {
                    return ScreenEvent::Ignored;
                }
                let (month, year) = self.picker.navigate(step);
                ScreenEvent::MonthChanged { month, year }
            }
            ScreenIntent::SelectDay(day) => match self.picker.select_day(day) {
                Ok(pick) => {
                    self.draft.due_date = pick.label.clone();
                    ScreenEvent::DateSelected(pick)
                }
                Err(err) => {
                    debug!("event=date_select module=service status=rejected reason={err}");
                    ScreenEvent::Ignored
                }
            },
            ScreenIntent::CancelDatePicker => {
                if !self.picker.is_open() {
                    return ScreenEvent::Ignored;
                }
                self.picker.cancel();
                ScreenEvent::DatePickerClosed
            }
        }
    }

    fn request_delete(&mut self, id: TaskId) -> ScreenEvent {
        if self.store.get_task(&id).is_none() {
            return ScreenEvent::Ignored;
        }
        self.pending_delete = Some(id.clone());
        ScreenEvent::ConfirmationRequired(DeletePrompt::for_task(id))
    }

    fn confirm_delete(&mut self) -> ScreenEvent {
        let Some(id) = self.pending_delete.take() else {
            return ScreenEvent::Ignored;
        };
        let deleted = self.store.delete_task(&id);
        if deleted && self.editing.as_ref() == Some(&id) {
            self.editing = None;
            self.draft = TaskDraft::default();
        }
        changed(deleted)
    }

    fn start_edit(&mut self, id: TaskId) -> ScreenEvent {
        let Some(task) = self.store.get_task(&id) else {
            return ScreenEvent::Ignored;
        };
        self.draft = TaskDraft::from_task(task);
        self.editing = Some(id.clone());
        ScreenEvent::DraftLoaded(id)
    }

    fn submit(&mut self) -> ScreenEvent {
        let fields = self.draft.to_fields();
        let accepted = match &self.editing {
            Some(id) => self.store.edit_task(id, fields),
            None => self.store.add_task(fields).is_some(),
        };
        if accepted {
            self.draft = TaskDraft::default();
            self.editing = None;
        }
        changed(accepted)
    }
}

fn changed(accepted: bool) -> ScreenEvent {
    if accepted {
        ScreenEvent::TasksChanged
    } else {
        ScreenEvent::Ignored
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn load_label(outcome: LoadOutcome) -> &'static str {
    match outcome {
        LoadOutcome::Empty => "empty",
        LoadOutcome::Restored(_) => "restored",
        LoadOutcome::Recovered => "recovered",
    }
}
