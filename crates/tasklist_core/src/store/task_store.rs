//! In-memory task collection with snapshot persistence.
//!
//! # Responsibility
//! - Own the ordered task collection and every mutation on it.
//! - Write the full collection back to the key-value store after each change.
//!
//! # Invariants
//! - Validation runs before mutation; rejected input leaves the collection
//!   untouched and triggers no write.
//! - Collection order is insertion order. Edits and toggles never reorder.
//! - A failed write never rolls back the in-memory change.
//! - A failed or corrupt read never aborts startup; the store starts empty.

use crate::model::task::{FieldRequirements, Task, TaskFields, TaskId};
use crate::repo::kv_store::KeyValueStore;
use crate::store::snapshot::{decode_snapshot, encode_snapshot, TASKS_KEY};
use log::{debug, error, info};

/// Result of loading the persisted collection on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored yet.
    Empty,
    /// Stored collection restored with this many tasks.
    Restored(usize),
    /// Stored blob was unreadable; started from an empty collection.
    Recovered,
}

/// Single source of truth for the task list.
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    requirements: FieldRequirements,
    tasks: Vec<Task>,
    last_write_error: Option<String>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates an empty, not yet loaded store.
    pub fn new(storage: S, requirements: FieldRequirements) -> Self {
        Self {
            storage,
            requirements,
            tasks: Vec::new(),
            last_write_error: None,
        }
    }

    /// Creates a store and immediately loads the persisted collection.
    pub fn open(storage: S, requirements: FieldRequirements) -> Self {
        let mut store = Self::new(storage, requirements);
        store.initialize();
        store
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Never fails: unreadable storage or a corrupt blob falls back to an
    /// empty collection and is reported through the log.
    pub fn initialize(&mut self) -> LoadOutcome {
        let blob = match self.storage.get(TASKS_KEY) {
            Ok(blob) => blob,
            Err(err) => {
                error!(
                    "event=tasks_load module=store status=error error_code=storage_read_failed error={err}"
                );
                self.tasks.clear();
                return LoadOutcome::Recovered;
            }
        };

        let Some(blob) = blob else {
            self.tasks.clear();
            info!("event=tasks_load module=store status=ok count=0 source=empty");
            return LoadOutcome::Empty;
        };

        match decode_snapshot(&blob) {
            Ok(tasks) => {
                let count = tasks.len();
                self.tasks = tasks;
                info!("event=tasks_load module=store status=ok count={count} source=storage");
                LoadOutcome::Restored(count)
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=store status=error error_code=snapshot_invalid blob_len={} error={err}",
                    blob.len()
                );
                self.tasks.clear();
                LoadOutcome::Recovered
            }
        }
    }

    /// Appends a new open task. Returns `None` when a required field is empty.
    pub fn add_task(&mut self, fields: TaskFields) -> Option<TaskId> {
        if let Err(err) = fields.validate(self.requirements) {
            debug!("event=task_add module=store status=rejected reason={err}");
            return None;
        }

        let task = Task::new(fields);
        let id = task.id.clone();
        self.tasks.push(task);
        debug!("event=task_add module=store status=ok task_id={id}");
        self.persist();
        Some(id)
    }

    /// Replaces the editable fields of an existing task.
    ///
    /// Returns `false` when `id` is unknown or a required field is empty.
    pub fn edit_task(&mut self, id: &TaskId, fields: TaskFields) -> bool {
        if let Err(err) = fields.validate(self.requirements) {
            debug!("event=task_edit module=store status=rejected task_id={id} reason={err}");
            return false;
        }
        let Some(task) = self.find_mut(id) else {
            debug!("event=task_edit module=store status=not_found task_id={id}");
            return false;
        };

        task.apply(fields);
        debug!("event=task_edit module=store status=ok task_id={id}");
        self.persist();
        true
    }

    /// Flips completion of one task and returns its new state.
    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<bool> {
        let Some(task) = self.find_mut(id) else {
            debug!("event=task_toggle module=store status=not_found task_id={id}");
            return None;
        };

        let completed = task.toggle();
        debug!("event=task_toggle module=store status=ok task_id={id} completed={completed}");
        self.persist();
        Some(completed)
    }

    /// Removes one task. Callers facing a user must confirm first.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| &task.id == id) else {
            debug!("event=task_delete module=store status=not_found task_id={id}");
            return false;
        };

        self.tasks.remove(index);
        debug!("event=task_delete module=store status=ok task_id={id}");
        self.persist();
        true
    }

    /// Current collection in stored order.
    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn requirements(&self) -> FieldRequirements {
        self.requirements
    }

    /// Error text of the most recent failed write, cleared by the next success.
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn find_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    fn persist(&mut self) {
        let result = encode_snapshot(&self.tasks)
            .map_err(|err| err.to_string())
            .and_then(|blob| {
                self.storage
                    .set(TASKS_KEY, &blob)
                    .map_err(|err| err.to_string())
            });

        match result {
            Ok(()) => {
                if self.last_write_error.take().is_some() {
                    info!("event=tasks_save module=store status=recovered count={}", self.tasks.len());
                } else {
                    debug!("event=tasks_save module=store status=ok count={}", self.tasks.len());
                }
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=store status=error error_code=storage_write_failed count={} error={err}",
                    self.tasks.len()
                );
                self.last_write_error = Some(err);
            }
        }
    }
}
