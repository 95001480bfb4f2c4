use tasklist_core::{FieldRequirements, Task, TaskFields, TaskId, TaskValidationError};

#[test]
fn task_new_sets_defaults_and_trims_fields() {
    let task = Task::new(TaskFields::detailed("  Math HW ", " Math", "5 Januari 2025 "));

    assert!(!task.id.as_str().is_empty());
    assert_eq!(task.title, "Math HW");
    assert_eq!(task.subject.as_deref(), Some("Math"));
    assert_eq!(task.due_date.as_deref(), Some("5 Januari 2025"));
    assert!(!task.completed);
}

#[test]
fn generated_ids_are_unique() {
    let first = TaskId::generate();
    let second = TaskId::generate();
    assert_ne!(first, second);
}

#[test]
fn apply_keeps_id_and_completion() {
    let mut task = Task::new(TaskFields::titled("draft"));
    let id = task.id.clone();
    task.toggle();

    task.apply(TaskFields::detailed("final", "Bahasa", "1 Mei 2025"));

    assert_eq!(task.id, id);
    assert!(task.completed);
    assert_eq!(task.title, "final");
    assert_eq!(task.subject.as_deref(), Some("Bahasa"));
}

#[test]
fn title_only_requirements_accept_missing_subject_and_date() {
    let fields = TaskFields::titled("buy milk");
    assert_eq!(fields.validate(FieldRequirements::title_only()), Ok(()));
    assert_eq!(
        fields.validate(FieldRequirements::detailed()),
        Err(TaskValidationError::EmptySubject)
    );
}

#[test]
fn blank_title_is_rejected_under_any_requirements() {
    let fields = TaskFields::detailed("   ", "Math", "5 Januari 2025");
    assert_eq!(
        fields.validate(FieldRequirements::title_only()),
        Err(TaskValidationError::EmptyTitle)
    );
    assert_eq!(
        fields.validate(FieldRequirements::detailed()),
        Err(TaskValidationError::EmptyTitle)
    );
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::with_id(
        TaskId::from("1736000000000"),
        TaskFields::detailed("Math HW", "Math", "5 Januari 2025"),
    );
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "1736000000000");
    assert_eq!(json["title"], "Math HW");
    assert_eq!(json["subject"], "Math");
    assert_eq!(json["dueDate"], "5 Januari 2025");
    assert_eq!(json["completed"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn absent_optional_fields_are_omitted_from_wire_shape() {
    let task = Task::with_id(TaskId::from("1"), TaskFields::titled("plain"));
    let json = serde_json::to_value(&task).unwrap();

    let object = json.as_object().unwrap();
    assert!(!object.contains_key("subject"));
    assert!(!object.contains_key("dueDate"));
}

#[test]
fn legacy_detailed_shape_is_readable() {
    let value = serde_json::json!({
        "id": "1736000000000",
        "task": "Essay",
        "subject": "Bahasa",
        "date": "12 Maret 2025",
        "completed": false
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.title, "Essay");
    assert_eq!(task.subject.as_deref(), Some("Bahasa"));
    assert_eq!(task.due_date.as_deref(), Some("12 Maret 2025"));
}

#[test]
fn legacy_simple_shape_defaults_missing_fields() {
    let value = serde_json::json!({ "id": "42", "title": "Sapu lantai", "subject": "" });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.subject, None);
    assert_eq!(task.due_date, None);
    assert!(!task.completed);
}
