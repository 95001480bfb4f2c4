use chrono::NaiveDate;
use tasklist_core::{
    DatePicker, FieldRequirements, MemoryKeyValueStore, MonthStep, ScreenEvent, ScreenIntent,
    TaskDraft, TaskFields, TaskId, TaskScreen,
};

fn homework_screen(storage: &MemoryKeyValueStore) -> TaskScreen<&MemoryKeyValueStore> {
    let picker = DatePicker::starting_at(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
    TaskScreen::open(storage, FieldRequirements::detailed(), picker)
}

fn fill_draft(screen: &mut TaskScreen<&MemoryKeyValueStore>, title: &str, subject: &str, day: u32) {
    screen.dispatch(ScreenIntent::SetTitle(title.to_string()));
    screen.dispatch(ScreenIntent::SetSubject(subject.to_string()));
    screen.dispatch(ScreenIntent::OpenDatePicker);
    screen.dispatch(ScreenIntent::SelectDay(day));
}

#[test]
fn submit_adds_task_from_draft_and_clears_form() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);

    fill_draft(&mut screen, "Math HW", "Math", 5);
    assert_eq!(screen.draft().due_date, "5 Januari 2025");

    assert_eq!(screen.dispatch(ScreenIntent::Submit), ScreenEvent::TasksChanged);
    assert_eq!(screen.tasks().len(), 1);
    assert_eq!(screen.tasks()[0].title, "Math HW");
    assert_eq!(screen.tasks()[0].due_date.as_deref(), Some("5 Januari 2025"));
    assert_eq!(screen.draft(), &TaskDraft::default());
}

#[test]
fn submit_with_missing_date_keeps_draft() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);
    screen.dispatch(ScreenIntent::SetTitle("Essay".to_string()));
    screen.dispatch(ScreenIntent::SetSubject("Bahasa".to_string()));

    assert_eq!(screen.dispatch(ScreenIntent::Submit), ScreenEvent::Ignored);
    assert!(screen.tasks().is_empty());
    assert_eq!(screen.draft().title, "Essay");
}

#[test]
fn delete_requires_confirmation() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);
    screen.dispatch(ScreenIntent::Add(TaskFields::detailed("a", "Math", "5 Januari 2025")));
    let id = screen.tasks()[0].id.clone();

    let ScreenEvent::ConfirmationRequired(prompt) =
        screen.dispatch(ScreenIntent::RequestDelete(id.clone()))
    else {
        panic!("delete request should ask for confirmation");
    };
    assert_eq!(prompt.task_id, id);
    assert_eq!(prompt.title, "Hapus Tugas");
    assert_eq!(prompt.cancel_label, "Batal");
    assert_eq!(prompt.confirm_label, "Hapus");
    assert_eq!(screen.tasks().len(), 1);

    assert_eq!(screen.dispatch(ScreenIntent::CancelDelete), ScreenEvent::DeleteCancelled);
    assert_eq!(screen.tasks().len(), 1);
    assert_eq!(screen.dispatch(ScreenIntent::ConfirmDelete), ScreenEvent::Ignored);
    assert_eq!(screen.tasks().len(), 1);

    screen.dispatch(ScreenIntent::RequestDelete(id.clone()));
    assert_eq!(screen.pending_delete(), Some(&id));
    assert_eq!(screen.dispatch(ScreenIntent::ConfirmDelete), ScreenEvent::TasksChanged);
    assert!(screen.tasks().is_empty());
    assert_eq!(screen.pending_delete(), None);
}

#[test]
fn delete_request_for_unknown_task_is_ignored() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);

    assert_eq!(
        screen.dispatch(ScreenIntent::RequestDelete(TaskId::from("missing"))),
        ScreenEvent::Ignored
    );
    assert_eq!(screen.pending_delete(), None);
}

#[test]
fn start_edit_then_submit_updates_in_place() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);
    screen.dispatch(ScreenIntent::Add(TaskFields::detailed("Math HW", "Math", "5 Januari 2025")));
    screen.dispatch(ScreenIntent::Add(TaskFields::detailed("Essay", "Bahasa", "7 Januari 2025")));
    let id = screen.tasks()[0].id.clone();
    screen.dispatch(ScreenIntent::Toggle(id.clone()));

    assert_eq!(
        screen.dispatch(ScreenIntent::StartEdit(id.clone())),
        ScreenEvent::DraftLoaded(id.clone())
    );
    assert_eq!(screen.editing(), Some(&id));
    assert_eq!(screen.draft().subject, "Math");

    screen.dispatch(ScreenIntent::SetTitle("Math HW v2".to_string()));
    screen.dispatch(ScreenIntent::OpenDatePicker);
    assert_eq!(screen.picker().view_month(), 0);
    assert_eq!(screen.picker().selected_day(), Some(5));
    screen.dispatch(ScreenIntent::SelectDay(6));

    assert_eq!(screen.dispatch(ScreenIntent::Submit), ScreenEvent::TasksChanged);
    assert_eq!(screen.tasks().len(), 2);
    let task = &screen.tasks()[0];
    assert_eq!(task.id, id);
    assert_eq!(task.title, "Math HW v2");
    assert_eq!(task.due_date.as_deref(), Some("6 Januari 2025"));
    assert!(task.completed);
    assert_eq!(screen.editing(), None);
}

#[test]
fn cancel_edit_clears_draft() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);
    screen.dispatch(ScreenIntent::Add(TaskFields::detailed("a", "Math", "5 Januari 2025")));
    let id = screen.tasks()[0].id.clone();

    screen.dispatch(ScreenIntent::StartEdit(id));
    assert_eq!(screen.dispatch(ScreenIntent::CancelEdit), ScreenEvent::EditCancelled);
    assert_eq!(screen.editing(), None);
    assert!(screen.draft().title.is_empty());
    assert_eq!(screen.dispatch(ScreenIntent::CancelEdit), ScreenEvent::Ignored);
}

#[test]
fn deleting_task_under_edit_leaves_edit_mode() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);
    screen.dispatch(ScreenIntent::Add(TaskFields::detailed("a", "Math", "5 Januari 2025")));
    let id = screen.tasks()[0].id.clone();

    screen.dispatch(ScreenIntent::StartEdit(id.clone()));
    screen.dispatch(ScreenIntent::RequestDelete(id));
    screen.dispatch(ScreenIntent::ConfirmDelete);

    assert_eq!(screen.editing(), None);
    assert!(screen.draft().title.is_empty());
}

#[test]
fn cancelling_picker_keeps_committed_date() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);
    fill_draft(&mut screen, "Essay", "Bahasa", 9);

    assert_eq!(
        screen.dispatch(ScreenIntent::OpenDatePicker),
        ScreenEvent::DatePickerOpened { month: 0, year: 2025 }
    );
    assert_eq!(
        screen.dispatch(ScreenIntent::NavigateMonth(MonthStep::Previous)),
        ScreenEvent::MonthChanged { month: 11, year: 2024 }
    );
    assert_eq!(
        screen.dispatch(ScreenIntent::CancelDatePicker),
        ScreenEvent::DatePickerClosed
    );

    assert_eq!(screen.draft().due_date, "9 Januari 2025");
    assert_eq!(screen.picker().view_month(), 0);
    assert_eq!(screen.picker().view_year(), 2025);
}

#[test]
fn picker_intents_while_closed_are_ignored() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);

    assert_eq!(
        screen.dispatch(ScreenIntent::NavigateMonth(MonthStep::Next)),
        ScreenEvent::Ignored
    );
    assert_eq!(screen.dispatch(ScreenIntent::SelectDay(3)), ScreenEvent::Ignored);
    assert_eq!(screen.dispatch(ScreenIntent::CancelDatePicker), ScreenEvent::Ignored);
    assert!(screen.draft().due_date.is_empty());
}

#[test]
fn screen_open_restores_previous_session() {
    let storage = MemoryKeyValueStore::new();
    {
        let mut screen = homework_screen(&storage);
        screen.dispatch(ScreenIntent::Add(TaskFields::detailed("kept", "Math", "5 Januari 2025")));
    }

    let screen = homework_screen(&storage);
    assert_eq!(screen.tasks().len(), 1);
    assert_eq!(screen.tasks()[0].title, "kept");
}

#[test]
fn toggle_and_edit_intents_for_unknown_ids_are_ignored() {
    let storage = MemoryKeyValueStore::new();
    let mut screen = homework_screen(&storage);
    let missing = TaskId::from("missing");

    assert_eq!(screen.dispatch(ScreenIntent::Toggle(missing.clone())), ScreenEvent::Ignored);
    assert_eq!(
        screen.dispatch(ScreenIntent::Edit {
            id: missing.clone(),
            fields: TaskFields::detailed("x", "y", "1 Mei 2025"),
        }),
        ScreenEvent::Ignored
    );
    assert_eq!(screen.dispatch(ScreenIntent::StartEdit(missing)), ScreenEvent::Ignored);
    assert!(screen.tasks().is_empty());
}
