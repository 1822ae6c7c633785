use chrono::{NaiveDate, NaiveDateTime};
use studytrack::error::TaskError;
use studytrack::model::{Priority, Task, TaskKind};
use studytrack::store::{DEFAULT_ALERT_WINDOW_DAYS, TaskStore};

fn task(title: &str, due: &str, kind: TaskKind) -> Task {
    Task::new(title, "", due, Priority::Medium, kind).unwrap()
}

fn done(title: &str, due: &str, kind: TaskKind) -> Task {
    let mut t = task(title, due, kind);
    t.set_completed(true);
    t
}

fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
}

fn pending_titles(store: &TaskStore) -> Vec<String> {
    let pending = store.list_pending();
    pending
        .iter(store)
        .map(|(_, t)| t.title().to_string())
        .collect()
}

fn scenario_store() -> TaskStore {
    let mut store = TaskStore::new();
    store.add(task("Midterm", "2025-01-10", TaskKind::Exam));
    store.add(task("Report", "2025-01-05", TaskKind::Project));
    store.add(done("Email", "2025-01-05", TaskKind::QuickTask));
    store
}

#[test]
fn test_list_pending_scenario() {
    let store = scenario_store();
    assert_eq!(pending_titles(&store), vec!["Report", "Midterm"]);

    let pending = store.list_pending();
    let dates: Vec<NaiveDate> = pending.iter(&store).map(|(_, t)| t.due_date()).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        ]
    );
}

#[test]
fn test_list_pending_is_stable_for_equal_dates() {
    let mut store = TaskStore::new();
    store.add(task("Late", "2025-02-01", TaskKind::Exam));
    store.add(task("First tie", "2025-01-15", TaskKind::Exam));
    store.add(task("Second tie", "2025-01-15", TaskKind::Project));
    store.add(task("Third tie", "2025-01-15", TaskKind::QuickTask));

    assert_eq!(
        pending_titles(&store),
        vec!["First tie", "Second tie", "Third tie", "Late"]
    );
}

#[test]
fn test_list_pending_excludes_completed() {
    let mut store = TaskStore::new();
    store.add(done("A", "2025-01-01", TaskKind::Exam));
    store.add(done("B", "2025-01-02", TaskKind::Exam));
    assert!(store.list_pending().is_empty());
    assert_eq!(store.len(), 2);
}

#[test]
fn test_complete_uses_display_index_not_store_position() {
    let mut store = scenario_store();
    let pending = store.list_pending();

    // Display index 0 is "Report" (store position 1), not "Midterm".
    let completed = store.mark_completed(&pending, "0").unwrap();
    assert_eq!(completed.title(), "Report");

    let flags: Vec<bool> = store.tasks().iter().map(|t| t.is_completed()).collect();
    assert_eq!(flags, vec![false, true, true]);
    assert_eq!(pending_titles(&store), vec!["Midterm"]);
}

#[test]
fn test_complete_out_of_range_leaves_store_unchanged() {
    let mut store = scenario_store();
    let before = store.tasks().to_vec();
    let pending = store.list_pending();

    match store.mark_completed(&pending, "2") {
        Err(TaskError::IndexOutOfRange { index, len }) => {
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("expected IndexOutOfRange, got {:?}", other),
    }
    assert!(matches!(
        store.mark_completed(&pending, "-1"),
        Err(TaskError::IndexOutOfRange { index: -1, .. })
    ));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn test_complete_with_garbage_index_is_invalid_input() {
    let mut store = scenario_store();
    let before = store.tasks().to_vec();
    let pending = store.list_pending();

    for raw in ["", "one", "1.5", "0x1"] {
        assert!(
            matches!(
                store.mark_completed(&pending, raw),
                Err(TaskError::InvalidInput(_))
            ),
            "accepted {:?}",
            raw
        );
    }
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn test_complete_accepts_padded_index() {
    let mut store = scenario_store();
    let pending = store.list_pending();
    assert_eq!(
        store.mark_completed(&pending, " 1 \n").unwrap().title(),
        "Midterm"
    );
}

#[test]
fn test_listing_goes_stale_after_replace() {
    let mut store = scenario_store();
    let pending = store.list_pending();
    store.replace(vec![task("Fresh", "2025-03-01", TaskKind::Exam)]);

    assert!(matches!(
        store.mark_completed(&pending, "0"),
        Err(TaskError::StaleListing)
    ));
    assert!(!store.tasks()[0].is_completed());

    let fresh = store.list_pending();
    assert_eq!(store.mark_completed(&fresh, "0").unwrap().title(), "Fresh");
}

#[test]
fn test_listing_survives_appends() {
    let mut store = scenario_store();
    let pending = store.list_pending();
    store.add(task("Quiz", "2025-01-01", TaskKind::Exam));

    // Appends do not move existing tasks, so the old listing still points at Report.
    assert_eq!(store.mark_completed(&pending, "0").unwrap().title(), "Report");
}

#[test]
fn test_due_soon_window() {
    let mut store = TaskStore::new();
    store.add(task("Plus three", "2025-01-13", TaskKind::Exam));
    store.add(task("Plus two", "2025-01-12", TaskKind::Project));
    store.add(task("Yesterday", "2025-01-09", TaskKind::QuickTask));
    store.add(task("Plus one", "2025-01-11", TaskKind::Exam));
    store.add(done("Done tomorrow", "2025-01-11", TaskKind::Exam));

    let reference = at("2025-01-10", "09:30");
    let due: Vec<(String, i64)> = store
        .due_soon(reference, DEFAULT_ALERT_WINDOW_DAYS)
        .into_iter()
        .map(|(t, d)| (t.title().to_string(), d))
        .collect();

    // Store order, not date order.
    assert_eq!(
        due,
        vec![("Plus two".to_string(), 2), ("Plus one".to_string(), 1)]
    );
}

#[test]
fn test_due_today_counts_as_zero_late_in_the_day() {
    let mut store = TaskStore::new();
    store.add(task("Today", "2025-01-10", TaskKind::Exam));

    let due = store.due_soon(at("2025-01-10", "23:59"), DEFAULT_ALERT_WINDOW_DAYS);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].1, 0);

    let due = store.due_soon(at("2025-01-11", "00:01"), DEFAULT_ALERT_WINDOW_DAYS);
    assert!(due.is_empty());
}

#[test]
fn test_due_soon_custom_window() {
    let mut store = TaskStore::new();
    store.add(task("Next week", "2025-01-17", TaskKind::Project));

    assert!(store.due_soon(at("2025-01-10", "12:00"), 2).is_empty());
    assert_eq!(store.due_soon(at("2025-01-10", "12:00"), 7)[0].1, 7);
}
