use caltodo::cmd::{cmd_add, cmd_cal, cmd_delete, cmd_list, cmd_toggle};
use caltodo::db::TaskStore;
use caltodo::fields::WeekStart;
use caltodo::state::{Action, AppState};
use caltodo::storage::{FileStorage, Storage, STORE_KEY};
use caltodo::view::render;
use chrono::NaiveDate;
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn buy_milk_scenario_round_trips_through_disk() {
    let temp = tempdir().expect("tempdir");
    let mut storage = FileStorage::new(temp.path());
    let date = d(2024, 3, 15);

    let mut state = AppState::new(date, TaskStore::load(&storage));
    assert!(state.store.is_empty());

    state
        .dispatch(Action::AddTask("Buy milk".into()), 1_710_460_800_000, &mut storage)
        .expect("add");
    let on_disk = std::fs::read_to_string(temp.path().join("todos.json")).expect("read blob");
    assert_eq!(
        on_disk,
        r#"{"2024-03-15":[{"id":1710460800000,"text":"Buy milk","completed":false}]}"#
    );

    let id = state.store.tasks_for(date)[0].id;
    state
        .dispatch(Action::ToggleTask { date, id }, 0, &mut storage)
        .expect("toggle");
    let reloaded = TaskStore::load(&storage);
    assert!(reloaded.get(date, id).expect("task").completed);
    assert_eq!(reloaded, state.store);

    state
        .dispatch(Action::DeleteTask { date, id }, 0, &mut storage)
        .expect("delete");
    assert_eq!(storage.get_item(STORE_KEY).expect("get").as_deref(), Some("{}"));
    assert!(TaskStore::load(&storage).is_empty());
    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .expect("read dir")
        .map(|e| e.expect("entry").file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("todos.json")]);
}

#[test]
fn concurrent_writers_never_tear_the_blob() {
    let temp = tempdir().expect("tempdir");
    let blobs = [r#"{"writer":"a"}"#, r#"{"writer":"b"}"#];

    std::thread::scope(|scope| {
        for blob in blobs {
            let dir = temp.path().to_path_buf();
            scope.spawn(move || {
                let mut storage = FileStorage::new(dir);
                for _ in 0..50 {
                    storage.set_item(STORE_KEY, blob).expect("set");
                }
            });
        }
    });

    let storage = FileStorage::new(temp.path());
    let stored = storage.get_item(STORE_KEY).expect("get").expect("value");
    assert!(blobs.contains(&stored.as_str()));
    assert_eq!(std::fs::read_dir(temp.path()).expect("read dir").count(), 1);
}

#[test]
fn malformed_file_recovers_to_empty_and_is_overwritten_on_save() {
    let temp = tempdir().expect("tempdir");
    std::fs::write(temp.path().join("todos.json"), "{\"2024-03-15\": [oops").expect("write");
    let mut storage = FileStorage::new(temp.path());

    let mut store = TaskStore::load(&storage);
    assert!(store.is_empty());

    store.add(d(2024, 3, 15), "Fresh start", 1).expect("add");
    store.save(&mut storage).expect("save");
    assert_eq!(TaskStore::load(&storage), store);
}

#[test]
fn save_creates_missing_data_dir() {
    let temp = tempdir().expect("tempdir");
    let nested = temp.path().join("a").join("b");
    let mut storage = FileStorage::new(&nested);

    let mut store = TaskStore::new();
    store.add(d(2024, 1, 1), "New year", 1).expect("add");
    store.save(&mut storage).expect("save");
    assert!(nested.join("todos.json").exists());
}

#[test]
fn cli_handlers_share_one_store() {
    let temp = tempdir().expect("tempdir");
    let mut storage = FileStorage::new(temp.path());
    let date = d(2024, 3, 15);
    let mut out = Vec::new();

    let mut store = TaskStore::load(&storage);
    cmd_add(&mut store, &mut storage, &mut out, date, &["Buy".to_string(), "milk".to_string()]).expect("add");
    cmd_add(&mut store, &mut storage, &mut out, date, &["Post letter".to_string()]).expect("add");

    let mut store = TaskStore::load(&storage);
    let ids: Vec<u64> = store.tasks_for(date).iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);

    cmd_toggle(&mut store, &mut storage, &mut out, date, ids[0]).expect("toggle");
    out.clear();
    cmd_list(&TaskStore::load(&storage), &mut out, date, false).expect("list");
    let listing = String::from_utf8(out.clone()).expect("utf8");
    assert!(listing.starts_with("Friday, March 15 (2024-03-15): 1 open\n"));
    assert!(listing.contains(&format!("[x] {:<14} Buy milk", ids[0])));
    assert!(listing.contains(&format!("[ ] {:<14} Post letter", ids[1])));

    cmd_delete(&mut store, &mut storage, &mut out, date, ids[0]).expect("delete");
    assert!(cmd_delete(&mut store, &mut storage, &mut out, date, ids[0]).is_err());
    assert_eq!(TaskStore::load(&storage).tasks_for(date).len(), 1);
}

#[test]
fn cal_marks_task_days() {
    let mut store = TaskStore::new();
    store.add(d(2024, 2, 29), "Leap day", 1).expect("add");
    let mut out = Vec::new();
    cmd_cal(store, &mut out, Some("2024-02".parse().expect("month")), d(2024, 3, 1), WeekStart::Monday)
        .expect("cal");
    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0].trim(), "February 2024");
    assert_eq!(lines[1], " Mo   Tu   We   Th   Fr   Sa   Su");
    assert!(lines.last().expect("last week").contains("29*"));
}

#[test]
fn view_model_follows_state_across_months() {
    let today = d(2024, 12, 31);
    let mut state = AppState::new(today, TaskStore::new());
    state.apply(Action::AddTask("Fireworks".into()), 1);
    state.apply(Action::NextMonth, 0);

    let view = render(&state, today, WeekStart::Sunday);
    assert_eq!(view.month_label, "January 2025");
    assert_eq!(view.selected_label, "Tuesday, December 31");
    assert_eq!(view.tasks.len(), 1);
    assert!(view.grid.days().all(|c| !c.selected && !c.today && !c.has_tasks));
}
