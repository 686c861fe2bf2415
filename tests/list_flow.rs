use std::collections::VecDeque;

use chrono::NaiveDate;
use jobtrail::app::{AppState, LoadState};
use jobtrail::domain::{ApplicationRecord, ApplicationStatus, RecordId};
use jobtrail::records::{MemoryRecordStore, RecordStore};
use jobtrail::scroll::{mark_pending_target, FrameQueue, RestoreOutcome, ScrollAnchor};
use jobtrail::{handle_event, initialize, Action, Config, Event, ViewMode};
use tempfile::TempDir;

const COLS: usize = 80;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn collection() -> Vec<ApplicationRecord> {
    (0..30)
        .map(|i| {
            let status = if i % 3 == 0 {
                ApplicationStatus::Rejected
            } else {
                ApplicationStatus::Pending
            };
            ApplicationRecord::new(
                format!("r{i}"),
                format!("Company {i:02}"),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i),
            )
            .with_status(status)
            .with_type(if i % 2 == 0 { "email" } else { "job portal" })
        })
        .collect()
}

fn session_config(dir: &TempDir) -> Config {
    Config {
        session_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

/// Runs `event` and executes the actions it produces against `store`.
fn dispatch(state: &mut AppState, store: &mut MemoryRecordStore, event: Event) -> Vec<Action> {
    let mut queue = VecDeque::from([event]);
    let mut emitted = vec![];

    while let Some(event) = queue.pop_front() {
        let (_, actions) = handle_event(state, &event).unwrap();
        for action in actions {
            match &action {
                Action::FetchCollection { ticket } => queue.push_back(match store.fetch_all() {
                    Ok(records) => Event::CollectionLoaded {
                        ticket: *ticket,
                        records,
                    },
                    Err(e) => Event::FetchFailed {
                        ticket: *ticket,
                        message: e.to_string(),
                    },
                }),
                Action::DeleteRecord { id } => {
                    store.delete(id).unwrap();
                    queue.push_back(Event::RecordDeleted(id.clone()));
                }
                Action::OpenEditor { .. } => {}
            }
            emitted.push(action);
        }
    }
    emitted
}

#[test]
fn returning_from_edit_restores_scroll_and_choices() {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);
    let mut store = MemoryRecordStore::new(collection());

    let mut state = initialize(&config);
    dispatch(&mut state, &mut store, Event::Mounted);
    dispatch(&mut state, &mut store, Event::SearchChanged("company".into()));
    dispatch(&mut state, &mut store, Event::ToggleStatus(ApplicationStatus::Pending));
    dispatch(&mut state, &mut store, Event::SetViewMode(ViewMode::List));

    let target = RecordId::from("r20");
    let actions = dispatch(&mut state, &mut store, Event::EditRecord(target.clone()));
    assert_eq!(actions, vec![Action::OpenEditor { id: target.clone() }]);
    drop(state);

    let mut state = initialize(&config);
    dispatch(&mut state, &mut store, Event::Mounted);
    assert_eq!(state.search_text, "company");
    assert_eq!(state.view_mode, ViewMode::List);
    assert_eq!(state.filtered.len(), 20);

    let mut page = jobtrail::ui::render(&state, today(), COLS);
    let mut anchor = ScrollAnchor::new(FrameQueue::default()).with_header_gap(1.0);
    let outcome = anchor.attempt_restore(state.view_store_mut(), &mut page);

    let line = page.anchor(&target).unwrap();
    let expected_top = line - page.header_rows() - 1;
    assert_eq!(
        outcome,
        RestoreOutcome::Restored {
            target,
            top: expected_top as f64,
        }
    );
    assert_eq!(page.scroll_top(), expected_top);
    let visible = page.visible(page.header_rows() + 3);
    assert_eq!(visible[page.header_rows() + 1], page.lines()[line]);
    assert_eq!(state.view_store().pending_target(), None);
    assert!(anchor.scheduler().is_idle());
}

#[test]
fn restore_waits_for_the_collection() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryRecordStore::new(collection());
    let mut state = initialize(&session_config(&dir));
    mark_pending_target(state.view_store_mut(), &RecordId::from("r7"));

    let (_, actions) = handle_event(&mut state, &Event::Mounted).unwrap();
    let [Action::FetchCollection { ticket }] = actions[..] else {
        panic!("expected a fetch");
    };
    assert_eq!(state.load_state, LoadState::Loading);

    let mut anchor = ScrollAnchor::new(FrameQueue::default());
    let mut page = jobtrail::ui::render(&state, today(), COLS);
    assert!(matches!(
        anchor.attempt_restore(state.view_store_mut(), &mut page),
        RestoreOutcome::Retrying { attempt: 1, .. }
    ));
    assert_eq!(anchor.scheduler().outstanding(), 1);

    let records = store.fetch_all().unwrap();
    handle_event(&mut state, &Event::CollectionLoaded { ticket, records }).unwrap();

    let mut page = jobtrail::ui::render(&state, today(), COLS);
    assert!(matches!(
        anchor.attempt_restore(state.view_store_mut(), &mut page),
        RestoreOutcome::Restored { .. }
    ));
    assert_eq!(anchor.scheduler().cancelled(), 1);
    assert!(anchor.scheduler().is_idle());
}

#[test]
fn filtered_out_target_is_abandoned() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryRecordStore::new(collection());
    let mut state = initialize(&session_config(&dir));
    dispatch(&mut state, &mut store, Event::Mounted);
    dispatch(&mut state, &mut store, Event::ToggleStatus(ApplicationStatus::Rejected));

    // r1 is pending, so the rejected-only view never shows it.
    dispatch(&mut state, &mut store, Event::EditRecord(RecordId::from("r1")));
    dispatch(&mut state, &mut store, Event::Mounted);

    let mut page = jobtrail::ui::render(&state, today(), COLS);
    let mut anchor = ScrollAnchor::new(FrameQueue::default()).with_retry_budget(4);
    let mut outcome = anchor.attempt_restore(state.view_store_mut(), &mut page);
    let mut frames = 0;
    while !anchor.scheduler().is_idle() {
        for handle in anchor.scheduler_mut().take_due() {
            frames += 1;
            outcome = anchor
                .on_frame(handle, state.view_store_mut(), &mut page)
                .unwrap();
        }
    }

    assert_eq!(frames, 3);
    assert_eq!(
        outcome,
        RestoreOutcome::Abandoned {
            target: RecordId::from("r1"),
            attempts: 4,
        }
    );
    assert_eq!(page.scroll_top(), 0);
    assert_eq!(state.view_store().pending_target(), None);
}

#[test]
fn fetch_failure_then_retry() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryRecordStore::new(collection());
    store.fail_fetches("disk unplugged");
    let mut state = initialize(&session_config(&dir));

    dispatch(&mut state, &mut store, Event::Mounted);
    assert_eq!(
        state.load_state,
        LoadState::Failed {
            message: "Failed to load applications".to_string()
        }
    );
    assert!(jobtrail::ui::render(&state, today(), COLS)
        .to_text()
        .contains("Failed to load applications"));

    store.heal();
    dispatch(&mut state, &mut store, Event::Retry);
    assert_eq!(state.load_state, LoadState::Ready);
    assert_eq!(state.filtered.len(), 30);
}

#[test]
fn delete_removes_record_from_view() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryRecordStore::new(collection());
    let mut state = initialize(&session_config(&dir));
    dispatch(&mut state, &mut store, Event::Mounted);

    dispatch(&mut state, &mut store, Event::DeleteRequested(RecordId::from("r3")));

    assert_eq!(state.records.len(), 29);
    assert!(state.filtered.iter().all(|record| record.id.as_str() != "r3"));
    assert_eq!(store.fetch_all().unwrap().len(), 29);
}

#[test]
fn separate_saves_merge_in_the_session_file() {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);
    let mut store = MemoryRecordStore::new(collection());

    let mut state = initialize(&config);
    dispatch(&mut state, &mut store, Event::Mounted);
    dispatch(&mut state, &mut store, Event::SearchChanged("07".into()));
    dispatch(&mut state, &mut store, Event::SetViewMode(ViewMode::List));
    drop(state);

    let loaded = initialize(&config).view_store().load();
    assert_eq!(loaded.search_text, "07");
    assert_eq!(loaded.view_mode, ViewMode::List);
    assert!(loaded.query.is_empty());
}

#[test]
fn reset_forgets_choices() {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);
    let mut store = MemoryRecordStore::new(collection());

    let mut state = initialize(&config);
    dispatch(&mut state, &mut store, Event::Mounted);
    dispatch(&mut state, &mut store, Event::ToggleType("email".into()));
    assert_eq!(state.filtered.len(), 15);

    dispatch(&mut state, &mut store, Event::ResetSession);
    assert!(state.query.is_empty());
    assert_eq!(state.filtered.len(), 30);
    drop(state);

    assert!(initialize(&config).view_store().load().query.is_empty());
}
