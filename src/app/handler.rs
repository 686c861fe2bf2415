//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and
//! record-store completions, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the shell (user commands, fetch/delete completions)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods; each user choice is
//!    persisted to the session as it changes
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mounted`, `ResetSession`
//! - **Search**: `SearchChanged`, `SearchCleared`
//! - **Filters**: `ToggleStatus`, `ToggleType`, `SetStartDate`, `SetEndDate`,
//!   `ReplaceFilters`, `RemoveChip`, `ClearFilters`
//! - **Presentation**: `SetViewMode`
//! - **Collection**: `Refresh`, `Retry`, `CollectionLoaded`, `FetchFailed`
//! - **Records**: `EditRecord`, `DeleteRequested`, `RecordDeleted`
//!
//! # Example
//!
//! ```rust
//! use jobtrail::app::{handle_event, Action, AppState, Event};
//! use jobtrail::storage::{MemorySession, ViewStateStore};
//!
//! let mut state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
//! let (needs_render, actions) = handle_event(&mut state, &Event::Mounted)?;
//! assert!(needs_render);
//! assert!(matches!(actions[..], [Action::FetchCollection { .. }]));
//! # Ok::<(), jobtrail::TrackerError>(())
//! ```

use super::actions::{Action, FetchTicket};
use super::modes::{LoadState, ViewMode};
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{ApplicationRecord, ApplicationStatus, FilterQuery, RecordId};
use crate::filter::FilterChip;
use crate::scroll;
use crate::storage::ViewStatePatch;
use chrono::NaiveDate;

/// Events triggered by user input or record-store completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The list view was (re)entered.
    ///
    /// Restores the persisted view state and starts a fetch.
    Mounted,

    /// Replaces the search text.
    SearchChanged(String),
    SearchCleared,

    /// Adds the status to the filter, or removes it if already selected.
    ToggleStatus(ApplicationStatus),
    /// Adds the application type to the filter, or removes it if already selected.
    ToggleType(String),
    SetStartDate(Option<NaiveDate>),
    SetEndDate(Option<NaiveDate>),

    /// Replaces the whole query, as the filter dialog's "apply" does.
    ReplaceFilters(FilterQuery),
    RemoveChip(FilterChip),
    ClearFilters,

    SetViewMode(ViewMode),

    /// Re-fetches the collection.
    Refresh,
    /// Re-fetches after a failure.
    Retry,

    /// A fetch completed.
    CollectionLoaded {
        ticket: FetchTicket,
        records: Vec<ApplicationRecord>,
    },

    /// A fetch failed.
    FetchFailed {
        ticket: FetchTicket,
        message: String,
    },

    /// The user opened a record's edit flow.
    EditRecord(RecordId),

    /// The user asked to delete a record.
    DeleteRequested(RecordId),

    /// The store confirmed a delete.
    RecordDeleted(RecordId),

    /// Forgets every persisted choice and returns to defaults.
    ResetSession,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(needs_render, actions)`: whether the page must be re-rendered, and the
/// side effects to execute in order.
///
/// # Errors
///
/// Reserved for failures the shell must see. Session persistence failures are
/// absorbed by the view state store and never surface here.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Mounted => {
            state.restore_view_state();
            mark_loading_if_empty(state);
            state.apply_filters();
            let ticket = state.issue_ticket();
            tracing::debug!(ticket = %ticket, "list mounted");
            Ok((true, vec![Action::FetchCollection { ticket }]))
        }

        Event::SearchChanged(text) => {
            if *text == state.search_text {
                return Ok((false, vec![]));
            }
            state.search_text.clone_from(text);
            state.persist(&ViewStatePatch::default().search_text(text.as_str()));
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::SearchCleared => {
            if state.search_text.is_empty() {
                return Ok((false, vec![]));
            }
            state.search_text.clear();
            state.persist(&ViewStatePatch::default().search_text(""));
            state.apply_filters();
            Ok((true, vec![]))
        }

        Event::ToggleStatus(status) => {
            state.query.toggle_status(*status);
            Ok(query_changed(state))
        }
        Event::ToggleType(application_type) => {
            state.query.toggle_type(application_type);
            Ok(query_changed(state))
        }
        Event::SetStartDate(date) => {
            state.query.date_range.start = *date;
            Ok(query_changed(state))
        }
        Event::SetEndDate(date) => {
            state.query.date_range.end = *date;
            Ok(query_changed(state))
        }
        Event::ReplaceFilters(query) => {
            state.query.clone_from(query);
            Ok(query_changed(state))
        }
        Event::RemoveChip(chip) => {
            chip.remove_from(&mut state.query);
            Ok(query_changed(state))
        }
        Event::ClearFilters => {
            if state.query.is_empty() {
                return Ok((false, vec![]));
            }
            state.query.clear();
            Ok(query_changed(state))
        }

        Event::SetViewMode(view_mode) => {
            if state.view_mode == *view_mode {
                return Ok((false, vec![]));
            }
            state.view_mode = *view_mode;
            state.persist(&ViewStatePatch::default().view_mode(*view_mode));
            Ok((true, vec![]))
        }

        Event::Refresh => {
            let ticket = state.issue_ticket();
            mark_loading_if_empty(state);
            Ok((true, vec![Action::FetchCollection { ticket }]))
        }
        Event::Retry => {
            if !matches!(state.load_state, LoadState::Failed { .. }) {
                tracing::debug!("retry ignored, last fetch did not fail");
                return Ok((false, vec![]));
            }
            let ticket = state.issue_ticket();
            state.load_state = LoadState::Loading;
            Ok((true, vec![Action::FetchCollection { ticket }]))
        }

        Event::CollectionLoaded { ticket, records } => {
            if *ticket != state.latest_ticket() {
                tracing::debug!(ticket = %ticket, latest = %state.latest_ticket(), "dropping stale collection");
                return Ok((false, vec![]));
            }
            state.records.clone_from(records);
            state.load_state = LoadState::Ready;
            state.apply_filters();
            tracing::info!(count = records.len(), "collection loaded");
            Ok((true, vec![]))
        }
        Event::FetchFailed { ticket, message } => {
            if *ticket != state.latest_ticket() {
                tracing::debug!(ticket = %ticket, "dropping stale fetch failure");
                return Ok((false, vec![]));
            }
            tracing::warn!(error = %message, "collection fetch failed");
            state.load_state = LoadState::Failed {
                message: "Failed to load applications".to_string(),
            };
            Ok((true, vec![]))
        }

        Event::EditRecord(id) => {
            scroll::mark_pending_target(state.view_store_mut(), id);
            Ok((false, vec![Action::OpenEditor { id: id.clone() }]))
        }
        Event::DeleteRequested(id) => Ok((false, vec![Action::DeleteRecord { id: id.clone() }])),
        Event::RecordDeleted(id) => {
            let before = state.records.len();
            state.records.retain(|record| &record.id != id);
            if state.records.len() == before {
                return Ok((false, vec![]));
            }
            state.apply_filters();
            Ok((true, vec![]))
        }

        Event::ResetSession => {
            state.view_store_mut().reset();
            state.restore_view_state();
            state.apply_filters();
            Ok((true, vec![]))
        }
    }
}

/// Records already on screen stay visible while a fetch is in flight.
fn mark_loading_if_empty(state: &mut AppState) {
    if state.records.is_empty() {
        state.load_state = LoadState::Loading;
    }
}

fn query_changed(state: &mut AppState) -> (bool, Vec<Action>) {
    let query = state.query.clone();
    state.persist(&ViewStatePatch::default().query(query));
    state.apply_filters();
    (true, vec![])
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mounted => "Mounted",
        Event::SearchChanged(_) => "SearchChanged",
        Event::SearchCleared => "SearchCleared",
        Event::ToggleStatus(_) => "ToggleStatus",
        Event::ToggleType(_) => "ToggleType",
        Event::SetStartDate(_) => "SetStartDate",
        Event::SetEndDate(_) => "SetEndDate",
        Event::ReplaceFilters(_) => "ReplaceFilters",
        Event::RemoveChip(_) => "RemoveChip",
        Event::ClearFilters => "ClearFilters",
        Event::SetViewMode(_) => "SetViewMode",
        Event::Refresh => "Refresh",
        Event::Retry => "Retry",
        Event::CollectionLoaded { .. } => "CollectionLoaded",
        Event::FetchFailed { .. } => "FetchFailed",
        Event::EditRecord(_) => "EditRecord",
        Event::DeleteRequested(_) => "DeleteRequested",
        Event::RecordDeleted(_) => "RecordDeleted",
        Event::ResetSession => "ResetSession",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemorySession, ViewStateStore};

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn records() -> Vec<ApplicationRecord> {
        vec![
            ApplicationRecord::new("1", "ACME Corp", day(1, 5)),
            ApplicationRecord::new("2", "Other Co", day(2, 10)).with_status(ApplicationStatus::Accepted),
            ApplicationRecord::new("3", "Acme Labs", day(3, 1)).with_type("email"),
        ]
    }

    fn mounted() -> AppState {
        let mut state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
        let (_, actions) = handle_event(&mut state, &Event::Mounted).unwrap();
        let [Action::FetchCollection { ticket }] = actions[..] else {
            panic!("expected a fetch");
        };
        handle_event(&mut state, &Event::CollectionLoaded { ticket, records: records() }).unwrap();
        state
    }

    fn visible_ids(state: &AppState) -> Vec<&str> {
        state.filtered.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn mount_starts_loading_and_fetches() {
        let mut state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
        let (render, actions) = handle_event(&mut state, &Event::Mounted).unwrap();
        assert!(render);
        assert_eq!(state.load_state, LoadState::Loading);
        assert_eq!(actions, vec![Action::FetchCollection { ticket: FetchTicket(1) }]);
    }

    #[test]
    fn remount_keeps_loaded_records_visible() {
        let mut state = mounted();
        let (render, actions) = handle_event(&mut state, &Event::Mounted).unwrap();

        assert!(render);
        assert_eq!(state.load_state, LoadState::Ready);
        assert_eq!(visible_ids(&state), ["1", "2", "3"]);
        assert!(matches!(actions[..], [Action::FetchCollection { .. }]));
    }

    #[test]
    fn search_filters_and_persists() {
        let mut state = mounted();
        handle_event(&mut state, &Event::SearchChanged("acme".into())).unwrap();
        assert_eq!(visible_ids(&state), ["1", "3"]);
        assert_eq!(state.view_store().load().search_text, "acme");

        handle_event(&mut state, &Event::SearchCleared).unwrap();
        assert_eq!(visible_ids(&state), ["1", "2", "3"]);
        assert_eq!(state.view_store().load().search_text, "");
    }

    #[test]
    fn unchanged_search_needs_no_render() {
        let mut state = mounted();
        let (render, _) = handle_event(&mut state, &Event::SearchChanged(String::new())).unwrap();
        assert!(!render);
    }

    #[test]
    fn filter_changes_persist_whole_query() {
        let mut state = mounted();
        handle_event(&mut state, &Event::ToggleStatus(ApplicationStatus::Accepted)).unwrap();
        assert_eq!(visible_ids(&state), ["2"]);

        handle_event(&mut state, &Event::SetStartDate(Some(day(3, 1)))).unwrap();
        assert!(state.filtered.is_empty());

        let stored = state.view_store().load().query;
        assert_eq!(stored, state.query);

        handle_event(&mut state, &Event::RemoveChip(FilterChip::Status(ApplicationStatus::Accepted))).unwrap();
        assert_eq!(visible_ids(&state), ["3"]);

        handle_event(&mut state, &Event::ClearFilters).unwrap();
        assert_eq!(visible_ids(&state), ["1", "2", "3"]);
        assert!(state.view_store().load().query.is_empty());
    }

    #[test]
    fn type_filter_excludes_untyped_records() {
        let mut state = mounted();
        handle_event(&mut state, &Event::ToggleType("email".into())).unwrap();
        assert_eq!(visible_ids(&state), ["3"]);
    }

    #[test]
    fn view_mode_survives_remount() {
        let mut state = mounted();
        handle_event(&mut state, &Event::SetViewMode(ViewMode::List)).unwrap();
        state.view_mode = ViewMode::Card;

        handle_event(&mut state, &Event::Mounted).unwrap();
        assert_eq!(state.view_mode, ViewMode::List);
    }

    #[test]
    fn stale_collection_is_dropped() {
        let mut state = mounted();
        let (_, first) = handle_event(&mut state, &Event::Refresh).unwrap();
        let (_, second) = handle_event(&mut state, &Event::Refresh).unwrap();
        let [Action::FetchCollection { ticket: old }] = first[..] else { panic!() };
        let [Action::FetchCollection { ticket: new }] = second[..] else { panic!() };

        handle_event(&mut state, &Event::CollectionLoaded { ticket: new, records: vec![] }).unwrap();
        let (render, _) =
            handle_event(&mut state, &Event::CollectionLoaded { ticket: old, records: records() }).unwrap();

        assert!(!render);
        assert!(state.records.is_empty());
    }

    #[test]
    fn failure_then_retry() {
        let mut state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
        handle_event(&mut state, &Event::Mounted).unwrap();
        let ticket = state.latest_ticket();
        handle_event(&mut state, &Event::FetchFailed { ticket, message: "connection refused".into() }).unwrap();
        assert!(matches!(state.load_state, LoadState::Failed { .. }));

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert_eq!(state.load_state, LoadState::Loading);
        assert_eq!(actions, vec![Action::FetchCollection { ticket: ticket.next() }]);
    }

    #[test]
    fn retry_without_failure_is_ignored() {
        let mut state = mounted();
        let (render, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn edit_marks_scroll_target() {
        let mut state = mounted();
        let id = RecordId::from("2");
        let (render, actions) = handle_event(&mut state, &Event::EditRecord(id.clone())).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::OpenEditor { id: id.clone() }]);
        assert_eq!(state.view_store().pending_target(), Some(id));
    }

    #[test]
    fn delete_round_trip() {
        let mut state = mounted();
        let id = RecordId::from("1");
        let (_, actions) = handle_event(&mut state, &Event::DeleteRequested(id.clone())).unwrap();
        assert_eq!(actions, vec![Action::DeleteRecord { id: id.clone() }]);
        assert_eq!(state.records.len(), 3);

        let (render, _) = handle_event(&mut state, &Event::RecordDeleted(id)).unwrap();
        assert!(render);
        assert_eq!(visible_ids(&state), ["2", "3"]);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut state = mounted();
        handle_event(&mut state, &Event::SearchChanged("acme".into())).unwrap();
        handle_event(&mut state, &Event::SetViewMode(ViewMode::List)).unwrap();

        handle_event(&mut state, &Event::ResetSession).unwrap();
        assert_eq!(state.search_text, "");
        assert_eq!(state.view_mode, ViewMode::Card);
        assert_eq!(visible_ids(&state), ["1", "2", "3"]);
    }
}
