//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single source of truth for the list
//! view: the fetched collection, the derived view, the user's search/filter
//! choices and the load progress. It also owns the [`ViewStateStore`] those
//! choices are persisted through.
//!
//! # State Components
//!
//! - **Records**: The collection as last fetched (or as left after deletes)
//! - **Filtered**: The derived view, recomputed by [`AppState::apply_filters`]
//! - **Search / Query / View Mode**: User choices, restored on mount
//! - **Load State**: Loading, ready, or failed with a message
//! - **Latest Ticket**: Orders concurrent fetches; stale results are dropped
//!
//! # Example
//!
//! ```rust
//! use jobtrail::app::AppState;
//! use jobtrail::storage::{MemorySession, ViewStateStore};
//!
//! let mut state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
//! state.restore_view_state();
//! state.apply_filters();
//! assert!(state.filtered.is_empty());
//! ```

use super::actions::FetchTicket;
use super::modes::{LoadState, ViewMode};
use crate::domain::{ApplicationRecord, FilterQuery};
use crate::filter::{self, ViewStats};
use crate::storage::{ViewState, ViewStatePatch, ViewStateStore};
use crate::ui::helpers::{match_ranges, title_case};
use crate::ui::viewmodel::{
    ChipInfo, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, ListBody,
    SearchBarInfo, UIViewModel,
};
use chrono::NaiveDate;

const LIST_DATE: &str = "%b %-d, %Y";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// The record collection in store order.
    pub records: Vec<ApplicationRecord>,

    /// Records passing the current search and filters.
    ///
    /// Recomputed by `apply_filters()` after every change to the collection,
    /// the search text or the query.
    pub filtered: Vec<ApplicationRecord>,

    /// Free-text search, matched case-insensitively.
    pub search_text: String,

    pub query: FilterQuery,

    pub view_mode: ViewMode,

    pub load_state: LoadState,

    latest_ticket: FetchTicket,

    view_store: ViewStateStore,
}

impl AppState {
    /// Creates an empty, loading state backed by `view_store`.
    ///
    /// Nothing is read from the store until [`restore_view_state`](Self::restore_view_state).
    #[must_use]
    pub fn new(view_store: ViewStateStore) -> Self {
        Self {
            records: vec![],
            filtered: vec![],
            search_text: String::new(),
            query: FilterQuery::default(),
            view_mode: ViewMode::default(),
            load_state: LoadState::Loading,
            latest_ticket: FetchTicket::default(),
            view_store,
        }
    }

    /// Reloads search, filters and view mode from the session.
    pub fn restore_view_state(&mut self) {
        let ViewState {
            search_text,
            view_mode,
            query,
            ..
        } = self.view_store.load();

        self.search_text = search_text;
        self.view_mode = view_mode;
        self.query = query;
    }

    /// Writes the changed fields back to the session.
    pub fn persist(&mut self, patch: &ViewStatePatch) {
        self.view_store.save(patch);
    }

    #[must_use]
    pub fn view_store(&self) -> &ViewStateStore {
        &self.view_store
    }

    pub fn view_store_mut(&mut self) -> &mut ViewStateStore {
        &mut self.view_store
    }

    /// Issues the ticket for a new fetch. Earlier tickets become stale.
    pub fn issue_ticket(&mut self) -> FetchTicket {
        self.latest_ticket = self.latest_ticket.next();
        self.latest_ticket
    }

    #[must_use]
    pub const fn latest_ticket(&self) -> FetchTicket {
        self.latest_ticket
    }

    /// Recomputes the derived view from the collection, query and search text.
    pub fn apply_filters(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filters",
            total = self.records.len(),
            search_len = self.search_text.len(),
            view_mode = %self.view_mode
        )
        .entered();

        self.filtered = filter::derive_view(&self.records, &self.query, &self.search_text);

        tracing::debug!(filtered_count = self.filtered.len(), "filters applied");
    }

    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> ViewStats {
        ViewStats::compute(&self.records, &self.filtered, today)
    }

    /// Computes a renderable view model of the current state.
    ///
    /// `today` anchors the "this month" count.
    #[must_use]
    pub fn compute_viewmodel(&self, today: NaiveDate) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: "Job Applications".to_string(),
                stats: self.stats(today),
            },
            search_bar: SearchBarInfo {
                query: self.search_text.clone(),
                placeholder: "Search applications...",
            },
            filter_bar: self.compute_filter_bar(),
            body: self.compute_body(),
            footer: Self::compute_footer(),
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let chips = filter::active_chips(&self.query)
            .into_iter()
            .map(|chip| {
                let label = match &chip {
                    filter::FilterChip::Status(status) => format!("Status: {status}"),
                    filter::FilterChip::Type(application_type) => {
                        format!("Application Type: {}", title_case(application_type))
                    }
                    other => other.label(),
                };
                ChipInfo { label, chip }
            })
            .collect();

        FilterBarInfo {
            view_mode: self.view_mode,
            available_types: filter::available_types(&self.records),
            summary: filter::filter_summary(&self.query),
            chips,
        }
    }

    fn compute_body(&self) -> ListBody {
        match &self.load_state {
            LoadState::Loading => return ListBody::Loading,
            LoadState::Failed { message } => {
                return ListBody::Failed {
                    message: message.clone(),
                }
            }
            LoadState::Ready => {}
        }

        if self.filtered.is_empty() {
            return ListBody::Empty(if self.records.is_empty() {
                EmptyState::no_records()
            } else {
                EmptyState::no_matches()
            });
        }

        ListBody::Records {
            view_mode: self.view_mode,
            items: self
                .filtered
                .iter()
                .map(|record| self.compute_display_item(record))
                .collect(),
        }
    }

    fn compute_display_item(&self, record: &ApplicationRecord) -> DisplayItem {
        DisplayItem {
            id: record.id.clone(),
            company_name: record.company_name.clone(),
            highlight_ranges: match_ranges(&record.company_name, &self.search_text),
            applied_on: record.applied_on.format(LIST_DATE).to_string(),
            status: record.status.label().to_string(),
            application_type: record.application_type.clone(),
            contact: record.contact.clone(),
            notes: record.notes.clone(),
        }
    }

    fn compute_footer() -> FooterInfo {
        FooterInfo {
            keybindings: "search <text>  status <s>  type <t>  from/to <date>  view card|list  edit <id>  delete <id>  quit"
                .to_string(),
        }
    }
}
