//! View model types representing renderable list-view state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data such
//! as formatted dates, chip labels and search-match highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use jobtrail::ui::viewmodel::{EmptyState, ListBody};
//!
//! let body = ListBody::Empty(EmptyState::no_matches());
//! assert!(matches!(body, ListBody::Empty(_)));
//! ```

use crate::app::modes::ViewMode;
use crate::domain::RecordId;
use crate::filter::{FilterChip, ViewStats};

/// Complete view model of the list page.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub filter_bar: FilterBarInfo,
    pub body: ListBody,
    pub footer: FooterInfo,
}

/// Page title and summary counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub stats: ViewStats,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search text, shown verbatim.
    pub query: String,

    /// Shown instead of the query while it is empty.
    pub placeholder: &'static str,
}

/// Filter controls: view mode toggle, type facet and active chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub view_mode: ViewMode,

    /// Application types offered by the type facet, in first-seen order.
    pub available_types: Vec<String>,

    /// One-line date summary; `None` when no filter is active.
    pub summary: Option<String>,

    pub chips: Vec<ChipInfo>,
}

/// A removable chip for one active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInfo {
    pub label: String,
    pub chip: FilterChip,
}

/// What occupies the list area.
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody {
    /// The first fetch has not completed yet.
    Loading,

    /// The latest fetch failed; retryable.
    Failed { message: String },

    /// The derived view is empty.
    Empty(EmptyState),

    /// Records of the derived view, in collection order.
    Records {
        view_mode: ViewMode,
        items: Vec<DisplayItem>,
    },
}

/// Display information for a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Identity used to anchor the rendered element.
    pub id: RecordId,

    pub company_name: String,

    /// Character ranges of `company_name` matching the search text.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Applied date, already formatted.
    pub applied_on: String,

    pub status: String,
    pub application_type: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

/// Message shown when the derived view is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl EmptyState {
    /// The collection itself is empty.
    #[must_use]
    pub fn no_records() -> Self {
        Self {
            message: "No applications yet".to_string(),
            subtitle: "Start tracking your job applications by adding your first one!".to_string(),
        }
    }

    /// The collection has records but none pass the filters.
    #[must_use]
    pub fn no_matches() -> Self {
        Self {
            message: "No matching applications".to_string(),
            subtitle: "Try adjusting your search or filter criteria.".to_string(),
        }
    }
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text (e.g., "search <text>  view card|list  quit").
    pub keybindings: String,
}
