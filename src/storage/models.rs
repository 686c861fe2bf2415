//! View state models persisted in the session store.
//!
//! [`ViewState`] is the whole persisted value; [`ViewStatePatch`] carries only
//! the fields a single user action changed. Each field lives under its own
//! session key so one unreadable value never costs the others.

use crate::app::modes::ViewMode;
use crate::domain::{FilterQuery, RecordId};

/// Session key of the free-text search.
pub const SEARCH_KEY: &str = "list.search";

/// Session key of the view mode (`"card"` or `"list"`).
pub const VIEW_MODE_KEY: &str = "list.view_mode";

/// Session key of the JSON-encoded [`FilterQuery`].
pub const QUERY_KEY: &str = "list.filters";

/// Session key of the record to scroll back to after an edit.
pub const SCROLL_TARGET_KEY: &str = "list.scroll_target";

/// Everything the list view restores on mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub view_mode: ViewMode,
    pub query: FilterQuery,
    /// Record to bring back into view after returning from its edit flow.
    pub pending_scroll_target: Option<RecordId>,
}

/// Partial update merged into the persisted [`ViewState`].
///
/// `None` leaves a field untouched. For the scroll target, `Some(None)` clears
/// it.
///
/// # Examples
///
/// ```
/// use jobtrail::app::ViewMode;
/// use jobtrail::storage::ViewStatePatch;
///
/// let patch = ViewStatePatch::default().view_mode(ViewMode::List);
/// assert!(patch.search_text.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStatePatch {
    pub search_text: Option<String>,
    pub view_mode: Option<ViewMode>,
    pub query: Option<FilterQuery>,
    pub pending_scroll_target: Option<Option<RecordId>>,
}

impl ViewStatePatch {
    #[must_use]
    pub fn search_text(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = Some(search_text.into());
        self
    }

    #[must_use]
    pub fn view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = Some(view_mode);
        self
    }

    #[must_use]
    pub fn query(mut self, query: FilterQuery) -> Self {
        self.query = Some(query);
        self
    }

    #[must_use]
    pub fn pending_scroll_target(mut self, target: Option<RecordId>) -> Self {
        self.pending_scroll_target = Some(target);
        self
    }
}
