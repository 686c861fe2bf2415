//! Session-scoped persistence of the list view's state.
//!
//! [`ViewStateStore`] restores the search text, filter query, view mode and
//! pending scroll target on mount, and merges every later change back into the
//! session. It never fails towards its caller: unreadable values fall back to
//! their defaults and rejected writes are logged and dropped, so the list view
//! keeps working with persistence switched off.

use super::backend::SessionBackend;
use super::models::{ViewState, ViewStatePatch, QUERY_KEY, SCROLL_TARGET_KEY, SEARCH_KEY, VIEW_MODE_KEY};
use crate::app::modes::ViewMode;
use crate::domain::{FilterQuery, RecordId};

/// Load/save facade over a [`SessionBackend`].
///
/// # Examples
///
/// ```
/// use jobtrail::app::ViewMode;
/// use jobtrail::storage::{MemorySession, ViewStatePatch, ViewStateStore};
///
/// let mut store = ViewStateStore::new(Box::new(MemorySession::default()));
/// store.save(&ViewStatePatch::default().search_text("acme"));
/// store.save(&ViewStatePatch::default().view_mode(ViewMode::List));
///
/// let state = store.load();
/// assert_eq!(state.view_mode, ViewMode::List);
/// assert_eq!(state.search_text, "acme");
/// ```
pub struct ViewStateStore {
    backend: Box<dyn SessionBackend>,
}

impl ViewStateStore {
    /// Wraps `backend`. Nothing is read until [`load`](Self::load).
    ///
    /// # Parameters
    ///
    /// * `backend` - Session storage; see [`SessionBackend`] for the implementations
    #[must_use]
    pub fn new(backend: Box<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Restores the persisted state, field by field.
    ///
    /// # Returns
    ///
    /// The stored [`ViewState`]. Missing, unreadable or corrupt fields take
    /// their default value; a corrupt field is logged at `warn` and leaves the
    /// other fields alone.
    ///
    /// # Tracing
    ///
    /// Runs in a `view_state_load` span and logs a summary of what was restored.
    #[must_use]
    pub fn load(&self) -> ViewState {
        let _span = tracing::debug_span!("view_state_load").entered();

        let search_text = self.read(SEARCH_KEY).unwrap_or_default();

        let view_mode = self
            .read(VIEW_MODE_KEY)
            .and_then(|raw| {
                raw.parse::<ViewMode>()
                    .map_err(|e| tracing::warn!(error = %e, "discarding stored view mode"))
                    .ok()
            })
            .unwrap_or_default();

        let query = self
            .read(QUERY_KEY)
            .and_then(|raw| {
                serde_json::from_str::<FilterQuery>(&raw)
                    .map_err(|e| tracing::warn!(error = %e, "discarding stored filters"))
                    .ok()
            })
            .unwrap_or_default();

        let pending_scroll_target = self
            .read(SCROLL_TARGET_KEY)
            .filter(|raw| !raw.is_empty())
            .map(RecordId::from);

        let state = ViewState {
            search_text,
            view_mode,
            query,
            pending_scroll_target,
        };

        tracing::debug!(
            search_len = state.search_text.len(),
            view_mode = %state.view_mode,
            filters_active = !state.query.is_empty(),
            has_scroll_target = state.pending_scroll_target.is_some(),
            "view state restored"
        );

        state
    }

    /// Merges `patch` into the persisted state.
    ///
    /// Each present field is written independently; a rejected write is logged
    /// and the remaining fields are still attempted. Fields absent from the
    /// patch keep whatever an earlier save stored.
    ///
    /// # Parameters
    ///
    /// * `patch` - The fields one user action changed
    pub fn save(&mut self, patch: &ViewStatePatch) {
        let _span = tracing::debug_span!("view_state_save").entered();

        if let Some(search_text) = &patch.search_text {
            self.write(SEARCH_KEY, search_text);
        }

        if let Some(view_mode) = patch.view_mode {
            self.write(VIEW_MODE_KEY, view_mode.as_str());
        }

        if let Some(query) = &patch.query {
            match serde_json::to_string(query) {
                Ok(json) => self.write(QUERY_KEY, &json),
                Err(e) => tracing::warn!(error = %e, "failed to encode filters"),
            }
        }

        match &patch.pending_scroll_target {
            Some(Some(target)) => self.write(SCROLL_TARGET_KEY, target.as_str()),
            Some(None) => self.erase(SCROLL_TARGET_KEY),
            None => {}
        }
    }

    /// The record waiting to be scrolled back into view, if any.
    #[must_use]
    pub fn pending_target(&self) -> Option<RecordId> {
        self.read(SCROLL_TARGET_KEY)
            .filter(|raw| !raw.is_empty())
            .map(RecordId::from)
    }

    /// Stores the scroll marker. Written through
    /// [`scroll::mark_pending_target`](crate::scroll::mark_pending_target).
    pub(crate) fn set_pending_target(&mut self, target: &RecordId) {
        self.write(SCROLL_TARGET_KEY, target.as_str());
    }

    /// Drops the scroll marker once a restoration attempt has finished.
    pub fn clear_pending_target(&mut self) {
        self.erase(SCROLL_TARGET_KEY);
    }

    /// Forgets everything stored for this session.
    ///
    /// The session itself goes on; later saves are stored as usual.
    pub fn reset(&mut self) {
        if let Err(e) = self.backend.clear() {
            tracing::debug!(error = %e, "session clear failed");
        }
    }

    /// Ends the session: nothing stored so far is visible to a later run.
    ///
    /// Called by the host when it shuts down. Failures are logged and
    /// swallowed like every other storage failure.
    pub fn end_session(&mut self) {
        let _span = tracing::debug_span!("view_state_end_session").entered();
        if let Err(e) = self.backend.end_session() {
            tracing::warn!(error = %e, "failed to end session");
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.backend
            .get(key)
            .map_err(|e| tracing::debug!(key = %key, error = %e, "session read failed"))
            .ok()
            .flatten()
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            tracing::debug!(key = %key, error = %e, "session write failed");
        }
    }

    fn erase(&mut self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::debug!(key = %key, error = %e, "session remove failed");
        }
    }
}

impl std::fmt::Debug for ViewStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplicationStatus;
    use crate::storage::{MemorySession, UnavailableSession};
    use chrono::NaiveDate;

    fn memory_store() -> ViewStateStore {
        ViewStateStore::new(Box::new(MemorySession::default()))
    }

    fn sample_query() -> FilterQuery {
        let mut query = FilterQuery::default();
        query.date_range.start = NaiveDate::from_ymd_opt(2024, 1, 1);
        query.toggle_status(ApplicationStatus::Accepted);
        query.toggle_type("email");
        query
    }

    #[test]
    fn fresh_session_loads_defaults() {
        let state = memory_store().load();
        assert_eq!(state, ViewState::default());
        assert_eq!(state.view_mode, ViewMode::Card);
    }

    #[test]
    fn save_merges_into_previous_fields() {
        let mut store = memory_store();
        store.save(
            &ViewStatePatch::default()
                .search_text("acme")
                .query(sample_query()),
        );
        store.save(&ViewStatePatch::default().view_mode(ViewMode::List));

        let state = store.load();
        assert_eq!(state.view_mode, ViewMode::List);
        assert_eq!(state.search_text, "acme");
        assert_eq!(state.query, sample_query());
        assert_eq!(state.pending_scroll_target, None);
    }

    #[test]
    fn saving_the_same_patch_twice_is_idempotent() {
        let mut store = memory_store();
        let patch = ViewStatePatch::default().search_text("x").view_mode(ViewMode::List);
        store.save(&patch);
        let once = store.load();
        store.save(&patch);
        assert_eq!(store.load(), once);
    }

    #[test]
    fn corrupt_field_only_resets_itself() {
        let mut backend = MemorySession::default();
        backend.set(SEARCH_KEY, "globex").unwrap();
        backend.set(VIEW_MODE_KEY, "grid").unwrap();
        backend.set(QUERY_KEY, "{\"startDate\": 42").unwrap();

        let state = ViewStateStore::new(Box::new(backend)).load();
        assert_eq!(state.search_text, "globex");
        assert_eq!(state.view_mode, ViewMode::Card);
        assert!(state.query.is_empty());
    }

    #[test]
    fn unavailable_storage_degrades_to_defaults() {
        let mut store = ViewStateStore::new(Box::new(UnavailableSession));
        store.save(&ViewStatePatch::default().view_mode(ViewMode::List));
        store.set_pending_target(&RecordId::from("7"));
        assert_eq!(store.load(), ViewState::default());
        assert_eq!(store.pending_target(), None);
    }

    #[test]
    fn quota_rejection_keeps_earlier_values() {
        let mut store = ViewStateStore::new(Box::new(MemorySession::with_quota(40)));
        store.save(&ViewStatePatch::default().search_text("acme"));
        store.save(&ViewStatePatch::default().search_text("a".repeat(100)));
        assert_eq!(store.load().search_text, "acme");
    }

    #[test]
    fn pending_target_set_and_clear() {
        let mut store = memory_store();
        store.set_pending_target(&RecordId::from("7"));
        assert_eq!(store.pending_target(), Some(RecordId::from("7")));
        assert_eq!(store.load().pending_scroll_target, Some(RecordId::from("7")));

        store.save(&ViewStatePatch::default().pending_scroll_target(None));
        assert_eq!(store.pending_target(), None);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut store = memory_store();
        store.save(
            &ViewStatePatch::default()
                .search_text("acme")
                .view_mode(ViewMode::List)
                .query(sample_query())
                .pending_scroll_target(Some(RecordId::from("3"))),
        );
        store.reset();
        assert_eq!(store.load(), ViewState::default());
    }
}
