//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to component renderers, which append
//!    lines to a [`RenderedPage`]
//!
//! The page remembers the line each record starts on and implements
//! [`Viewport`], so the scroll anchor can locate records in it.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use jobtrail::app::AppState;
//! use jobtrail::storage::{MemorySession, ViewStateStore};
//! use jobtrail::ui::render;
//!
//! let state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
//! let page = render(&state, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 80);
//! assert!(page.to_text().contains("Loading applications"));
//! ```

use crate::app::AppState;
use crate::domain::RecordId;
use crate::scroll::Viewport;
use crate::ui::components;
use crate::ui::viewmodel::{ListBody, UIViewModel};
use chrono::NaiveDate;
use std::collections::HashMap;

/// A rendered page of plain-text lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    lines: Vec<String>,
    anchors: HashMap<RecordId, usize>,
    header_rows: usize,
    scroll_top: usize,
}

impl RenderedPage {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line index of the first line rendered for `id`.
    #[must_use]
    pub fn anchor(&self, id: &RecordId) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    /// Rows of the fixed header pinned above the scrolling content.
    #[must_use]
    pub const fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// First line shown below the pinned header.
    #[must_use]
    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// The `rows` lines a terminal of that height shows.
    ///
    /// The pinned header covers the top rows of the screen, so the line at
    /// `scroll_top` sits underneath it and the first body row shown is
    /// `scroll_top + header_rows`.
    #[must_use]
    pub fn visible(&self, rows: usize) -> Vec<&str> {
        let header = self.lines.iter().take(self.header_rows);
        let body = self
            .lines
            .iter()
            .skip(self.scroll_top + self.header_rows);

        header
            .chain(body)
            .take(rows)
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Anchors `id` at the next line to be pushed.
    pub(crate) fn mark(&mut self, id: &RecordId) {
        self.anchors.insert(id.clone(), self.lines.len());
    }

    /// Pins every line pushed so far as the fixed header.
    pub(crate) fn pin_header(&mut self) {
        self.header_rows = self.lines.len();
    }
}

impl Viewport for RenderedPage {
    fn element_top(&self, id: &RecordId) -> Option<f64> {
        self.anchor(id).map(|line| line as f64)
    }

    fn header_height(&self) -> f64 {
        self.header_rows as f64
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scroll_to(&mut self, top: f64) {
        let max_top = self.lines.len().saturating_sub(1);
        self.scroll_top = (top.max(0.0).round() as usize).min(max_top);
        tracing::trace!(scroll_top = self.scroll_top, "page scrolled");
    }
}

/// Renders the list page for `state`.
#[must_use]
pub fn render(state: &AppState, today: NaiveDate, cols: usize) -> RenderedPage {
    let viewmodel = state.compute_viewmodel(today);
    render_viewmodel(&viewmodel, cols)
}

/// Renders a view model with a layout chosen by what the list area holds.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, cols: usize) -> RenderedPage {
    let _span = tracing::debug_span!("render").entered();

    let mut page = RenderedPage::default();

    components::render_header(&mut page, &vm.header, cols);
    page.pin_header();

    match &vm.body {
        ListBody::Loading => components::render_loading(&mut page, cols),
        ListBody::Failed { message } => components::render_failed(&mut page, message, cols),
        body => {
            components::render_search_bar(&mut page, &vm.search_bar, cols);
            components::render_filter_bar(&mut page, &vm.filter_bar, cols);
            match body {
                ListBody::Empty(empty) => components::render_empty_state(&mut page, empty, cols),
                ListBody::Records { view_mode, items } => {
                    components::render_records(&mut page, *view_mode, items, cols);
                }
                ListBody::Loading | ListBody::Failed { .. } => {}
            }
        }
    }

    components::render_footer(&mut page, &vm.footer, cols);

    tracing::debug!(lines = page.lines.len(), anchors = page.anchors.len(), "page rendered");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event, LoadState, ViewMode};
    use crate::domain::ApplicationRecord;
    use crate::storage::{MemorySession, ViewStateStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
        state.records = (1..=5)
            .map(|n| {
                ApplicationRecord::new(n.to_string(), format!("Company {n}"), today())
                    .with_contact(format!("hr@company{n}.com"))
            })
            .collect();
        state.load_state = LoadState::Ready;
        state.apply_filters();
        state
    }

    #[test]
    fn every_record_is_anchored_in_order() {
        let page = render(&ready_state(), today(), 80);
        let tops: Vec<usize> = (1..=5)
            .map(|n| page.anchor(&RecordId::from(n.to_string().as_str())).unwrap())
            .collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        assert!(page.lines()[tops[0]].contains("Company 1"));
    }

    #[test]
    fn list_mode_uses_one_row_per_record() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::SetViewMode(ViewMode::List)).unwrap();
        let page = render(&state, today(), 80);

        let first = page.anchor(&RecordId::from("1")).unwrap();
        let second = page.anchor(&RecordId::from("2")).unwrap();
        assert_eq!(second, first + 1);
    }

    #[test]
    fn filtered_out_records_have_no_anchor() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::SearchChanged("company 3".into())).unwrap();
        let page = render(&state, today(), 80);

        assert!(page.anchor(&RecordId::from("3")).is_some());
        assert!(page.anchor(&RecordId::from("1")).is_none());
        assert!(page.to_text().contains("[Company 3]"));
    }

    #[test]
    fn failed_state_offers_retry() {
        let mut state = ready_state();
        state.load_state = LoadState::Failed {
            message: "Failed to load applications".into(),
        };
        let text = render(&state, today(), 80).to_text();
        assert!(text.contains("Failed to load applications"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn scroll_is_clamped_to_page() {
        let mut page = render(&ready_state(), today(), 80);
        page.scroll_to(-5.0);
        assert_eq!(page.scroll_top(), 0);
        page.scroll_to(10_000.0);
        assert_eq!(page.scroll_top(), page.lines().len() - 1);
    }

    #[test]
    fn visible_keeps_header_pinned() {
        let mut page = render(&ready_state(), today(), 80);
        let line = page.anchor(&RecordId::from("4")).unwrap();
        page.scroll_to((line - page.header_rows()) as f64);

        let visible = page.visible(page.header_rows() + 1);
        assert_eq!(visible.len(), page.header_rows() + 1);
        assert!(visible[page.header_rows()].contains("Company 4"));
    }
}
