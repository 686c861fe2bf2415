//! Search bar component renderer.
//!
//! Renders the search input as a bordered box with the query (or its
//! placeholder while empty).

use crate::ui::helpers::truncate;
use crate::ui::renderer::RenderedPage;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on the left).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search box.
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────────────┐
/// [margin] │ Search: acme        │
/// [margin] └─────────────────────┘
/// ```
pub fn render_search_bar(page: &mut RenderedPage, search: &SearchBarInfo, cols: usize) {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    let shown = if search.query.is_empty() {
        search.placeholder
    } else {
        search.query.as_str()
    };
    let search_text = truncate(&format!(" Search: {shown}"), inner_width);
    let padding = inner_width.saturating_sub(search_text.chars().count());

    page.push(format!("{margin}┌{}┐", "─".repeat(inner_width)));
    page.push(format!("{margin}│{search_text}{}│", " ".repeat(padding)));
    page.push(format!("{margin}└{}┘", "─".repeat(inner_width)));
}
