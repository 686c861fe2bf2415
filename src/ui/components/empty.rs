//! Empty, loading and error state renderers.
//!
//! These replace the record list when there is nothing to show.

use crate::ui::helpers::center;
use crate::ui::renderer::RenderedPage;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message.
///
/// Displays a centered two-line message when the derived view is empty: either
/// the collection has no records yet or none pass the filters.
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE
/// [left padding] subtitle
/// [blank line]
/// ```
pub fn render_empty_state(page: &mut RenderedPage, empty: &EmptyState, cols: usize) {
    page.blank();
    page.push(center(&empty.message, cols));
    page.push(center(&empty.subtitle, cols));
    page.blank();
}

/// Shown until the first fetch completes.
pub fn render_loading(page: &mut RenderedPage, cols: usize) {
    page.blank();
    page.push(center("Loading applications...", cols));
    page.blank();
}

/// Shown when the latest fetch failed, with the way to retry.
pub fn render_failed(page: &mut RenderedPage, message: &str, cols: usize) {
    page.blank();
    page.push(center(message, cols));
    page.push(center("Type `retry` to try again", cols));
    page.blank();
}
