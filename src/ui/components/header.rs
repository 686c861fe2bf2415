//! Header component renderer.
//!
//! Renders the pinned page header: the centered title, the summary counts and
//! a border closing it off.

use crate::ui::components::render_border;
use crate::ui::helpers::center;
use crate::ui::renderer::RenderedPage;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header.
///
/// # Layout
///
/// ```text
///                 Job Applications
/// Total Applications: 12   This Month: 3   Filtered Results: 5
/// ────────────────────────────────────────────────────────────
/// ```
pub fn render_header(page: &mut RenderedPage, header: &HeaderInfo, cols: usize) {
    page.push(center(&header.title, cols));

    let stats = &header.stats;
    page.push(format!(
        "Total Applications: {}   This Month: {}   Filtered Results: {}",
        stats.total, stats.this_month, stats.filtered
    ));

    render_border(page, cols);
}
