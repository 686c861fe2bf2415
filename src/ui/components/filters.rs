//! Filter bar component renderer.
//!
//! Shows the view mode toggle, the application types offered by the type
//! facet, the date summary and one removable chip per active filter.

use crate::app::modes::ViewMode;
use crate::ui::helpers::truncate;
use crate::ui::renderer::RenderedPage;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the filter bar.
///
/// # Layout
///
/// ```text
/// View: [card] list     Types: email, job portal
/// Filters: From Jan 1, 2024 • To Feb 1, 2024
/// (x) From Jan 1, 2024  (x) Status: Accepted  (x) Clear all
/// ```
///
/// The last two lines only appear while a filter is active.
pub fn render_filter_bar(page: &mut RenderedPage, bar: &FilterBarInfo, cols: usize) {
    let toggle = match bar.view_mode {
        ViewMode::Card => "[card] list",
        ViewMode::List => "card [list]",
    };

    let mut first = format!("View: {toggle}");
    if !bar.available_types.is_empty() {
        first.push_str(&format!("     Types: {}", bar.available_types.join(", ")));
    }
    page.push(truncate(&first, cols));

    let Some(summary) = &bar.summary else {
        page.blank();
        return;
    };

    if !summary.is_empty() {
        page.push(truncate(&format!("Filters: {summary}"), cols));
    }

    let chips: Vec<String> = bar
        .chips
        .iter()
        .map(|chip| format!("(x) {}", chip.label))
        .chain(std::iter::once("(x) Clear all".to_string()))
        .collect();

    let mut line = String::new();
    for chip in chips {
        let needed = if line.is_empty() { chip.len() } else { line.len() + 2 + chip.len() };
        if needed > cols && !line.is_empty() {
            page.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push_str("  ");
        }
        line.push_str(&chip);
    }
    page.push(line);
    page.blank();
}
