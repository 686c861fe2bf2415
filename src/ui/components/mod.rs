//! Composable UI component renderers.
//!
//! Each component appends its lines to a [`RenderedPage`] in layout order.
//!
//! # Components
//!
//! - `header`: Title and summary counts (pinned)
//! - `search`: Search input box
//! - `filters`: View toggle, type facet, date summary and chips
//! - `table`: The records, as cards or as table rows
//! - `empty`: Empty, loading and error states
//! - `footer`: Command help
//!
//! # Layout
//!
//! ```text
//! [Header]            ← pinned
//! [Border]            ← pinned
//! [Search Bar - 3 lines]
//! [Filter Bar]
//! [Records | Empty State]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod filters;
mod footer;
mod header;
mod search;
mod table;

pub use empty::{render_empty_state, render_failed, render_loading};
pub use filters::render_filter_bar;
pub use footer::render_footer;
pub use header::render_header;
pub use search::render_search_bar;
pub use table::render_records;

use crate::ui::renderer::RenderedPage;

/// Appends a horizontal border spanning `cols` columns.
///
/// Used to separate UI sections (header/body, body/footer).
fn render_border(page: &mut RenderedPage, cols: usize) {
    page.push("─".repeat(cols));
}
