//! Footer component renderer.

use crate::ui::components::render_border;
use crate::ui::helpers::{center, truncate};
use crate::ui::renderer::RenderedPage;
use crate::ui::viewmodel::FooterInfo;

/// Renders a border followed by the centered command help.
///
/// Help text wider than the terminal is truncated so it never wraps.
pub fn render_footer(page: &mut RenderedPage, footer: &FooterInfo, cols: usize) {
    render_border(page, cols);
    page.push(center(&truncate(&footer.keybindings, cols), cols));
}
