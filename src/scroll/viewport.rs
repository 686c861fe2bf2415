//! The rendered surface the scroll anchor looks records up in.

use crate::domain::RecordId;

/// A scrollable page whose rendered records can be located by identity.
///
/// Positions are in whatever unit the surface uses (pixels, terminal rows),
/// measured from the top of the page.
pub trait Viewport {
    /// Top of the element rendered for `id`, or `None` while it is not rendered.
    fn element_top(&self, id: &RecordId) -> Option<f64>;

    /// Height of the fixed header overlapping the top of the viewport.
    fn header_height(&self) -> f64 {
        0.0
    }

    /// Jumps, without animation, so that `top` becomes the first visible
    /// position.
    ///
    /// Implementations clamp `top` to the scrollable range.
    fn scroll_to(&mut self, top: f64);
}
