//! Restoring the list's scroll position after an edit round trip.
//!
//! # Modules
//!
//! - `anchor`: [`ScrollAnchor`] state machine and [`RestoreOutcome`]
//! - `frame`: [`FrameScheduler`] seam and the deterministic [`FrameQueue`]
//! - `viewport`: [`Viewport`] seam over the rendered page

pub mod anchor;
pub mod frame;
pub mod viewport;

pub use anchor::{mark_pending_target, RestoreOutcome, ScrollAnchor, DEFAULT_HEADER_GAP, DEFAULT_RETRY_BUDGET};
pub use frame::{FrameHandle, FrameQueue, FrameScheduler};
pub use viewport::Viewport;
