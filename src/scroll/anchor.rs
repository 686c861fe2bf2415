//! Scroll restoration by record identity.
//!
//! When the user opens a record's edit flow the list view is torn down. On the
//! way back the collection is fetched again and the record's element may only
//! appear a few frames after the first render. [`ScrollAnchor`] polls for it,
//! once per frame, up to a fixed budget, then gives up silently.
//!
//! ```text
//!            attempt_restore (target stored)
//!   Idle ───────────────────────────────────▶ Pending { target, attempts, frame }
//!    ▲                                           │
//!    │  found: scroll, clear marker              │ not found, attempts < budget:
//!    ├───────────────────────────────────────────┤   request another frame
//!    │  exhausted: clear marker                  │
//!    └───────────────────────────────────────────┘
//! ```

use super::frame::{FrameHandle, FrameScheduler};
use super::viewport::Viewport;
use crate::domain::RecordId;
use crate::storage::ViewStateStore;

/// Number of checks made before a pending target is abandoned.
///
/// The first check runs synchronously in [`ScrollAnchor::attempt_restore`], so
/// a budget of `N` waits on at most `N - 1` frames.
pub const DEFAULT_RETRY_BUDGET: u32 = 20;

/// Space left between the fixed header and the restored element.
pub const DEFAULT_HEADER_GAP: f64 = 12.0;

/// Result of a single restoration check.
///
/// Only `Retrying` leaves work behind (one requested frame); every other
/// outcome leaves the anchor idle with nothing scheduled.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// No target was pending.
    Idle,
    /// The element was found and scrolled to.
    Restored { target: RecordId, top: f64 },
    /// The element is not rendered yet; another frame was requested.
    Retrying { target: RecordId, attempt: u32 },
    /// The budget ran out; the marker was cleared without scrolling.
    Abandoned { target: RecordId, attempts: u32 },
}

#[derive(Debug, Clone, PartialEq)]
enum AnchorState {
    Idle,
    Pending {
        target: RecordId,
        attempts: u32,
        frame: Option<FrameHandle>,
    },
}

/// Brings a previously edited record back into view.
///
/// The pending target itself lives in the [`ViewStateStore`] so it survives the
/// list view being unmounted; the anchor only owns the in-flight polling loop.
///
/// # Examples
///
/// ```
/// use jobtrail::domain::RecordId;
/// use jobtrail::scroll::{mark_pending_target, FrameQueue, RestoreOutcome, ScrollAnchor, Viewport};
/// use jobtrail::storage::{MemorySession, ViewStateStore};
///
/// struct Page { scrolled: Option<f64> }
///
/// impl Viewport for Page {
///     fn element_top(&self, id: &RecordId) -> Option<f64> {
///         (id.as_str() == "7").then_some(500.0)
///     }
///     fn header_height(&self) -> f64 { 64.0 }
///     fn scroll_to(&mut self, top: f64) { self.scrolled = Some(top); }
/// }
///
/// let mut store = ViewStateStore::new(Box::new(MemorySession::default()));
/// let mut anchor = ScrollAnchor::new(FrameQueue::default());
/// mark_pending_target(&mut store, &RecordId::from("7"));
///
/// let mut page = Page { scrolled: None };
/// let outcome = anchor.attempt_restore(&mut store, &mut page);
///
/// assert!(matches!(outcome, RestoreOutcome::Restored { .. }));
/// assert_eq!(page.scrolled, Some(500.0 - 76.0));
/// assert_eq!(store.pending_target(), None);
/// ```
#[derive(Debug)]
pub struct ScrollAnchor<S: FrameScheduler> {
    scheduler: S,
    state: AnchorState,
    retry_budget: u32,
    header_gap: f64,
}

/// Remembers `id` as the record to scroll back to on the next mount.
///
/// This is the only writer of the marker. It goes to the [`ViewStateStore`]
/// rather than to an anchor, because the anchor polling for it belongs to the
/// next mount of the list.
///
/// # Parameters
///
/// * `store` - Session store the marker is written to
/// * `id` - Record the user is about to edit
pub fn mark_pending_target(store: &mut ViewStateStore, id: &RecordId) {
    tracing::debug!(target_id = %id, "marking scroll target");
    store.set_pending_target(id);
}

impl<S: FrameScheduler> ScrollAnchor<S> {
    /// Creates an idle anchor with the default budget and header gap.
    ///
    /// # Parameters
    ///
    /// * `scheduler` - Source of "before next paint" callbacks for retries
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: AnchorState::Idle,
            retry_budget: DEFAULT_RETRY_BUDGET,
            header_gap: DEFAULT_HEADER_GAP,
        }
    }

    /// Sets the total number of checks, the synchronous one included.
    #[must_use]
    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Sets the space kept between the fixed header and the restored element.
    ///
    /// The scroll offset is clamped at zero, so a negative gap can at most
    /// cancel out the header height.
    #[must_use]
    pub fn with_header_gap(mut self, header_gap: f64) -> Self {
        self.header_gap = header_gap;
        self
    }

    #[must_use]
    pub const fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    /// `true` while a frame is outstanding for a stored target.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, AnchorState::Pending { .. })
    }

    /// The frame the anchor is waiting on, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match &self.state {
            AnchorState::Pending { frame, .. } => *frame,
            AnchorState::Idle => None,
        }
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Checks for the stored target right after a render.
    ///
    /// A render restarts the loop: any outstanding frame is cancelled and the
    /// attempt count starts over.
    ///
    /// # Returns
    ///
    /// - `Idle` if no target is stored (nothing is scrolled or scheduled)
    /// - `Restored` if the element is on the page
    /// - `Retrying` if a frame was requested for another check
    /// - `Abandoned` if the budget allows no further check
    pub fn attempt_restore(
        &mut self,
        store: &mut ViewStateStore,
        viewport: &mut dyn Viewport,
    ) -> RestoreOutcome {
        let _span = tracing::debug_span!("scroll_attempt_restore").entered();

        self.cancel_outstanding_frame();

        let Some(target) = store.pending_target() else {
            self.state = AnchorState::Idle;
            return RestoreOutcome::Idle;
        };

        self.state = AnchorState::Pending {
            target,
            attempts: 0,
            frame: None,
        };
        self.check(store, viewport)
    }

    /// Runs the check scheduled for `handle`.
    ///
    /// # Returns
    ///
    /// - `None` for frames the anchor no longer waits on (cancelled or stale)
    /// - `Some(Idle)` if the stored marker was withdrawn meanwhile
    /// - otherwise the outcome of the check, as for [`attempt_restore`](Self::attempt_restore)
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        store: &mut ViewStateStore,
        viewport: &mut dyn Viewport,
    ) -> Option<RestoreOutcome> {
        let target = match &mut self.state {
            AnchorState::Pending { target, frame, .. } if *frame == Some(handle) => {
                *frame = None;
                target.clone()
            }
            _ => {
                tracing::trace!(frame = handle.0, "ignoring stale frame");
                return None;
            }
        };

        // The marker may have been cleared behind our back (session reset).
        if store.pending_target().as_ref() != Some(&target) {
            tracing::debug!(target_id = %target, "scroll target withdrawn");
            self.state = AnchorState::Idle;
            return Some(RestoreOutcome::Idle);
        }

        Some(self.check(store, viewport))
    }

    /// Stops polling. The stored marker is kept for the next mount.
    pub fn cancel(&mut self) {
        self.cancel_outstanding_frame();
        self.state = AnchorState::Idle;
    }

    fn check(&mut self, store: &mut ViewStateStore, viewport: &mut dyn Viewport) -> RestoreOutcome {
        let AnchorState::Pending {
            target, attempts, ..
        } = &mut self.state
        else {
            return RestoreOutcome::Idle;
        };

        *attempts += 1;
        let attempt = *attempts;
        let target = target.clone();

        if let Some(element_top) = viewport.element_top(&target) {
            let offset = (viewport.header_height() + self.header_gap).max(0.0);
            let top = element_top - offset;
            viewport.scroll_to(top);
            store.clear_pending_target();
            self.state = AnchorState::Idle;

            tracing::debug!(target_id = %target, attempt, top, "scroll restored");
            return RestoreOutcome::Restored { target, top };
        }

        if attempt < self.retry_budget {
            let handle = self.scheduler.request_frame();
            self.state = AnchorState::Pending {
                target: target.clone(),
                attempts: attempt,
                frame: Some(handle),
            };
            tracing::trace!(target_id = %target, attempt, frame = handle.0, "scroll target not rendered yet");
            return RestoreOutcome::Retrying { target, attempt };
        }

        store.clear_pending_target();
        self.state = AnchorState::Idle;
        tracing::debug!(target_id = %target, attempts = attempt, "scroll target abandoned");
        RestoreOutcome::Abandoned {
            target,
            attempts: attempt,
        }
    }

    fn cancel_outstanding_frame(&mut self) {
        if let AnchorState::Pending { frame, .. } = &mut self.state {
            if let Some(handle) = frame.take() {
                tracing::trace!(frame = handle.0, "cancelling scroll frame");
                self.scheduler.cancel_frame(handle);
            }
        }
    }
}

impl<S: FrameScheduler> Drop for ScrollAnchor<S> {
    fn drop(&mut self) {
        self.cancel_outstanding_frame();
    }
}
