//! Frame scheduling for deferred scroll checks.
//!
//! A host UI toolkit implements [`FrameScheduler`] on top of its own
//! "call me before the next paint" primitive. [`FrameQueue`] is the
//! deterministic implementation used by the terminal shell and by tests: frames
//! become due only when the driver takes them.

use std::collections::BTreeSet;

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Requests and cancels callbacks before the next repaint.
pub trait FrameScheduler {
    /// Requests one callback.
    ///
    /// # Returns
    ///
    /// A handle unique for the lifetime of the scheduler, to cancel the
    /// request or recognise it when it fires.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a requested frame. Cancelling an already fired or unknown
    /// handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Frame scheduler driven explicitly by its owner.
///
/// # Examples
///
/// ```
/// use jobtrail::scroll::{FrameQueue, FrameScheduler};
///
/// let mut frames = FrameQueue::default();
/// let first = frames.request_frame();
/// let second = frames.request_frame();
/// frames.cancel_frame(first);
///
/// assert_eq!(frames.take_due(), vec![second]);
/// assert!(frames.is_idle());
/// ```
#[derive(Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: BTreeSet<FrameHandle>,
    cancelled: usize,
}

impl FrameQueue {
    /// Removes and returns every outstanding frame in request order.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Nothing is waiting to fire.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames cancelled before they fired.
    #[must_use]
    pub const fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.remove(&handle) {
            self.cancelled += 1;
        }
    }
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle);
    }
}
