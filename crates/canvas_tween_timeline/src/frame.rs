// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame scheduling capability.
//!
//! A [`crate::Timeline`] never calls itself back. It asks its [`FrameSource`]
//! for a frame, and the host later delivers that frame with
//! [`crate::Timeline::on_frame`]. This keeps the loop explicit
//! (schedule, tick, reschedule) and lets tests drive it with synthetic time.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle of a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host facility that delivers per-frame callbacks
pub trait FrameSource {
    /// Request one frame. The host answers by calling `on_frame` with the handle.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Cancelling an unknown or already delivered handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Monotonic clock in milliseconds, on the same scale as frame timestamps
    fn now(&self) -> f64;
}

#[derive(Debug, Default)]
struct ManualFrames {
    now: f64,
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

/// Frame source driven by explicit clock advances.
///
/// Clones share the same clock and request queue, so the host keeps one clone
/// and hands another to the timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameSource {
    inner: Rc<RefCell<ManualFrames>>,
}

impl ManualFrameSource {
    /// Create a source whose clock starts at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `dt_ms` and hand out the pending frame, if any
    pub fn advance(&self, dt_ms: f64) -> Option<(FrameHandle, f64)> {
        let mut frames = self.inner.borrow_mut();
        frames.now += dt_ms;
        let now = frames.now;
        frames.pending.take().map(|handle| (handle, now))
    }

    /// Whether a frame has been requested and not yet delivered or cancelled
    pub fn has_pending(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    /// Number of frames requested so far
    pub fn requested(&self) -> usize {
        self.inner.borrow().requested
    }

    /// Number of effective cancellations so far
    pub fn cancelled(&self) -> usize {
        self.inner.borrow().cancelled
    }
}

impl FrameSource for ManualFrameSource {
    fn request_frame(&mut self) -> FrameHandle {
        let mut frames = self.inner.borrow_mut();
        frames.next_id += 1;
        frames.requested += 1;
        let handle = FrameHandle(frames.next_id);
        frames.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut frames = self.inner.borrow_mut();
        if frames.pending == Some(handle) {
            frames.pending = None;
            frames.cancelled += 1;
        }
    }

    fn now(&self) -> f64 {
        self.inner.borrow().now
    }
}
