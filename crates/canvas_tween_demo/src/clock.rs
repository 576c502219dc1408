// SPDX-License-Identifier: MIT OR Apache-2.0
//! Real-time frame source.

use canvas_tween_timeline::{FrameHandle, FrameSource};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct SystemFrames {
    origin: Instant,
    next_id: u64,
    pending: Option<FrameHandle>,
}

/// Frame source backed by the monotonic system clock.
///
/// The host loop calls [`SystemFrameSource::wait_frame`] to sleep until the
/// next frame is due and then delivers it to the timeline.
#[derive(Debug, Clone)]
pub struct SystemFrameSource {
    inner: Rc<RefCell<SystemFrames>>,
}

impl SystemFrameSource {
    /// Create a source whose clock starts now
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SystemFrames {
                origin: Instant::now(),
                next_id: 0,
                pending: None,
            })),
        }
    }

    /// Sleep for `interval` and hand out the pending frame.
    ///
    /// Returns `None` immediately when no frame is pending.
    pub fn wait_frame(&self, interval: Duration) -> Option<(FrameHandle, f64)> {
        if self.inner.borrow().pending.is_none() {
            return None;
        }
        std::thread::sleep(interval);
        let handle = self.inner.borrow_mut().pending.take()?;
        Some((handle, self.now()))
    }
}

impl Default for SystemFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SystemFrameSource {
    fn request_frame(&mut self) -> FrameHandle {
        let mut frames = self.inner.borrow_mut();
        frames.next_id += 1;
        let handle = FrameHandle(frames.next_id);
        frames.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut frames = self.inner.borrow_mut();
        if frames.pending == Some(handle) {
            frames.pending = None;
        }
    }

    fn now(&self) -> f64 {
        self.inner.borrow().origin.elapsed().as_secs_f64() * 1000.0
    }
}
