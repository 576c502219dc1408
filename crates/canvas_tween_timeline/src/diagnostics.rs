// SPDX-License-Identifier: MIT OR Apache-2.0
//! Diagnostic channel for timelines.

use crate::error::TimelineError;
use std::cell::RefCell;
use std::rc::Rc;

/// Receives the non-fatal errors a timeline runs into
pub trait DiagnosticSink {
    /// Handle a diagnostic
    fn report(&self, error: &TimelineError);
}

/// Default sink: forwards everything to `tracing`.
///
/// Invalid progress values and unresolved labels are logged as warnings;
/// skipped properties only show up at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, error: &TimelineError) {
        if error.is_warning() {
            tracing::warn!("{error}");
        } else {
            tracing::trace!("{error}; property skipped");
        }
    }
}

/// Sink that keeps every diagnostic so the host can inspect them later
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    errors: Rc<RefCell<Vec<TimelineError>>>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics collected so far
    pub fn errors(&self) -> Vec<TimelineError> {
        self.errors.borrow().clone()
    }

    /// Remove and return the collected diagnostics
    pub fn take(&self) -> Vec<TimelineError> {
        std::mem::take(&mut *self.errors.borrow_mut())
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, error: &TimelineError) {
        self.errors.borrow_mut().push(error.clone());
    }
}
