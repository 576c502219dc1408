// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation entries: the unit of work a timeline schedules.

use crate::config::Callback;
use crate::value::PropertyValue;
use std::fmt;

/// Progress callback, called with the elapsed time inside the entry (ms)
pub type ChangeFn = Box<dyn FnMut(f64)>;

/// Convert a duration in seconds to milliseconds, flooring at zero
pub(crate) fn secs_to_ms(secs: f64) -> f64 {
    (secs * 1000.0).max(0.0)
}

/// One property interpolated by a tween
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTrack {
    /// Property name on the target
    pub property: String,
    /// Value read from the target when the tween was built
    pub start: PropertyValue,
    /// Resolved end value
    pub end: PropertyValue,
}

/// A schedulable animation.
///
/// The timeline treats `on_change` as opaque: it only decides *when* to call
/// it and with which elapsed time.
pub struct Animation {
    duration_ms: f64,
    on_change: ChangeFn,
    on_complete: Option<Callback>,
    tracks: Vec<PropertyTrack>,
}

impl Animation {
    /// Create an animation lasting `duration_secs` seconds
    pub fn new(duration_secs: f64, on_change: impl FnMut(f64) + 'static) -> Self {
        Self {
            duration_ms: secs_to_ms(duration_secs),
            on_change: Box::new(on_change),
            on_complete: None,
            tracks: Vec::new(),
        }
    }

    /// Set a callback fired when playback runs through the end of this animation
    pub fn with_on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub(crate) fn with_tracks(mut self, tracks: Vec<PropertyTrack>) -> Self {
        self.tracks = tracks;
        self
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Interpolated properties (empty unless built by [`crate::Timeline::to`])
    pub fn tracks(&self) -> &[PropertyTrack] {
        &self.tracks
    }

    pub(crate) fn change(&mut self, elapsed_ms: f64) {
        (self.on_change)(elapsed_ms);
    }

    pub(crate) fn complete(&mut self) {
        if let Some(on_complete) = self.on_complete.as_mut() {
            on_complete();
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("duration_ms", &self.duration_ms)
            .field("tracks", &self.tracks)
            .field("on_complete", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}
