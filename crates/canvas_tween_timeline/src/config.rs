// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline construction options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat count meaning "repeat forever"
pub const REPEAT_FOREVER: i32 = -1;

/// Cycle configuration of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Extra cycles after the first one; [`REPEAT_FOREVER`] for unlimited
    pub repeat: i32,
    /// Pause between cycles, in seconds
    pub repeat_delay: f64,
    /// Alternate direction on every repeat
    pub yoyo: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            repeat: 0,
            repeat_delay: 0.0,
            yoyo: false,
        }
    }
}

impl TimelineConfig {
    /// Whether the timeline repeats without limit
    pub fn repeats_forever(&self) -> bool {
        self.repeat == REPEAT_FOREVER
    }
}

/// Lifecycle callback
pub type Callback = Box<dyn FnMut()>;

/// Configuration plus lifecycle callbacks
#[derive(Default)]
pub struct TimelineOptions {
    /// Cycle configuration
    pub config: TimelineConfig,
    /// Fired when forward playback exhausts its repeats
    pub on_complete: Option<Callback>,
    /// Fired after every frame and every seek
    pub on_update: Option<Callback>,
    /// Fired each time a cycle repeats
    pub on_repeat: Option<Callback>,
    /// Fired when backward playback exhausts its repeats
    pub on_reverse_complete: Option<Callback>,
}

impl TimelineOptions {
    /// Options with default configuration and no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the given configuration
    pub fn with_config(config: TimelineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the repeat count
    pub fn repeat(mut self, repeat: i32) -> Self {
        self.config.repeat = repeat;
        self
    }

    /// Set the delay between cycles, in seconds
    pub fn repeat_delay(mut self, seconds: f64) -> Self {
        self.config.repeat_delay = seconds;
        self
    }

    /// Enable or disable yoyo
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.config.yoyo = yoyo;
        self
    }

    /// Set the completion callback
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Set the per-update callback
    pub fn on_update(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Set the repeat callback
    pub fn on_repeat(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_repeat = Some(Box::new(f));
        self
    }

    /// Set the reverse completion callback
    pub fn on_reverse_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_reverse_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TimelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineOptions")
            .field("config", &self.config)
            .field("on_complete", &self.on_complete.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_repeat", &self.on_repeat.is_some())
            .field("on_reverse_complete", &self.on_reverse_complete.is_some())
            .finish()
    }
}
