// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation timeline for canvas objects.
//!
//! This crate sequences property tweens against one virtual playhead:
//! - Position tokens (`>`, `<`, `<N`, `>N`, `+=N`, `-=N`, labels)
//! - Play, pause, reverse, seek and progress
//! - Repeat, repeat delay and yoyo cycles
//! - `to()` tweens interpolating named properties on shared targets
//!
//! ## Architecture
//!
//! The timeline is built on two host capabilities:
//! - [`Animatable`] targets it reads and writes properties on
//! - a [`FrameSource`] that delivers frames back through [`Timeline::on_frame`]
//!
//! Non-fatal problems go to a [`DiagnosticSink`] instead of being raised.

pub mod animation;
pub mod config;
pub mod diagnostics;
pub mod easing;
pub mod error;
pub mod frame;
pub mod position;
pub mod target;
pub mod timeline;
pub mod tween;
pub mod value;

pub use animation::{Animation, ChangeFn, PropertyTrack};
pub use config::{Callback, TimelineConfig, TimelineOptions, REPEAT_FOREVER};
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use easing::{Ease, EaseFn, Easing};
pub use error::TimelineError;
pub use frame::{FrameHandle, FrameSource, ManualFrameSource};
pub use position::Position;
pub use target::{shared, Animatable, SharedTarget};
pub use timeline::{Direction, PlayFrom, PlaybackState, Timeline};
pub use tween::TweenVars;
pub use value::{EndValue, PropertyValue};
