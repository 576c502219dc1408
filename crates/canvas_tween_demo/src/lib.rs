// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless demo for the canvas tween timeline.
//!
//! - Canvas objects with composable layout props
//! - RON scene files describing objects and tween steps
//! - Real-time and simulated frame sources

pub mod canvas;
pub mod clock;
pub mod layout;
pub mod scene;

pub use canvas::{Canvas, CanvasObject, HIDDEN_CLASS};
pub use clock::SystemFrameSource;
pub use layout::LayoutProps;
pub use scene::{SceneConfig, SceneError, ANIMATED_CLASS, DEFAULT_SCENE};
