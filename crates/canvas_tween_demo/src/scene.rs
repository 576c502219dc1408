// SPDX-License-Identifier: MIT OR Apache-2.0
//! RON scene description: objects plus the timeline that animates them.

use crate::canvas::Canvas;
use crate::layout::LayoutProps;
use canvas_tween_timeline::{
    EndValue, Easing, FrameSource, PropertyValue, Timeline, TimelineConfig, TimelineOptions,
    TweenVars,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scene shipped with the demo
pub const DEFAULT_SCENE: &str = include_str!("../assets/demo_scene.ron");

/// Class added to every object targeted by a tween step
pub const ANIMATED_CLASS: &str = "animated";

/// Error loading or building a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene is not valid RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A tween refers to an object that is not declared
    #[error("Unknown object: {0}")]
    UnknownObject(String),
}

/// A canvas object declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectConfig {
    /// Object id, referenced by tweens
    pub id: String,
    /// Initial visual properties
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
    /// Layout fields
    #[serde(default)]
    pub layout: LayoutProps,
}

/// A tween declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweenConfig {
    /// Id of the object to animate
    pub target: String,
    /// End values by property name
    pub properties: IndexMap<String, EndValue>,
    /// Duration in seconds
    pub duration: f64,
    /// Position token; sequential when absent
    #[serde(default)]
    pub position: Option<String>,
    /// Easing; the standard ease when absent
    #[serde(default)]
    pub easing: Option<Easing>,
}

/// One scheduling step, applied in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Step {
    /// Add a tween
    Tween(TweenConfig),
    /// Add a label, at `at` seconds or at the current end
    Label {
        /// Label name
        name: String,
        /// Time in seconds
        #[serde(default)]
        at: Option<f64>,
    },
}

/// Complete scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Cycle configuration
    #[serde(default)]
    pub timeline: TimelineConfig,
    /// Objects on the canvas
    pub objects: Vec<ObjectConfig>,
    /// Scheduling steps
    pub steps: Vec<Step>,
}

impl SceneConfig {
    /// Parse a scene from RON text
    pub fn from_ron(text: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a scene from a RON file
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Create the canvas and schedule every step on a new timeline
    pub fn build(
        &self,
        options: TimelineOptions,
        frames: impl FrameSource + 'static,
    ) -> Result<(Canvas, Timeline), SceneError> {
        let mut canvas = Canvas::new();
        for object in &self.objects {
            canvas.add(&object.id, object.properties.clone(), object.layout.clone());
        }

        let options = TimelineOptions {
            config: self.timeline,
            ..options
        };
        let mut timeline = Timeline::new(options, frames);

        for step in &self.steps {
            match step {
                Step::Tween(tween) => {
                    let target = canvas
                        .get(&tween.target)
                        .ok_or_else(|| SceneError::UnknownObject(tween.target.clone()))?;
                    target.borrow_mut().layout.add_class(ANIMATED_CLASS);
                    let vars: TweenVars = tween
                        .properties
                        .iter()
                        .map(|(name, end)| (name.as_str(), end.clone()))
                        .collect();
                    timeline.to_eased(
                        target,
                        vars,
                        tween.duration,
                        tween.position.as_deref(),
                        tween.easing.unwrap_or_default(),
                    );
                }
                Step::Label { name, at } => {
                    timeline.add_label(name.as_str(), *at);
                }
            }
        }

        tracing::info!(
            "scene built: {} objects, {} entries, {} ms",
            self.objects.len(),
            timeline.entry_count(),
            timeline.duration()
        );
        Ok((canvas, timeline))
    }
}
