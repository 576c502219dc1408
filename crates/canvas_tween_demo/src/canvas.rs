// SPDX-License-Identifier: MIT OR Apache-2.0
//! Minimal in-memory canvas whose objects can be animated.

use crate::layout::LayoutProps;
use canvas_tween_timeline::{shared, Animatable, PropertyValue, SharedTarget};
use indexmap::IndexMap;
use std::cell::Cell;
use std::rc::Rc;

/// A drawable object with named numeric properties
#[derive(Debug, Clone)]
pub struct CanvasObject {
    /// Visual properties (`left`, `top`, `opacity`, ...)
    pub properties: IndexMap<String, PropertyValue>,
    /// Layout fields, also animatable by name
    pub layout: LayoutProps,
    redraws: u64,
    surface: Rc<Cell<u64>>,
}

impl CanvasObject {
    /// Number of redraws this object has requested
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Render the properties as `name=value` pairs
    pub fn describe(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Animatable for CanvasObject {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        self.properties
            .get(name)
            .copied()
            .or_else(|| self.layout.get(name).map(PropertyValue::Float))
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) {
        if let Some(slot) = self.properties.get_mut(name) {
            *slot = value;
            return;
        }
        if let PropertyValue::Float(v) = value {
            if self.layout.set(name, v) {
                return;
            }
        }
        tracing::trace!("{}: ignoring write to unknown property `{name}`", self.layout.name);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
        self.surface.set(self.surface.get() + 1);
    }
}

/// Objects carrying this class are skipped by [`Canvas::render`]
pub const HIDDEN_CLASS: &str = "hidden";

/// Owns the objects of a scene and counts redraw requests across them
#[derive(Debug, Default)]
pub struct Canvas {
    objects: IndexMap<String, SharedTarget<CanvasObject>>,
    surface: Rc<Cell<u64>>,
    drawn: u64,
}

impl Canvas {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object; replaces any object with the same id
    pub fn add(
        &mut self,
        id: impl Into<String>,
        properties: IndexMap<String, PropertyValue>,
        mut layout: LayoutProps,
    ) -> SharedTarget<CanvasObject> {
        let id = id.into();
        if layout.name.is_empty() {
            layout.name = id.clone();
        }
        let object = shared(CanvasObject {
            properties,
            layout,
            redraws: 0,
            surface: self.surface.clone(),
        });
        self.objects.insert(id, object.clone());
        object
    }

    /// Look up an object by id
    pub fn get(&self, id: &str) -> Option<&SharedTarget<CanvasObject>> {
        self.objects.get(id)
    }

    /// Objects in insertion order
    pub fn objects(&self) -> impl Iterator<Item = (&str, &SharedTarget<CanvasObject>)> {
        self.objects.iter().map(|(id, object)| (id.as_str(), object))
    }

    /// Whether any object asked for a redraw since the last [`Canvas::render`]
    pub fn is_dirty(&self) -> bool {
        self.surface.get() != self.drawn
    }

    /// "Draw" the canvas by logging every visible object, if anything changed.
    ///
    /// Returns the number of objects drawn.
    pub fn render(&mut self, timestamp: f64) -> usize {
        if !self.is_dirty() {
            return 0;
        }
        self.drawn = self.surface.get();
        let mut drawn = 0;
        for (id, object) in &self.objects {
            let object = object.borrow();
            if object.layout.has_class(HIDDEN_CLASS) {
                continue;
            }
            tracing::debug!("[{timestamp:>7.1} ms] {id}: {}", object.describe());
            drawn += 1;
        }
        drawn
    }
}
