// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout properties shared by every canvas object.
//!
//! Objects hold a [`LayoutProps`] by composition instead of being distinct
//! types per primitive, so a rectangle, a circle and a group all expose the
//! same margins, flex factor and class list.

use serde::{Deserialize, Serialize};

/// Flex-layout related fields of a canvas object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutProps {
    /// Object name, used to look it up in a group
    pub name: String,
    /// Top margin in pixels
    pub margin_top: f64,
    /// Right margin in pixels
    pub margin_right: f64,
    /// Bottom margin in pixels
    pub margin_bottom: f64,
    /// Left margin in pixels
    pub margin_left: f64,
    /// Share of free space taken along the main axis
    pub flex_grow: f64,
    /// Style classes
    pub class_list: Vec<String>,
}

impl LayoutProps {
    /// Read a numeric layout field by its property name
    pub fn get(&self, property: &str) -> Option<f64> {
        let value = match property {
            "margin_top" => self.margin_top,
            "margin_right" => self.margin_right,
            "margin_bottom" => self.margin_bottom,
            "margin_left" => self.margin_left,
            "flex_grow" => self.flex_grow,
            _ => return None,
        };
        Some(value)
    }

    /// Write a numeric layout field; `false` if `property` is not a layout field
    pub fn set(&mut self, property: &str, value: f64) -> bool {
        let slot = match property {
            "margin_top" => &mut self.margin_top,
            "margin_right" => &mut self.margin_right,
            "margin_bottom" => &mut self.margin_bottom,
            "margin_left" => &mut self.margin_left,
            "flex_grow" => &mut self.flex_grow,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Whether the class list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c == class)
    }

    /// Add a class (no duplicates)
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.class_list.push(class);
        }
    }
}
