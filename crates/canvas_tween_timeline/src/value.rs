// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property values and tween end values.

use crate::easing::Ease;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric value of an animatable property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Scalar value
    Float(f64),
    /// 2-component tuple
    Vec2([f64; 2]),
    /// 3-component tuple
    Vec3([f64; 3]),
    /// 4-component tuple
    Vec4([f64; 4]),
}

impl PropertyValue {
    /// Get as float if possible
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Components as a slice
    pub fn components(&self) -> &[f64] {
        match self {
            PropertyValue::Float(v) => std::slice::from_ref(v),
            PropertyValue::Vec2(v) => v,
            PropertyValue::Vec3(v) => v,
            PropertyValue::Vec4(v) => v,
        }
    }

    /// Apply `f` to every component, keeping the shape
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        match *self {
            PropertyValue::Float(v) => PropertyValue::Float(f(v)),
            PropertyValue::Vec2(v) => PropertyValue::Vec2(v.map(f)),
            PropertyValue::Vec3(v) => PropertyValue::Vec3(v.map(f)),
            PropertyValue::Vec4(v) => PropertyValue::Vec4(v.map(f)),
        }
    }

    /// Combine two values of the same shape component-wise
    pub fn zip_with(&self, other: &Self, mut f: impl FnMut(f64, f64) -> f64) -> Option<Self> {
        let value = match (self, other) {
            (PropertyValue::Float(a), PropertyValue::Float(b)) => PropertyValue::Float(f(*a, *b)),
            (PropertyValue::Vec2(a), PropertyValue::Vec2(b)) => {
                PropertyValue::Vec2(std::array::from_fn(|i| f(a[i], b[i])))
            }
            (PropertyValue::Vec3(a), PropertyValue::Vec3(b)) => {
                PropertyValue::Vec3(std::array::from_fn(|i| f(a[i], b[i])))
            }
            (PropertyValue::Vec4(a), PropertyValue::Vec4(b)) => {
                PropertyValue::Vec4(std::array::from_fn(|i| f(a[i], b[i])))
            }
            _ => return None,
        };
        Some(value)
    }

    /// Eased value between `start` and `end` after `elapsed_ms` of `duration_ms`.
    ///
    /// Returns `None` when the two values have different shapes.
    pub fn ease_between(
        start: &Self,
        end: &Self,
        ease: &Ease,
        elapsed_ms: f64,
        duration_ms: f64,
    ) -> Option<Self> {
        start.zip_with(end, |b, e| ease.evaluate(elapsed_ms, b, e - b, duration_ms))
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<[f64; 2]> for PropertyValue {
    fn from(v: [f64; 2]) -> Self {
        PropertyValue::Vec2(v)
    }
}

impl From<[f64; 3]> for PropertyValue {
    fn from(v: [f64; 3]) -> Self {
        PropertyValue::Vec3(v)
    }
}

impl From<[f64; 4]> for PropertyValue {
    fn from(v: [f64; 4]) -> Self {
        PropertyValue::Vec4(v)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Float(v) => write!(f, "{v}"),
            other => write!(f, "{:?}", other.components()),
        }
    }
}

/// Requested end value of a tweened property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EndValue {
    /// Literal numeric value
    Value(PropertyValue),
    /// Textual value: `+=N`, `-=N`, or a number
    Text(String),
}

impl EndValue {
    /// Resolve against the property's current value.
    ///
    /// Relative tokens add to (or subtract from) every component of `current`.
    /// A plain number is broadcast over tuple properties. Anything else, or a
    /// literal with a different shape than `current`, yields `None`.
    pub fn resolve(&self, current: &PropertyValue) -> Option<PropertyValue> {
        match self {
            EndValue::Value(value) => current.zip_with(value, |_, e| e),
            EndValue::Text(text) => {
                let text = text.trim();
                if let Some(rest) = text.strip_prefix("+=") {
                    let delta = parse_number(rest)?;
                    Some(current.map(|v| v + delta))
                } else if let Some(rest) = text.strip_prefix("-=") {
                    let delta = parse_number(rest)?;
                    Some(current.map(|v| v - delta))
                } else {
                    let target = parse_number(text)?;
                    Some(current.map(|_| target))
                }
            }
        }
    }
}

/// Parse a finite number, tolerating surrounding whitespace
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl From<f64> for EndValue {
    fn from(v: f64) -> Self {
        EndValue::Value(PropertyValue::Float(v))
    }
}

impl From<PropertyValue> for EndValue {
    fn from(v: PropertyValue) -> Self {
        EndValue::Value(v)
    }
}

impl From<[f64; 2]> for EndValue {
    fn from(v: [f64; 2]) -> Self {
        EndValue::Value(v.into())
    }
}

impl From<[f64; 3]> for EndValue {
    fn from(v: [f64; 3]) -> Self {
        EndValue::Value(v.into())
    }
}

impl From<[f64; 4]> for EndValue {
    fn from(v: [f64; 4]) -> Self {
        EndValue::Value(v.into())
    }
}

impl From<&str> for EndValue {
    fn from(v: &str) -> Self {
        EndValue::Text(v.to_string())
    }
}

impl From<String> for EndValue {
    fn from(v: String) -> Self {
        EndValue::Text(v)
    }
}

impl fmt::Display for EndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndValue::Value(v) => fmt::Display::fmt(v, f),
            EndValue::Text(t) => f.write_str(t),
        }
    }
}
