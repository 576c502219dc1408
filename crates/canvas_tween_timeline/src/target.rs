// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation targets.

use crate::value::PropertyValue;
use std::cell::RefCell;
use std::rc::Rc;

/// An object whose named numeric properties can be driven by a tween
pub trait Animatable {
    /// Read a property; `None` if the object has no such property
    fn get_property(&self, name: &str) -> Option<PropertyValue>;

    /// Write a property
    fn set_property(&mut self, name: &str, value: PropertyValue);

    /// Ask the object (or its owning surface) to redraw
    fn request_redraw(&mut self) {}
}

/// A target kept alive by the host and shared with the timeline.
///
/// The timeline only borrows it for the duration of a single write, so the
/// host is free to mutate the object between frames.
pub type SharedTarget<T> = Rc<RefCell<T>>;

/// Wrap a target for use with [`crate::Timeline::to`]
pub fn shared<T: Animatable>(target: T) -> SharedTarget<T> {
    Rc::new(RefCell::new(target))
}
