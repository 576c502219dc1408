// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tweens built by [`crate::Timeline::to`].

use crate::animation::{secs_to_ms, Animation, PropertyTrack};
use crate::diagnostics::DiagnosticSink;
use crate::easing::Ease;
use crate::error::TimelineError;
use crate::target::{Animatable, SharedTarget};
use crate::value::{EndValue, PropertyValue};
use indexmap::IndexMap;
use std::rc::Rc;

/// Ordered map of property name to requested end value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweenVars {
    props: IndexMap<String, EndValue>,
}

impl TweenVars {
    /// Empty property map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a property
    pub fn set(mut self, property: impl Into<String>, end: impl Into<EndValue>) -> Self {
        self.props.insert(property.into(), end.into());
        self
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl<K: Into<String>, V: Into<EndValue>> FromIterator<(K, V)> for TweenVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<EndValue>, const N: usize> From<[(K, V); N]> for TweenVars {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Read start values, resolve end values and package the writes as an [`Animation`].
///
/// Properties that cannot be resolved are reported to `sink` and left out.
pub(crate) fn build<T: Animatable + 'static>(
    target: &SharedTarget<T>,
    vars: &TweenVars,
    duration_secs: f64,
    ease: Ease,
    sink: &dyn DiagnosticSink,
) -> Animation {
    let tracks = resolve_tracks(&*target.borrow(), vars, sink);
    let weak = Rc::downgrade(target);
    let writes = tracks.clone();
    let duration_ms = secs_to_ms(duration_secs);

    let animation = Animation::new(duration_secs, move |elapsed_ms| {
        let Some(target) = weak.upgrade() else {
            return;
        };
        let Ok(mut target) = target.try_borrow_mut() else {
            tracing::trace!("tween target is borrowed elsewhere, frame skipped");
            return;
        };
        for track in &writes {
            if let Some(value) =
                PropertyValue::ease_between(&track.start, &track.end, &ease, elapsed_ms, duration_ms)
            {
                target.set_property(&track.property, value);
            }
        }
        target.request_redraw();
    });
    animation.with_tracks(tracks)
}

fn resolve_tracks<T: Animatable>(
    target: &T,
    vars: &TweenVars,
    sink: &dyn DiagnosticSink,
) -> Vec<PropertyTrack> {
    let mut tracks = Vec::with_capacity(vars.len());
    for (property, end) in vars.iter() {
        let Some(start) = target.get_property(property) else {
            sink.report(&TimelineError::MissingProperty(property.to_string()));
            continue;
        };
        let Some(end) = end.resolve(&start) else {
            sink.report(&TimelineError::UnparseableValue {
                property: property.to_string(),
                value: end.to_string(),
            });
            continue;
        };
        tracks.push(PropertyTrack {
            property: property.to_string(),
            start,
            end,
        });
    }
    tracks
}
