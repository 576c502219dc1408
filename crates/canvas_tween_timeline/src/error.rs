// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline errors.

/// Non-fatal problems reported by a [`crate::Timeline`].
///
/// None of these abort the call that produced them; the timeline degrades
/// to best-effort behaviour and hands the value to its
/// [`crate::DiagnosticSink`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    /// `progress()` called with a fraction outside `[0, 1]`
    #[error("Progress value out of range: {0} (expected 0..=1)")]
    InvalidProgress(f64),

    /// A position token named a label that does not exist
    #[error("Label not found: {0}")]
    UnresolvedLabel(String),

    /// A tween end value is neither numeric nor a relative token
    #[error("Cannot interpolate property `{property}` towards `{value}`")]
    UnparseableValue {
        /// Property name
        property: String,
        /// Offending end value
        value: String,
    },

    /// The tween target does not expose the property
    #[error("Target has no property `{0}`")]
    MissingProperty(String),
}

impl TimelineError {
    /// Whether the host is likely to want to hear about this
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            TimelineError::InvalidProgress(_) | TimelineError::UnresolvedLabel(_)
        )
    }
}
