// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves for tweens.
//!
//! Every curve is evaluated with the classic `(t, b, c, d)` signature: elapsed
//! time, start value, change in value and total duration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Named easing curve
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Quadratic acceleration
    QuadIn,
    /// Quadratic deceleration (the standard ease)
    #[default]
    QuadOut,
    /// Quadratic acceleration then deceleration
    QuadInOut,
    /// Cubic acceleration
    CubicIn,
    /// Cubic deceleration
    CubicOut,
    /// Cubic acceleration then deceleration
    CubicInOut,
    /// Quartic acceleration
    QuartIn,
    /// Quartic deceleration
    QuartOut,
    /// Quartic acceleration then deceleration
    QuartInOut,
    /// Sinusoidal acceleration then deceleration
    SineInOut,
}

impl Easing {
    /// Map normalized progress (0.0 to 1.0) onto the curve
    pub fn curve(&self, p: f64) -> f64 {
        match *self {
            Easing::Linear => p,
            Easing::QuadIn => p * p,
            Easing::QuadOut => 1.0 - (1.0 - p) * (1.0 - p),
            Easing::QuadInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => p * p * p,
            Easing::CubicOut => 1.0 - (1.0 - p).powi(3),
            Easing::CubicInOut => {
                if p < 0.5 {
                    4.0 * p * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
            Easing::QuartIn => p * p * p * p,
            Easing::QuartOut => 1.0 - (1.0 - p).powi(4),
            Easing::QuartInOut => {
                if p < 0.5 {
                    8.0 * p * p * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(4) / 2.0
                }
            }
            Easing::SineInOut => -((std::f64::consts::PI * p).cos() - 1.0) / 2.0,
        }
    }

    /// Evaluate as `(t, b, c, d)`
    pub fn evaluate(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        if d <= 0.0 {
            return b + c;
        }
        let p = (t / d).clamp(0.0, 1.0);
        b + c * self.curve(p)
    }
}

/// Penner-style easing function `(t, b, c, d) -> value`
pub type EaseFn = dyn Fn(f64, f64, f64, f64) -> f64;

/// Easing used by an animation entry: a named curve or a caller-supplied function
#[derive(Clone)]
pub enum Ease {
    /// Named curve
    Curve(Easing),
    /// Caller-supplied function
    Custom(Rc<EaseFn>),
}

impl Ease {
    /// Wrap a caller-supplied `(t, b, c, d)` function
    pub fn custom(f: impl Fn(f64, f64, f64, f64) -> f64 + 'static) -> Self {
        Ease::Custom(Rc::new(f))
    }

    /// Evaluate as `(t, b, c, d)`
    pub fn evaluate(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Ease::Curve(easing) => easing.evaluate(t, b, c, d),
            Ease::Custom(f) => f(t, b, c, d),
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Curve(Easing::default())
    }
}

impl From<Easing> for Ease {
    fn from(easing: Easing) -> Self {
        Ease::Curve(easing)
    }
}

impl fmt::Debug for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Curve(easing) => f.debug_tuple("Curve").field(easing).finish(),
            Ease::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
