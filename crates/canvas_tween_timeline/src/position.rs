// SPDX-License-Identifier: MIT OR Apache-2.0
//! Position tokens: where a new entry starts on the timeline.

use crate::value::parse_number;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Start position of an entry, resolved when the entry is added.
///
/// All offsets are in seconds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Position {
    /// `>`: right after the previous entry ends
    #[default]
    Next,
    /// `<`: together with the previous entry
    WithPrevious,
    /// `<N`: N seconds after the previous entry starts
    AfterPreviousStart(f64),
    /// `>N`: N seconds after the previous entry ends
    AfterPreviousEnd(f64),
    /// `+=N`: N seconds after the current end of the timeline
    AfterEnd(f64),
    /// `-=N`: N seconds before the current end of the timeline, floored at zero
    BeforeEnd(f64),
    /// A label, optionally offset (`name`, `name+=N`, `name-=N`)
    Label(String, f64),
    /// Absolute time in seconds
    At(f64),
}

/// What a position is resolved against
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Anchor {
    /// Start of the previously added entry (ms)
    pub prev_start: f64,
    /// Duration of the previously added entry (ms)
    pub prev_duration: f64,
    /// Current total duration of the timeline (ms)
    pub duration: f64,
}

impl Position {
    /// Label reference without offset
    pub fn label(name: impl Into<String>) -> Self {
        Position::Label(name.into(), 0.0)
    }

    /// Resolve to an absolute time in milliseconds.
    ///
    /// `None` if the position names a label that is not in `labels`.
    pub(crate) fn resolve(&self, anchor: Anchor, labels: &IndexMap<String, f64>) -> Option<f64> {
        let ms = |secs: f64| secs * 1000.0;
        let time = match self {
            Position::Next => anchor.prev_start + anchor.prev_duration,
            Position::WithPrevious => anchor.prev_start,
            Position::AfterPreviousStart(n) => anchor.prev_start + ms(*n),
            Position::AfterPreviousEnd(n) => anchor.prev_start + anchor.prev_duration + ms(*n),
            Position::AfterEnd(n) => anchor.duration + ms(*n),
            Position::BeforeEnd(n) => (anchor.duration - ms(*n)).max(0.0),
            Position::Label(name, offset) => labels.get(name)? + ms(*offset),
            Position::At(secs) => ms(*secs),
        };
        Some(time)
    }
}

impl FromStr for Position {
    type Err = Infallible;

    /// Parse a token. Anything that is not a recognised shape is a label name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let position = match s {
            "" | ">" => Position::Next,
            "<" => Position::WithPrevious,
            _ => {
                if let Some(n) = s.strip_prefix("+=").and_then(parse_number) {
                    Position::AfterEnd(n)
                } else if let Some(n) = s.strip_prefix("-=").and_then(parse_number) {
                    Position::BeforeEnd(n)
                } else if let Some(n) = s.strip_prefix('<').and_then(parse_number) {
                    Position::AfterPreviousStart(n)
                } else if let Some(n) = s.strip_prefix('>').and_then(parse_number) {
                    Position::AfterPreviousEnd(n)
                } else if let Some(n) = parse_number(s) {
                    Position::At(n)
                } else {
                    parse_label(s)
                }
            }
        };
        Ok(position)
    }
}

fn parse_label(s: &str) -> Position {
    for (op, sign) in [("+=", 1.0), ("-=", -1.0)] {
        if let Some((name, offset)) = s.split_once(op) {
            if let (false, Some(n)) = (name.is_empty(), parse_number(offset)) {
                return Position::Label(name.to_string(), sign * n);
            }
        }
    }
    Position::label(s)
}

impl From<&str> for Position {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(position) => position,
            Err(never) => match never {},
        }
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Position::from(s.as_str())
    }
}

impl From<f64> for Position {
    fn from(secs: f64) -> Self {
        Position::At(secs)
    }
}

impl<T: Into<Position>> From<Option<T>> for Position {
    fn from(value: Option<T>) -> Self {
        value.map_or(Position::Next, Into::into)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Next => f.write_str(">"),
            Position::WithPrevious => f.write_str("<"),
            Position::AfterPreviousStart(n) => write!(f, "<{n}"),
            Position::AfterPreviousEnd(n) => write!(f, ">{n}"),
            Position::AfterEnd(n) => write!(f, "+={n}"),
            Position::BeforeEnd(n) => write!(f, "-={n}"),
            Position::Label(name, offset) if *offset == 0.0 => f.write_str(name),
            Position::Label(name, offset) if *offset < 0.0 => write!(f, "{name}-={}", -offset),
            Position::Label(name, offset) => write!(f, "{name}+={offset}"),
            Position::At(n) => write!(f, "{n}"),
        }
    }
}
