// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline: schedules animations against a shared virtual playhead.

use crate::animation::Animation;
use crate::config::{Callback, TimelineConfig, TimelineOptions};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::easing::Ease;
use crate::error::TimelineError;
use crate::frame::{FrameHandle, FrameSource};
use crate::position::{Anchor, Position};
use crate::target::{Animatable, SharedTarget};
use crate::tween::{self, TweenVars};
use indexmap::IndexMap;
use std::fmt;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Never started
    #[default]
    Idle,
    /// Playing forward
    Playing,
    /// Playing in reverse
    Reverse,
    /// Paused, or finished
    Paused,
}

/// Direction the playhead moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards the end
    #[default]
    Forward,
    /// Towards the start
    Backward,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    fn state(self) -> PlaybackState {
        match self {
            Direction::Forward => PlaybackState::Playing,
            Direction::Backward => PlaybackState::Reverse,
        }
    }
}

/// Where `play_from` jumps to
#[derive(Debug, Clone, PartialEq)]
pub enum PlayFrom {
    /// Absolute time in seconds
    Time(f64),
    /// A label
    Label(String),
}

impl From<f64> for PlayFrom {
    fn from(secs: f64) -> Self {
        PlayFrom::Time(secs)
    }
}

impl From<&str> for PlayFrom {
    fn from(label: &str) -> Self {
        PlayFrom::Label(label.to_string())
    }
}

impl From<String> for PlayFrom {
    fn from(label: String) -> Self {
        PlayFrom::Label(label)
    }
}

/// How entries are brought up to date with the playhead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evaluation {
    /// Every entry, clamped to its window
    Seek,
    /// Entries whose window was touched since the last evaluation
    Sweep,
}

struct Entry {
    animation: Animation,
    /// Resolved start (ms); `None` if the position named a missing label
    position: Option<f64>,
    /// Start used for playback: `position`, or the running end of the timeline
    start: f64,
    /// `on_complete` already fired since the playhead last moved before the end
    completed: bool,
}

impl Entry {
    fn end(&self) -> f64 {
        self.start + self.animation.duration_ms()
    }

    /// Re-arm completion for an entry still ahead of (or starting at) `time`
    fn arm(&mut self, time: f64) {
        self.completed = !(self.end() > time || self.start >= time);
    }
}

/// Wall-clock anchor of the running frame loop
#[derive(Debug, Clone, Copy, Default)]
struct LoopClock {
    started_at: f64,
    offset: f64,
}

impl LoopClock {
    fn elapsed(&self, timestamp: f64) -> f64 {
        self.offset + (timestamp - self.started_at)
    }
}

/// A frame-driven sequencer of animations.
///
/// Times are kept in milliseconds internally; the public API takes seconds
/// where it mirrors tween options (`to`, `seek`, labels).
pub struct Timeline {
    entries: Vec<Entry>,
    labels: IndexMap<String, f64>,
    duration: f64,
    current_time: f64,
    /// Playhead at the last evaluation
    evaluated_time: f64,
    state: PlaybackState,
    direction: Direction,
    config: TimelineConfig,
    repeat_count: i32,
    clock: LoopClock,
    pending_frame: Option<FrameHandle>,
    frames: Box<dyn FrameSource>,
    diagnostics: Box<dyn DiagnosticSink>,
    on_complete: Option<Callback>,
    on_update: Option<Callback>,
    on_repeat: Option<Callback>,
    on_reverse_complete: Option<Callback>,
}

impl Timeline {
    /// Create an empty timeline scheduling its frames on `frames`
    pub fn new(options: TimelineOptions, frames: impl FrameSource + 'static) -> Self {
        let TimelineOptions {
            config,
            on_complete,
            on_update,
            on_repeat,
            on_reverse_complete,
        } = options;

        Self {
            entries: Vec::new(),
            labels: IndexMap::new(),
            duration: 0.0,
            current_time: 0.0,
            evaluated_time: 0.0,
            state: PlaybackState::Idle,
            direction: Direction::Forward,
            config,
            repeat_count: 0,
            clock: LoopClock::default(),
            pending_frame: None,
            frames: Box::new(frames),
            diagnostics: Box::new(TracingSink),
            on_complete,
            on_update,
            on_repeat,
            on_reverse_complete,
        }
    }

    /// Replace the diagnostic sink (defaults to [`TracingSink`])
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Schedule an animation at `position`
    pub fn add(&mut self, animation: Animation, position: impl Into<Position>) -> &mut Self {
        let position = position.into();
        let anchor = Anchor {
            prev_start: self.entries.last().map_or(0.0, |e| e.start),
            prev_duration: self.entries.last().map_or(0.0, |e| e.animation.duration_ms()),
            duration: self.duration,
        };

        let resolved = position.resolve(anchor, &self.labels);
        if resolved.is_none() {
            if let Position::Label(name, _) = &position {
                self.diagnostics
                    .report(&TimelineError::UnresolvedLabel(name.clone()));
            }
        }

        self.entries.push(Entry {
            animation,
            position: resolved,
            start: 0.0,
            completed: false,
        });
        self.recompute_duration();

        tracing::trace!(
            "scheduled entry {} at `{}` -> {:?} ms (timeline {} ms)",
            self.entries.len() - 1,
            position,
            resolved,
            self.duration
        );
        self
    }

    /// Tween `vars` on `target` over `duration_secs` with the standard ease
    pub fn to<T: Animatable + 'static>(
        &mut self,
        target: &SharedTarget<T>,
        vars: impl Into<TweenVars>,
        duration_secs: f64,
        position: impl Into<Position>,
    ) -> &mut Self {
        self.to_eased(target, vars, duration_secs, position, Ease::default())
    }

    /// Tween `vars` on `target` over `duration_secs` with an explicit ease
    pub fn to_eased<T: Animatable + 'static>(
        &mut self,
        target: &SharedTarget<T>,
        vars: impl Into<TweenVars>,
        duration_secs: f64,
        position: impl Into<Position>,
        ease: impl Into<Ease>,
    ) -> &mut Self {
        let vars: TweenVars = vars.into();
        let animation = tween::build(
            target,
            &vars,
            duration_secs,
            ease.into(),
            self.diagnostics.as_ref(),
        );
        self.add(animation, position)
    }

    /// Define (or move) a label. Without a time the label marks the current end.
    pub fn add_label(&mut self, name: impl Into<String>, at_secs: Option<f64>) -> &mut Self {
        let time = at_secs.map_or(self.duration, |secs| secs * 1000.0);
        self.labels.insert(name.into(), time);
        self
    }

    /// Time of a label in milliseconds
    pub fn label_time(&self, name: &str) -> Option<f64> {
        self.labels.get(name).copied()
    }

    /// Unresolved entries start wherever the timeline ended before them.
    fn recompute_duration(&mut self) {
        let mut total: f64 = 0.0;
        for entry in &mut self.entries {
            entry.start = entry.position.unwrap_or(total);
            total = total.max(entry.end());
        }
        self.duration = total;
    }

    // ------------------------------------------------------------------
    // Playback control
    // ------------------------------------------------------------------

    /// Play forward from the current position.
    ///
    /// A finished timeline restarts from zero. No-op while playing in either direction.
    pub fn play(&mut self) -> &mut Self {
        if self.is_playing() {
            return self;
        }
        if self.current_time >= self.duration {
            self.current_time = 0.0;
            self.repeat_count = 0;
        }
        self.start_loop(Direction::Forward)
    }

    /// Jump to a time or label and play forward from there; no-op while playing
    pub fn play_from(&mut self, from: impl Into<PlayFrom>) -> &mut Self {
        if self.is_playing() {
            return self;
        }
        let target = match from.into() {
            PlayFrom::Time(secs) => Some(secs * 1000.0),
            PlayFrom::Label(name) => {
                let time = self.label_time(&name);
                if time.is_none() {
                    self.diagnostics.report(&TimelineError::UnresolvedLabel(name));
                }
                time
            }
        };

        let Some(time) = target else {
            return self.play();
        };
        self.current_time = time.clamp(0.0, self.duration);
        self.evaluated_time = self.current_time;
        self.repeat_count = 0;
        self.start_loop(Direction::Forward)
    }

    /// Play backward towards zero
    pub fn reverse(&mut self) -> &mut Self {
        if self.is_playing() {
            self.direction = Direction::Backward;
            self.state = PlaybackState::Reverse;
            self.anchor_clock();
            tracing::debug!("timeline switched to reverse at {} ms", self.current_time);
            return self;
        }
        self.start_loop(Direction::Backward)
    }

    /// Stop the frame loop, keeping the playhead where it is
    pub fn pause(&mut self) -> &mut Self {
        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel_frame(handle);
        }
        if self.state != PlaybackState::Paused {
            tracing::debug!("timeline paused at {} ms", self.current_time);
        }
        self.state = PlaybackState::Paused;
        self
    }

    /// Pause if playing, otherwise resume in the last direction
    pub fn toggle_play_pause(&mut self) -> &mut Self {
        if self.is_playing() {
            return self.pause();
        }
        match self.direction {
            Direction::Forward => self.play(),
            Direction::Backward => self.reverse(),
        }
    }

    /// Move the playhead to `secs` and bring every entry up to date.
    ///
    /// Does not change whether the timeline is playing.
    pub fn seek(&mut self, secs: f64) -> &mut Self {
        if !secs.is_finite() {
            return self;
        }
        self.current_time = (secs * 1000.0).clamp(0.0, self.duration);
        self.evaluate(Evaluation::Seek);
        if self.is_playing() {
            self.anchor_clock();
        }
        self.notify_update();
        self
    }

    /// Seek to a fraction of the total duration
    pub fn progress(&mut self, fraction: f64) -> Result<(), TimelineError> {
        if !(0.0..=1.0).contains(&fraction) {
            let error = TimelineError::InvalidProgress(fraction);
            self.diagnostics.report(&error);
            return Err(error);
        }
        self.seek(self.duration * fraction / 1000.0);
        Ok(())
    }

    /// Whether yoyo is enabled
    pub fn yoyo(&self) -> bool {
        self.config.yoyo
    }

    /// Enable or disable yoyo
    pub fn set_yoyo(&mut self, yoyo: bool) -> &mut Self {
        self.config.yoyo = yoyo;
        self
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Total duration in milliseconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Playhead in milliseconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current (or last) direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Playing in either direction
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing | PlaybackState::Reverse)
    }

    /// Paused or finished
    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    /// Completed repeat cycles since the last restart
    pub fn repeat_count(&self) -> i32 {
        self.repeat_count
    }

    /// Cycle configuration
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Number of scheduled entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Effective start of an entry in milliseconds
    pub fn entry_start(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.start)
    }

    /// Scheduled animations in insertion order
    pub fn animations(&self) -> impl Iterator<Item = &Animation> {
        self.entries.iter().map(|e| &e.animation)
    }

    // ------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------

    /// Deliver a frame requested from the [`FrameSource`].
    ///
    /// Frames that are no longer pending (cancelled by `pause`, or superseded)
    /// are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp: f64) {
        if self.pending_frame != Some(handle) {
            tracing::trace!("ignoring stale frame {handle:?}");
            return;
        }
        self.pending_frame = None;
        if !self.is_playing() {
            return;
        }

        self.tick(timestamp);

        if self.is_playing() {
            self.pending_frame = Some(self.frames.request_frame());
        }
    }

    fn tick(&mut self, timestamp: f64) {
        let elapsed = self.clock.elapsed(timestamp);
        let last_cycle = !self.has_repeats_left();

        // the end state is held through the repeat delay
        if elapsed < self.cycle_duration() {
            self.current_time = self.fold(elapsed);
            self.evaluate(Evaluation::Sweep);
            self.notify_update();
            return;
        }

        self.current_time = self.cycle_end();
        self.evaluate(Evaluation::Sweep);
        self.notify_update();

        if last_cycle {
            self.finish();
        } else {
            self.next_cycle(timestamp);
        }
    }

    /// Map elapsed time within the cycle onto the playhead
    fn fold(&self, elapsed: f64) -> f64 {
        let cycle_time = elapsed.clamp(0.0, self.duration);
        match self.direction {
            Direction::Forward => cycle_time,
            Direction::Backward => (self.duration - cycle_time).max(0.0),
        }
    }

    fn cycle_duration(&self) -> f64 {
        self.duration + self.config.repeat_delay.max(0.0) * 1000.0
    }

    fn cycle_end(&self) -> f64 {
        match self.direction {
            Direction::Forward => self.duration,
            Direction::Backward => 0.0,
        }
    }

    fn has_repeats_left(&self) -> bool {
        self.config.repeats_forever() || self.repeat_count < self.config.repeat
    }

    fn next_cycle(&mut self, timestamp: f64) {
        self.repeat_count += 1;
        if self.config.yoyo {
            self.direction = self.direction.flipped();
            self.state = self.direction.state();
        } else {
            self.current_time = match self.direction {
                Direction::Forward => 0.0,
                Direction::Backward => self.duration,
            };
            self.evaluate(Evaluation::Seek);
        }
        self.clock = LoopClock {
            started_at: timestamp,
            offset: 0.0,
        };
        self.arm_completions();
        tracing::debug!(
            "timeline repeat {} ({:?})",
            self.repeat_count,
            self.direction
        );
        if let Some(on_repeat) = self.on_repeat.as_mut() {
            on_repeat();
        }
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Paused;
        tracing::debug!(
            "timeline finished {:?} after {} repeats",
            self.direction,
            self.repeat_count
        );
        let callback = match self.direction {
            Direction::Forward => self.on_complete.as_mut(),
            Direction::Backward => self.on_reverse_complete.as_mut(),
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    fn start_loop(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self.state = direction.state();
        self.evaluated_time = self.current_time;
        self.anchor_clock();
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.frames.request_frame());
        }
        tracing::debug!(
            "timeline started {:?} at {} ms of {} ms",
            direction,
            self.current_time,
            self.duration
        );
        self
    }

    /// Anchor the loop so that the next frame continues from `current_time`
    fn anchor_clock(&mut self) {
        let offset = match self.direction {
            Direction::Forward => self.current_time,
            Direction::Backward => self.duration - self.current_time,
        };
        self.clock = LoopClock {
            started_at: self.frames.now(),
            offset,
        };
        self.arm_completions();
    }

    fn arm_completions(&mut self) {
        let time = self.current_time;
        for entry in &mut self.entries {
            entry.arm(time);
        }
    }

    /// Call every due entry with the current playhead
    fn evaluate(&mut self, mode: Evaluation) {
        let now = self.current_time;
        let before = self.evaluated_time;
        let (low, high) = match mode {
            Evaluation::Seek => (f64::NEG_INFINITY, f64::INFINITY),
            Evaluation::Sweep => (before.min(now), before.max(now)),
        };
        let forward = now > before;

        for entry in &mut self.entries {
            let (start, end) = (entry.start, entry.end());
            if high < start || low > end {
                continue;
            }
            let duration = entry.animation.duration_ms();
            let elapsed = (now - start).clamp(0.0, duration);
            entry.animation.change(elapsed);

            if mode == Evaluation::Sweep && forward && now >= end && !entry.completed {
                entry.completed = true;
                entry.animation.complete();
            }
        }
        self.evaluated_time = now;
    }

    fn notify_update(&mut self) {
        if let Some(on_update) = self.on_update.as_mut() {
            on_update();
        }
    }
}

impl Drop for Timeline {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel_frame(handle);
        }
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("entries", &self.entries.len())
            .field("labels", &self.labels)
            .field("duration", &self.duration)
            .field("current_time", &self.current_time)
            .field("state", &self.state)
            .field("direction", &self.direction)
            .field("config", &self.config)
            .field("repeat_count", &self.repeat_count)
            .field("pending_frame", &self.pending_frame)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::frame::ManualFrameSource;
    use crate::target::shared;
    use crate::value::PropertyValue;
    use crate::CollectingSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: f64 = 16.0;

    /// Records `on_change` arguments per entry
    #[derive(Clone, Default)]
    struct Probe {
        calls: Rc<RefCell<Vec<(usize, f64)>>>,
    }

    impl Probe {
        fn animation(&self, index: usize, duration_secs: f64) -> Animation {
            let calls = self.calls.clone();
            Animation::new(duration_secs, move |elapsed| {
                calls.borrow_mut().push((index, elapsed));
            })
        }

        fn take(&self) -> Vec<(usize, f64)> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }

        fn last_for(&self, index: usize) -> Option<f64> {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find(|(i, _)| *i == index)
                .map(|(_, t)| *t)
        }
    }

    #[derive(Default)]
    struct Sprite {
        left: f64,
        top: f64,
        redraws: usize,
    }

    impl Animatable for Sprite {
        fn get_property(&self, name: &str) -> Option<PropertyValue> {
            match name {
                "left" => Some(self.left.into()),
                "top" => Some(self.top.into()),
                _ => None,
            }
        }

        fn set_property(&mut self, name: &str, value: PropertyValue) {
            let Some(v) = value.as_float() else { return };
            match name {
                "left" => self.left = v,
                "top" => self.top = v,
                _ => {}
            }
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }

    fn timeline(options: TimelineOptions) -> (Timeline, ManualFrameSource) {
        let frames = ManualFrameSource::new();
        (Timeline::new(options, frames.clone()), frames)
    }

    /// Deliver frames until the timeline stops asking, or `max` frames
    fn run(tl: &mut Timeline, frames: &ManualFrameSource, dt: f64, max: usize) -> usize {
        let mut delivered = 0;
        while delivered < max {
            let Some((handle, ts)) = frames.advance(dt) else { break };
            tl.on_frame(handle, ts);
            delivered += 1;
        }
        delivered
    }

    fn counter() -> (Rc<RefCell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        (count, move || *c.borrow_mut() += 1)
    }

    #[test]
    fn test_sequential_entries_sum_durations() {
        let probe = Probe::default();
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), Position::Next)
            .add(probe.animation(1, 0.5), ">")
            .add(probe.animation(2, 2.0), None::<&str>);
        assert_eq!(tl.duration(), 3500.0);
        assert_eq!(tl.entry_start(1), Some(1000.0));
        assert_eq!(tl.entry_start(2), Some(1500.0));
    }

    #[test]
    fn test_position_tokens() {
        let probe = Probe::default();
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">")
            .add(probe.animation(1, 1.0), "<")
            .add(probe.animation(2, 1.0), "<0.5")
            .add(probe.animation(3, 1.0), ">0.5")
            .add(probe.animation(4, 1.0), "-=1")
            .add(probe.animation(5, 1.0), "+=1")
            .add(probe.animation(6, 1.0), 0.25);
        let starts: Vec<_> = (0..7).filter_map(|i| tl.entry_start(i)).collect();
        assert_eq!(starts, vec![0.0, 0.0, 500.0, 2000.0, 2000.0, 4000.0, 250.0]);
        assert_eq!(tl.duration(), 5000.0);
    }

    #[test]
    fn test_unresolved_label_appends_at_end() {
        let probe = Probe::default();
        let sink = CollectingSink::new();
        let (tl, _) = timeline(TimelineOptions::new());
        let mut tl = tl.with_diagnostics(sink.clone());
        tl.add(probe.animation(0, 1.0), 0.0)
            .add(probe.animation(1, 1.0), 3.0)
            .add(probe.animation(2, 1.0), "nowhere");
        assert_eq!(tl.entry_start(2), Some(4000.0));
        assert_eq!(tl.duration(), 5000.0);
        assert_eq!(
            sink.errors(),
            vec![TimelineError::UnresolvedLabel("nowhere".into())]
        );
    }

    #[test]
    fn test_label_defaults_to_end() {
        let sprite = shared(Sprite::default());
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.to(&sprite, [("left", 100.0)], 1.0, ">")
            .to(&sprite, [("top", 100.0)], 1.0, ">")
            .add_label("mid", None)
            .to(&sprite, [("left", 0.0)], 1.0, "mid");
        assert_eq!(tl.label_time("mid"), Some(2000.0));
        assert_eq!(tl.entry_start(2), Some(2000.0));

        tl.add_label("mid", Some(0.5));
        assert_eq!(tl.label_time("mid"), Some(500.0));
    }

    #[test]
    fn test_seek_clamps_entries() {
        let probe = Probe::default();
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">")
            .add(probe.animation(1, 1.0), ">");
        assert_eq!(tl.duration(), 2000.0);

        tl.seek(1.5);
        assert_eq!(probe.take(), vec![(0, 1000.0), (1, 500.0)]);

        tl.seek(0.25);
        assert_eq!(probe.take(), vec![(0, 250.0), (1, 0.0)]);
    }

    #[test]
    fn test_seek_is_idempotent() {
        let probe = Probe::default();
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">")
            .add(probe.animation(1, 1.0), "<0.3");
        tl.seek(0.8);
        let first = probe.take();
        tl.seek(0.8);
        assert_eq!(probe.take(), first);
    }

    #[test]
    fn test_progress_matches_seek() {
        let probe = Probe::default();
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">")
            .add(probe.animation(1, 1.0), ">");

        tl.progress(1.0).unwrap();
        let via_progress = probe.take();
        tl.seek(tl.duration() / 1000.0);
        assert_eq!(probe.take(), via_progress);

        tl.progress(0.0).unwrap();
        let via_progress = probe.take();
        tl.seek(0.0);
        assert_eq!(probe.take(), via_progress);
    }

    #[test]
    fn test_progress_rejects_out_of_range() {
        let probe = Probe::default();
        let sink = CollectingSink::new();
        let (tl, _) = timeline(TimelineOptions::new());
        let mut tl = tl.with_diagnostics(sink.clone());
        tl.add(probe.animation(0, 1.0), ">");
        tl.seek(0.5);
        probe.take();

        assert_eq!(tl.progress(1.5), Err(TimelineError::InvalidProgress(1.5)));
        assert!(tl.progress(-0.1).is_err());
        assert!(probe.take().is_empty());
        assert_eq!(tl.current_time(), 500.0);
        assert_eq!(sink.errors().len(), 2);
    }

    #[test]
    fn test_relative_tween_reaches_end_value() {
        let sprite = shared(Sprite {
            left: 10.0,
            ..Sprite::default()
        });
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.to(&sprite, [("left", "+=50")], 1.0, ">");
        tl.seek(1.0);
        assert_eq!(sprite.borrow().left, 60.0);
        assert!(sprite.borrow().redraws > 0);
    }

    #[test]
    fn test_custom_ease_is_used() {
        let sprite = shared(Sprite::default());
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.to_eased(&sprite, [("left", 100.0)], 1.0, ">", Easing::Linear);
        tl.to_eased(
            &sprite,
            [("top", 100.0)],
            1.0,
            "<",
            Ease::custom(|t, b, c, d| if t < d { b } else { b + c }),
        );
        tl.seek(0.5);
        assert_eq!(sprite.borrow().left, 50.0);
        assert_eq!(sprite.borrow().top, 0.0);
    }

    #[test]
    fn test_play_runs_to_completion() {
        let probe = Probe::default();
        let (completed, on_complete) = counter();
        let (updates, on_update) = counter();
        let (mut tl, frames) = timeline(
            TimelineOptions::new()
                .on_complete(on_complete)
                .on_update(on_update),
        );
        tl.add(probe.animation(0, 0.1), ">")
            .add(probe.animation(1, 0.1), ">");

        tl.play();
        assert!(tl.is_playing());
        run(&mut tl, &frames, FRAME, 100);

        assert!(tl.is_paused());
        assert_eq!(tl.current_time(), 200.0);
        assert_eq!(*completed.borrow(), 1);
        assert!(*updates.borrow() > 1);
        assert_eq!(probe.last_for(0), Some(100.0));
        assert_eq!(probe.last_for(1), Some(100.0));
        assert!(!frames.has_pending());
    }

    #[test]
    fn test_fast_frame_does_not_skip_end_state() {
        let sprite = shared(Sprite::default());
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.to_eased(&sprite, [("left", 100.0)], 0.1, ">", Easing::Linear)
            .to_eased(&sprite, [("top", 100.0)], 1.0, ">", Easing::Linear);

        tl.play();
        let (handle, ts) = frames.advance(50.0).unwrap();
        tl.on_frame(handle, ts);
        assert_eq!(sprite.borrow().left, 50.0);

        let (handle, ts) = frames.advance(400.0).unwrap();
        tl.on_frame(handle, ts);
        assert_eq!(sprite.borrow().left, 100.0);
        assert_eq!(sprite.borrow().top, 35.0);
    }

    #[test]
    fn test_entry_on_complete_fires_once() {
        let (done, on_done) = counter();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(Animation::new(0.05, |_| {}).with_on_complete(on_done), ">")
            .add(Animation::new(0.1, |_| {}), ">");
        tl.play();
        run(&mut tl, &frames, FRAME, 100);
        assert_eq!(*done.borrow(), 1);
    }

    #[test]
    fn test_zero_duration_entries_complete() {
        let (at_start, on_start) = counter();
        let (inside, on_inside) = counter();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(Animation::new(0.0, |_| {}).with_on_complete(on_start), 0.0)
            .add(Animation::new(0.0, |_| {}).with_on_complete(on_inside), 0.05)
            .add(Animation::new(0.2, |_| {}), 0.0);
        tl.play();
        run(&mut tl, &frames, 50.0, 100);
        assert_eq!(*at_start.borrow(), 1);
        assert_eq!(*inside.borrow(), 1);

        tl.play();
        run(&mut tl, &frames, 50.0, 100);
        assert_eq!(*at_start.borrow(), 2);
        assert_eq!(*inside.borrow(), 2);
    }

    #[test]
    fn test_pause_cancels_frame_and_is_idempotent() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">");

        tl.play();
        run(&mut tl, &frames, FRAME, 3);
        let paused_at = tl.current_time();

        tl.pause();
        tl.pause();
        assert!(!tl.is_playing());
        assert!(tl.is_paused());
        assert_eq!(frames.cancelled(), 1);
        assert_eq!(run(&mut tl, &frames, FRAME, 10), 0);
        assert_eq!(tl.current_time(), paused_at);
    }

    #[test]
    fn test_pause_before_play() {
        let (mut tl, _) = timeline(TimelineOptions::new());
        tl.pause().pause();
        assert!(!tl.is_playing());
        assert!(tl.is_paused());
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">");
        tl.play();
        let (handle, ts) = frames.advance(FRAME).unwrap();
        tl.on_frame(handle, ts);
        probe.take();

        tl.on_frame(handle, ts + FRAME);
        assert!(probe.take().is_empty());
    }

    #[test]
    fn test_resume_after_pause_continues() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">");

        tl.play();
        run(&mut tl, &frames, 100.0, 3);
        assert_eq!(tl.current_time(), 300.0);
        tl.pause();
        frames.advance(5000.0);

        tl.toggle_play_pause();
        assert!(tl.is_playing());
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 400.0);
    }

    #[test]
    fn test_play_is_noop_while_playing() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">");
        tl.play();
        run(&mut tl, &frames, 100.0, 2);
        tl.play();
        assert_eq!(frames.requested(), 3);
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 300.0);
    }

    #[test]
    fn test_play_does_not_interrupt_reverse() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">");
        tl.seek(1.0);
        tl.reverse();
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 900.0);

        tl.play();
        tl.play_from(0.0);
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.state(), PlaybackState::Reverse);
        assert_eq!(tl.current_time(), 800.0);
    }

    #[test]
    fn test_play_from_label_and_time() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">")
            .add_label("second", None)
            .add(probe.animation(1, 1.0), ">");

        tl.play_from("second");
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 1100.0);

        tl.play_from(0.5);
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 1200.0);

        tl.pause().play_from(0.5);
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 600.0);
    }

    #[test]
    fn test_finished_timeline_restarts_on_play() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 0.1), ">");
        tl.play();
        run(&mut tl, &frames, FRAME, 100);
        assert_eq!(tl.current_time(), 100.0);

        tl.play();
        run(&mut tl, &frames, FRAME, 1);
        assert_eq!(tl.current_time(), FRAME);
    }

    #[test]
    fn test_reverse_counts_down_and_fires_reverse_complete() {
        let probe = Probe::default();
        let (reversed, on_reverse) = counter();
        let (completed, on_complete) = counter();
        let (mut tl, frames) = timeline(
            TimelineOptions::new()
                .on_reverse_complete(on_reverse)
                .on_complete(on_complete),
        );
        tl.add(probe.animation(0, 1.0), ">");
        tl.seek(1.0);

        tl.reverse();
        assert_eq!(tl.state(), PlaybackState::Reverse);
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 900.0);

        run(&mut tl, &frames, 100.0, 100);
        assert_eq!(tl.current_time(), 0.0);
        assert_eq!(probe.last_for(0), Some(0.0));
        assert_eq!(*reversed.borrow(), 1);
        assert_eq!(*completed.borrow(), 0);
    }

    #[test]
    fn test_reverse_while_playing_flips_direction() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 1.0), ">");
        tl.play();
        run(&mut tl, &frames, 100.0, 5);
        assert_eq!(tl.current_time(), 500.0);

        tl.reverse();
        run(&mut tl, &frames, 100.0, 2);
        assert_eq!(tl.current_time(), 300.0);
        assert_eq!(tl.direction(), Direction::Backward);

        tl.toggle_play_pause();
        tl.toggle_play_pause();
        assert_eq!(tl.state(), PlaybackState::Reverse);
    }

    #[test]
    fn test_repeat_without_yoyo_restarts_forward() {
        let probe = Probe::default();
        let (repeats, on_repeat) = counter();
        let (completed, on_complete) = counter();
        let (mut tl, frames) = timeline(
            TimelineOptions::new()
                .repeat(1)
                .on_repeat(on_repeat)
                .on_complete(on_complete),
        );
        tl.add(probe.animation(0, 0.1), ">");
        tl.play();

        run(&mut tl, &frames, 50.0, 2);
        assert_eq!(*repeats.borrow(), 1);
        assert_eq!(tl.current_time(), 0.0);
        assert_eq!(tl.direction(), Direction::Forward);

        run(&mut tl, &frames, 50.0, 100);
        assert_eq!(*repeats.borrow(), 1);
        assert_eq!(*completed.borrow(), 1);
        assert_eq!(tl.current_time(), 100.0);
    }

    #[test]
    fn test_yoyo_alternates_and_completes_once() {
        let probe = Probe::default();
        let directions = Rc::new(RefCell::new(Vec::new()));
        let (completed, on_complete) = counter();
        let (repeats, on_repeat) = counter();
        let (mut tl, frames) = timeline(
            TimelineOptions::new()
                .repeat(2)
                .yoyo(true)
                .on_complete(on_complete)
                .on_repeat(on_repeat),
        );
        tl.add(probe.animation(0, 0.1), ">");
        assert!(tl.yoyo());

        tl.play();
        directions.borrow_mut().push(tl.direction());
        let mut last_repeat = 0;
        for _ in 0..100 {
            let Some((handle, ts)) = frames.advance(20.0) else { break };
            tl.on_frame(handle, ts);
            if *repeats.borrow() != last_repeat {
                last_repeat = *repeats.borrow();
                directions.borrow_mut().push(tl.direction());
                assert_eq!(*completed.borrow(), 0);
            }
        }

        assert_eq!(
            *directions.borrow(),
            vec![Direction::Forward, Direction::Backward, Direction::Forward]
        );
        assert_eq!(*completed.borrow(), 1);
        assert_eq!(tl.repeat_count(), 2);
        assert_eq!(tl.current_time(), 100.0);
        assert!(tl.is_paused());
    }

    #[test]
    fn test_repeat_delay_holds_end_state() {
        let probe = Probe::default();
        let (repeats, on_repeat) = counter();
        let (mut tl, frames) = timeline(
            TimelineOptions::new()
                .repeat(1)
                .repeat_delay(0.1)
                .on_repeat(on_repeat),
        );
        tl.add(probe.animation(0, 0.1), ">");
        tl.play();

        run(&mut tl, &frames, 50.0, 3);
        assert_eq!(tl.current_time(), 100.0);
        assert_eq!(*repeats.borrow(), 0);

        run(&mut tl, &frames, 50.0, 1);
        assert_eq!(*repeats.borrow(), 1);
    }

    #[test]
    fn test_complete_waits_for_repeat_delay() {
        let probe = Probe::default();
        let finished_at = Rc::new(RefCell::new(None));
        let (mut tl, frames) = {
            let frames = ManualFrameSource::new();
            let clock = frames.clone();
            let slot = finished_at.clone();
            let options = TimelineOptions::new()
                .repeat_delay(0.5)
                .on_complete(move || *slot.borrow_mut() = Some(clock.now()));
            (Timeline::new(options, frames.clone()), frames)
        };
        tl.add(probe.animation(0, 0.1), ">");
        tl.play();

        run(&mut tl, &frames, 50.0, 4);
        assert!(tl.is_playing());
        assert_eq!(tl.current_time(), 100.0);
        assert_eq!(*finished_at.borrow(), None);

        run(&mut tl, &frames, 50.0, 100);
        assert_eq!(*finished_at.borrow(), Some(600.0));
        assert!(tl.is_paused());
        assert_eq!(tl.current_time(), 100.0);
    }

    #[test]
    fn test_infinite_repeat_keeps_playing() {
        let probe = Probe::default();
        let (repeats, on_repeat) = counter();
        let (mut tl, frames) = timeline(
            TimelineOptions::new()
                .repeat(crate::REPEAT_FOREVER)
                .on_repeat(on_repeat),
        );
        tl.add(probe.animation(0, 0.05), ">");
        tl.play();
        assert_eq!(run(&mut tl, &frames, 25.0, 40), 40);
        assert!(tl.is_playing());
        assert!(*repeats.borrow() >= 5);
    }

    #[test]
    fn test_seek_while_playing_reanchors() {
        let probe = Probe::default();
        let (mut tl, frames) = timeline(TimelineOptions::new());
        tl.add(probe.animation(0, 2.0), ">");
        tl.play();
        run(&mut tl, &frames, 100.0, 2);

        tl.seek(1.0);
        assert!(tl.is_playing());
        run(&mut tl, &frames, 100.0, 1);
        assert_eq!(tl.current_time(), 1100.0);
    }

    #[test]
    fn test_set_yoyo() {
        let (mut tl, _) = timeline(TimelineOptions::new());
        assert!(!tl.yoyo());
        assert!(tl.set_yoyo(true).yoyo());
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let probe = Probe::default();
        let frames = ManualFrameSource::new();
        {
            let mut tl = Timeline::new(TimelineOptions::new(), frames.clone());
            tl.add(probe.animation(0, 1.0), ">");
            tl.play();
            assert!(frames.has_pending());
        }
        assert!(!frames.has_pending());
    }
}
