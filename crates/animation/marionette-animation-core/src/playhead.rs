//! Forward-only per-tick traversal of one timeline.
//!
//! A playhead is ephemeral, single-use state: it belongs to exactly one
//! animation's one channel and is never shared. It walks its timeline one
//! tick at a time, re-deriving the active segment curve only when crossing a
//! keyframe boundary, so per-tick work stays O(1) amortized without ever
//! re-scanning the keyframe set. Seeking backward means constructing a new
//! playhead.

use crate::animation::keyframe::KeyFrame;
use crate::animation::timeline::Timeline;
use crate::animation::{Tick, Vec3};
use crate::config::DEFAULT_BEZIER_SAMPLES;
use crate::interpolation::SegmentCurve;

/// Stateful cursor over one [`Timeline`].
///
/// Starts on a synthetic keyframe at tick 0 holding the timeline's initial
/// value (or the real keyframe at tick 0 when one exists), then advances
/// through the windows `(previous, next)` until the last keyframe, after
/// which it holds the final value indefinitely.
#[derive(Clone, Debug)]
pub struct Playhead {
    tick: Tick,
    /// Number of real keyframes the window has passed.
    consumed: usize,
    /// Left edge of the current window; synthetic until a real keyframe is
    /// consumed.
    previous: KeyFrame,
    value: Vec3,
    active: Option<SegmentCurve>,
    bezier_samples: usize,
}

impl Playhead {
    pub fn new(timeline: &Timeline) -> Self {
        Self::with_resolution(timeline, DEFAULT_BEZIER_SAMPLES)
    }

    pub fn with_resolution(timeline: &Timeline, bezier_samples: usize) -> Self {
        let mut previous = KeyFrame::new(0, timeline.initial());
        let mut consumed = 0;
        // A keyframe sitting at tick 0 is consumed immediately so the tick-0
        // value reproduces it exactly.
        if let Some(first) = timeline.keyframes().first() {
            if first.time() == 0 {
                previous = first.clone();
                consumed = 1;
            }
        }
        let mut playhead = Self {
            tick: 0,
            consumed,
            value: previous.value(),
            previous,
            active: None,
            bezier_samples,
        };
        playhead.rederive(timeline);
        playhead
    }

    /// Tick the playhead currently sits on.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Value at the current tick (the last advanced-to value, or the tick-0
    /// value before any advance).
    #[inline]
    pub fn current(&self) -> Vec3 {
        self.value
    }

    /// Advance one tick and return the channel value at the new tick.
    ///
    /// Keyframe times are reproduced bit-exactly; between keyframes the
    /// cached segment curve is evaluated at the progress ratio; past the last
    /// keyframe the final value is returned unchanged, indefinitely.
    pub fn advance(&mut self, timeline: &Timeline) -> Vec3 {
        self.tick += 1;
        loop {
            let Some(next) = timeline.keyframes().get(self.consumed) else {
                // Terminal state: hold the last value.
                self.value = self.previous.value();
                return self.value;
            };
            if self.tick > next.time() {
                // Zero-length or already-passed segment: jump, never divide.
                self.consume(timeline);
                continue;
            }
            if self.tick == next.time() {
                let value = next.value();
                self.consume(timeline);
                self.value = value;
                return value;
            }
            let span = (next.time() - self.previous.time()) as f32;
            let progress = (self.tick - self.previous.time()) as f32 / span;
            if self.active.is_none() {
                self.rederive(timeline);
            }
            self.value = match &self.active {
                Some(curve) => curve.evaluate(progress),
                None => self.previous.value(),
            };
            return self.value;
        }
    }

    /// Shift the window past `next` and re-derive the active curve.
    fn consume(&mut self, timeline: &Timeline) {
        if let Some(next) = timeline.keyframes().get(self.consumed) {
            self.previous = next.clone();
            self.consumed += 1;
        }
        self.rederive(timeline);
    }

    /// Derive the segment curve for the window `(previous, next)` from the
    /// four-point neighborhood around it.
    fn rederive(&mut self, timeline: &Timeline) {
        let keyframes = timeline.keyframes();
        self.active = keyframes.get(self.consumed).map(|next| {
            let before = self
                .consumed
                .checked_sub(2)
                .and_then(|i| keyframes.get(i));
            let after = keyframes.get(self.consumed + 1);
            SegmentCurve::derive(
                before,
                &self.previous,
                next,
                after,
                timeline.default_interpolation(),
                self.bezier_samples,
            )
        });
    }
}
