//! Interpolation strategies and per-segment curve derivation.
//!
//! The strategy set is closed: segment resolution has to rank every strategy,
//! so new ones are added here rather than through an open registry. A derived
//! [`SegmentCurve`] carries everything a segment needs precomputed (spline
//! windows, Bézier sample tables) so evaluating a progress ratio is cheap.

pub mod functions;

use serde::{Deserialize, Serialize};

use crate::animation::keyframe::KeyFrame;
use crate::animation::Vec3;
use self::functions::{catmull_rom_vec3, lerp_f32, lerp_vec3, mirror_vec3, BezierChannel};

/// Interpolation strategy for the segment between two keyframes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Always the given value, regardless of endpoints or progress.
    Constant(Vec3),
    /// Per-component linear blend.
    Linear,
    /// Centripetal Catmull-Rom spline (uniform parameter) through the
    /// four-point window around the segment.
    CatmullRom,
    /// Cubic Bézier shaped by the endpoints' handle attachments.
    Bezier,
    /// Hold the from-value until the segment ends.
    Step,
}

impl Interpolation {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Linear => "linear",
            Self::CatmullRom => "catmullrom",
            Self::Bezier => "bezier",
            Self::Step => "step",
        }
    }

    /// Intrinsic strength used to resolve conflicting endpoint strategies.
    /// Step outranks the smooth curves, which outrank linear, which outranks
    /// constant. Both splines share the smooth tier.
    #[inline]
    fn strength(self) -> u8 {
        match self {
            Self::Constant(_) => 0,
            Self::Linear => 1,
            Self::CatmullRom | Self::Bezier => 2,
            Self::Step => 3,
        }
    }

    /// Pick the strategy governing a segment whose endpoints declare `from`
    /// and `to`. The stronger strategy wins regardless of which endpoint
    /// declared it; on equal strength the earlier keyframe's strategy is kept.
    #[inline]
    pub fn dominant(from: Interpolation, to: Interpolation) -> Interpolation {
        if to.strength() > from.strength() {
            to
        } else {
            from
        }
    }
}

/// A segment's interpolation function, derived once when the playhead crosses
/// into the segment and evaluated for every tick inside it.
#[derive(Clone, Debug)]
pub enum SegmentCurve {
    Constant(Vec3),
    Step {
        from: Vec3,
        to: Vec3,
    },
    Linear {
        from: Vec3,
        to: Vec3,
    },
    CatmullRom {
        points: [Vec3; 4],
    },
    Bezier {
        start: f32,
        end: f32,
        channels: [BezierChannel; 3],
    },
}

impl SegmentCurve {
    /// Derive the curve for the segment `from -> to` inside its four-point
    /// window. `before`/`after` are the keyframes flanking the segment when
    /// present; the spline synthesizes missing ones by mirroring. Keyframes
    /// without an explicit strategy fall back to `default`.
    pub fn derive(
        before: Option<&KeyFrame>,
        from: &KeyFrame,
        to: &KeyFrame,
        after: Option<&KeyFrame>,
        default: Interpolation,
        bezier_samples: usize,
    ) -> Self {
        let strategy = Interpolation::dominant(
            from.interpolation().unwrap_or(default),
            to.interpolation().unwrap_or(default),
        );
        match strategy {
            Interpolation::Constant(value) => SegmentCurve::Constant(value),
            Interpolation::Step => SegmentCurve::Step {
                from: from.value(),
                to: to.value(),
            },
            Interpolation::Linear => SegmentCurve::Linear {
                from: from.value(),
                to: to.value(),
            },
            Interpolation::CatmullRom => {
                let p1 = from.value();
                let p2 = to.value();
                let p0 = before.map(|k| k.value()).unwrap_or(mirror_vec3(p1, p2));
                let p3 = after.map(|k| k.value()).unwrap_or(mirror_vec3(p2, p1));
                SegmentCurve::CatmullRom {
                    points: [p0, p1, p2, p3],
                }
            }
            Interpolation::Bezier => {
                let outgoing = from.bezier().copied().unwrap_or_default();
                let incoming = to.bezier().copied().unwrap_or_default();
                let start = from.time() as f32;
                let end = to.time() as f32;
                let channels = std::array::from_fn(|c| {
                    BezierChannel::sample(
                        (start, from.value()[c]),
                        (
                            start + outgoing.right_time[c],
                            from.value()[c] + outgoing.right_value[c],
                        ),
                        (
                            end + incoming.left_time[c],
                            to.value()[c] + incoming.left_value[c],
                        ),
                        (end, to.value()[c]),
                        bezier_samples,
                    )
                });
                SegmentCurve::Bezier {
                    start,
                    end,
                    channels,
                }
            }
        }
    }

    /// Evaluate the curve for a progress ratio in [0, 1].
    pub fn evaluate(&self, progress: f32) -> Vec3 {
        match self {
            SegmentCurve::Constant(value) => *value,
            SegmentCurve::Step { from, to } => {
                if progress < 1.0 {
                    *from
                } else {
                    *to
                }
            }
            SegmentCurve::Linear { from, to } => lerp_vec3(*from, *to, progress),
            SegmentCurve::CatmullRom { points } => {
                catmull_rom_vec3(points[0], points[1], points[2], points[3], progress)
            }
            SegmentCurve::Bezier {
                start,
                end,
                channels,
            } => {
                let time = lerp_f32(*start, *end, progress);
                [
                    channels[0].value_at(time),
                    channels[1].value_at(time),
                    channels[2].value_at(time),
                ]
            }
        }
    }
}
