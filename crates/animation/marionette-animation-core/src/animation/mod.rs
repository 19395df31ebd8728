//! Animation data model: keyframes, per-channel timelines, bone groupings and
//! whole-animation definitions. Everything in this module is immutable after
//! load and safe to share read-only across playback state.

pub mod bone;
pub mod data;
pub mod keyframe;
pub mod timeline;

/// Discrete simulation tick. The host drives the clock (20 ticks/second in the
/// reference deployment); keyframe times are tick counts, not durations.
pub type Tick = u32;

/// 3-component channel value: a position offset, an Euler rotation in degrees,
/// or per-axis scale factors.
pub type Vec3 = [f32; 3];
