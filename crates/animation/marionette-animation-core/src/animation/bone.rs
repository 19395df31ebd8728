//! Per-bone channel grouping and the combined per-tick frame cursor.

use serde::{Deserialize, Serialize};

use crate::animation::timeline::Timeline;
use crate::animation::{Tick, Vec3};
use crate::config::DEFAULT_BEZIER_SAMPLES;
use crate::interpolation::functions::lerp_vec3;
use crate::interpolation::Interpolation;
use crate::playhead::Playhead;

/// A pose delta relative to the bone's rest pose: position offset, Euler
/// rotation in degrees, per-axis scale.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Frame {
    /// The rest pose: zero translation and rotation, unit scale.
    pub const REST: Frame = Frame {
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
    };

    /// Component-wise linear blend toward `other`.
    #[inline]
    pub fn lerp(self, other: Frame, t: f32) -> Frame {
        Frame {
            position: lerp_vec3(self.position, other.position, t),
            rotation: lerp_vec3(self.rotation, other.rotation, t),
            scale: lerp_vec3(self.scale, other.scale, t),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::REST
    }
}

/// The three channel timelines of one bone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneTimeline {
    position: Timeline,
    rotation: Timeline,
    scale: Timeline,
}

impl BoneTimeline {
    /// Empty channels at the rest pose, interpolating linearly by default.
    pub fn new() -> Self {
        Self {
            position: Timeline::new([0.0; 3], Interpolation::Linear),
            rotation: Timeline::new([0.0; 3], Interpolation::Linear),
            scale: Timeline::new([1.0; 3], Interpolation::Linear),
        }
    }

    #[inline]
    pub fn position(&self) -> &Timeline {
        &self.position
    }

    #[inline]
    pub fn position_mut(&mut self) -> &mut Timeline {
        &mut self.position
    }

    #[inline]
    pub fn rotation(&self) -> &Timeline {
        &self.rotation
    }

    #[inline]
    pub fn rotation_mut(&mut self) -> &mut Timeline {
        &mut self.rotation
    }

    #[inline]
    pub fn scale(&self) -> &Timeline {
        &self.scale
    }

    #[inline]
    pub fn scale_mut(&mut self) -> &mut Timeline {
        &mut self.scale
    }

    /// Replace a whole channel; useful when timelines are built elsewhere.
    pub fn with_position(mut self, timeline: Timeline) -> Self {
        self.position = timeline;
        self
    }

    pub fn with_rotation(mut self, timeline: Timeline) -> Self {
        self.rotation = timeline;
        self
    }

    pub fn with_scale(mut self, timeline: Timeline) -> Self {
        self.scale = timeline;
        self
    }

    /// Last keyframe time across the three channels.
    pub fn length(&self) -> Tick {
        self.position
            .last_time()
            .max(self.rotation.last_time())
            .max(self.scale.last_time())
    }

    /// Fresh frame cursor over this bone's channels.
    pub fn playhead(&self) -> BonePlayhead {
        BonePlayhead::with_resolution(self, DEFAULT_BEZIER_SAMPLES)
    }
}

impl Default for BoneTimeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Three channel playheads advancing in lockstep, yielding one [`Frame`] per
/// tick. Single-use and forward-only like the playheads it bundles.
#[derive(Clone, Debug)]
pub struct BonePlayhead {
    position: Playhead,
    rotation: Playhead,
    scale: Playhead,
}

impl BonePlayhead {
    pub fn with_resolution(timelines: &BoneTimeline, bezier_samples: usize) -> Self {
        Self {
            position: Playhead::with_resolution(&timelines.position, bezier_samples),
            rotation: Playhead::with_resolution(&timelines.rotation, bezier_samples),
            scale: Playhead::with_resolution(&timelines.scale, bezier_samples),
        }
    }

    /// Frame at the current tick (the tick-0 pose before any advance).
    #[inline]
    pub fn current(&self) -> Frame {
        Frame {
            position: self.position.current(),
            rotation: self.rotation.current(),
            scale: self.scale.current(),
        }
    }

    /// Advance all three channels one tick and return the combined frame.
    pub fn advance(&mut self, timelines: &BoneTimeline) -> Frame {
        Frame {
            position: self.position.advance(&timelines.position),
            rotation: self.rotation.advance(&timelines.rotation),
            scale: self.scale.advance(&timelines.scale),
        }
    }
}
