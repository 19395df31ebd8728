//! Whole-animation definitions as produced by an asset-loading host.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::animation::bone::BoneTimeline;
use crate::animation::Tick;
use crate::error::AnimationError;

/// What happens when playback reaches the animation's length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopMode {
    /// Restart from the tick-0 pose.
    Loop,
    /// Leave the queue; affected bones return to their rest pose.
    Once,
    /// Leave the queue; affected bones keep their last pose.
    Hold,
}

/// An animation definition: per-bone channel timelines plus loop semantics.
/// Definitions are immutable after load and shared read-only across playback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub loop_mode: LoopMode,
    /// Playback length in ticks; the playable range is 0..=length.
    pub length: Tick,
    pub bones: HashMap<String, BoneTimeline>,
}

impl Animation {
    pub fn new(name: impl Into<String>, loop_mode: LoopMode, length: Tick) -> Self {
        Self {
            name: name.into(),
            loop_mode,
            length,
            bones: HashMap::new(),
        }
    }

    pub fn with_bone(mut self, bone: impl Into<String>, timelines: BoneTimeline) -> Self {
        self.bones.insert(bone.into(), timelines);
        self
    }

    /// Validate basic invariants (non-zero length).
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.length == 0 {
            return Err(AnimationError::InvalidAnimation {
                reason: format!("animation '{}' has zero length", self.name),
            });
        }
        Ok(())
    }
}
