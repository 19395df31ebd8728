//! Output contracts from the controller.
//!
//! Outputs carry the per-bone pose values for this tick plus a separate list
//! of semantic events. The host adapter composes poses with parent-bone
//! offsets and writes them into whatever visual representation it controls.

use serde::{Deserialize, Serialize};

use crate::animation::Vec3;

/// One bone's pose for this tick, relative to its rest pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonePose {
    pub bone: String,
    pub position: Vec3,
    /// Euler rotation in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// Discrete semantic signals emitted during a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ControllerEvent {
    /// A non-looping animation reached its length and left the queue.
    Completed { animation: String },
    /// A looping animation wrapped back to its tick-0 pose.
    Looped { animation: String },
}

/// Outputs returned by `AnimationController::tick()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub poses: Vec<BonePose>,
    #[serde(default)]
    pub events: Vec<ControllerEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.poses.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_pose(&mut self, pose: BonePose) {
        self.poses.push(pose);
    }

    #[inline]
    pub fn push_event(&mut self, event: ControllerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty() && self.events.is_empty()
    }

    /// Pose emitted for `bone` this tick, if any.
    pub fn pose(&self, bone: &str) -> Option<&BonePose> {
        self.poses.iter().find(|p| p.bone == bone)
    }
}
