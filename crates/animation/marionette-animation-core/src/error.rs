//! Error types for the animation core.
//!
//! The taxonomy is deliberately small: most abnormal situations (missing
//! attachments, bones absent from an animation, duplicate keyframe times,
//! zero-length segments) are modeled as valid states and recovered locally,
//! not surfaced as errors.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Playback was requested for a name the controller has never seen. The
    /// data producing the animation set lives outside this core, so this
    /// fails fast instead of silently doing nothing.
    #[error("animation not found: {name}")]
    AnimationNotFound { name: String },

    /// An animation definition failed validation on registration.
    #[error("invalid animation: {reason}")]
    InvalidAnimation { reason: String },
}
