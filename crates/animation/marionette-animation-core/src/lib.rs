//! Marionette Animation Core (engine-agnostic)
//!
//! The skeletal animation core for composite, rig-based models: per-bone
//! keyframe timelines, interpolation strategies with segment-level conflict
//! resolution, forward-only per-tick playheads, and a queue/priority
//! controller that blends concurrently playing animations into per-bone
//! poses. Asset parsing and host adapters live outside this crate; it
//! consumes already-built timelines and produces pose values.

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod interpolation;
pub mod outputs;
pub mod playhead;

// Re-exports for consumers (adapters)
pub use animation::bone::{BonePlayhead, BoneTimeline, Frame};
pub use animation::data::{Animation, LoopMode};
pub use animation::keyframe::{Attachment, AttachmentKind, BezierAttachment, KeyFrame};
pub use animation::timeline::Timeline;
pub use animation::{Tick, Vec3};
pub use config::Config;
pub use controller::{AnimationController, QueuedAnimation};
pub use error::AnimationError;
pub use interpolation::{Interpolation, SegmentCurve};
pub use outputs::{BonePose, ControllerEvent, Outputs};
pub use playhead::Playhead;
