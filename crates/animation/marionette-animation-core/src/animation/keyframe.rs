//! Keyframes and their typed attachments.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::animation::{Tick, Vec3};
use crate::interpolation::Interpolation;

/// Attachment discriminator. A keyframe carries at most one attachment of a
/// given kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentKind {
    Bezier,
}

/// Per-component tangent handles for cubic-Bézier timing, relative to the
/// keyframe's own (time, value). `left_*` describes the incoming handle,
/// `right_*` the outgoing one; the time components let the curve's time axis
/// be non-uniform per channel component.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierAttachment {
    pub left_time: Vec3,
    pub left_value: Vec3,
    pub right_time: Vec3,
    pub right_value: Vec3,
}

impl Default for BezierAttachment {
    /// Small symmetric handles (±0.1 tick, zero value delta). Substituted for
    /// missing attachments so Bézier segments always evaluate.
    fn default() -> Self {
        Self {
            left_time: [-0.1; 3],
            left_value: [0.0; 3],
            right_time: [0.1; 3],
            right_value: [0.0; 3],
        }
    }
}

/// Typed keyframe attachment. Interpolators that do not consume a given kind
/// ignore it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Attachment {
    Bezier(BezierAttachment),
}

impl Attachment {
    #[inline]
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Bezier(_) => AttachmentKind::Bezier,
        }
    }
}

/// An immutable time-stamped value with an optional per-keyframe interpolation
/// override and optional typed attachments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    time: Tick,
    value: Vec3,
    #[serde(default)]
    interpolation: Option<Interpolation>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    attachments: HashMap<AttachmentKind, Attachment>,
}

impl KeyFrame {
    /// Create a keyframe that falls back to its timeline's default strategy.
    #[inline]
    pub fn new(time: Tick, value: Vec3) -> Self {
        Self {
            time,
            value,
            interpolation: None,
            attachments: HashMap::new(),
        }
    }

    /// Override the interpolation strategy for segments touching this keyframe.
    #[inline]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    /// Attach typed data; a same-kind attachment already present is replaced.
    #[inline]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.insert(attachment.kind(), attachment);
        self
    }

    #[inline]
    pub fn time(&self) -> Tick {
        self.time
    }

    #[inline]
    pub fn value(&self) -> Vec3 {
        self.value
    }

    #[inline]
    pub fn interpolation(&self) -> Option<Interpolation> {
        self.interpolation
    }

    #[inline]
    pub fn attachment(&self, kind: AttachmentKind) -> Option<&Attachment> {
        self.attachments.get(&kind)
    }

    /// Convenience accessor for the Bézier handles, if attached.
    #[inline]
    pub fn bezier(&self) -> Option<&BezierAttachment> {
        match self.attachments.get(&AttachmentKind::Bezier) {
            Some(Attachment::Bezier(b)) => Some(b),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_of_same_kind_replaces() {
        let first = BezierAttachment {
            right_value: [1.0; 3],
            ..Default::default()
        };
        let second = BezierAttachment {
            right_value: [2.0; 3],
            ..Default::default()
        };
        let kf = KeyFrame::new(0, [0.0; 3])
            .with_attachment(Attachment::Bezier(first))
            .with_attachment(Attachment::Bezier(second));
        assert_eq!(kf.bezier(), Some(&second));
    }
}
