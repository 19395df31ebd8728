//! Per-channel keyframe storage.

use serde::{Deserialize, Serialize};

use crate::animation::keyframe::KeyFrame;
use crate::animation::{Tick, Vec3};
use crate::interpolation::Interpolation;

/// An ordered keyframe set for one animatable quantity of one bone, plus the
/// value that holds before tick 0 and the strategy used when a keyframe does
/// not override it.
///
/// Invariant: keyframes are sorted ascending by time with unique times.
/// Inserting at an occupied time replaces the resident keyframe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    initial: Vec3,
    default_interpolation: Interpolation,
    keyframes: Vec<KeyFrame>,
}

impl Timeline {
    #[inline]
    pub fn new(initial: Vec3, default_interpolation: Interpolation) -> Self {
        Self {
            initial,
            default_interpolation,
            keyframes: Vec::new(),
        }
    }

    /// Insert a keyframe in chronological order. Returns the keyframe it
    /// replaced when the time was already occupied.
    pub fn insert(&mut self, keyframe: KeyFrame) -> Option<KeyFrame> {
        match self
            .keyframes
            .binary_search_by_key(&keyframe.time(), |k| k.time())
        {
            Ok(pos) => Some(std::mem::replace(&mut self.keyframes[pos], keyframe)),
            Err(pos) => {
                self.keyframes.insert(pos, keyframe);
                None
            }
        }
    }

    #[inline]
    pub fn initial(&self) -> Vec3 {
        self.initial
    }

    #[inline]
    pub fn default_interpolation(&self) -> Interpolation {
        self.default_interpolation
    }

    #[inline]
    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time of the last keyframe, or 0 for an empty timeline.
    #[inline]
    pub fn last_time(&self) -> Tick {
        self.keyframes.last().map(|k| k.time()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_chronological_order() {
        let mut tl = Timeline::new([0.0; 3], Interpolation::Linear);
        tl.insert(KeyFrame::new(10, [1.0; 3]));
        tl.insert(KeyFrame::new(0, [2.0; 3]));
        tl.insert(KeyFrame::new(5, [3.0; 3]));
        let times: Vec<_> = tl.keyframes().iter().map(|k| k.time()).collect();
        assert_eq!(times, vec![0, 5, 10]);
        assert_eq!(tl.last_time(), 10);
    }

    #[test]
    fn insert_at_occupied_time_replaces() {
        let mut tl = Timeline::new([0.0; 3], Interpolation::Linear);
        assert!(tl.insert(KeyFrame::new(0, [1.0; 3])).is_none());
        let replaced = tl.insert(KeyFrame::new(0, [2.0; 3]));
        assert_eq!(replaced.map(|k| k.value()), Some([1.0; 3]));
        assert_eq!(tl.len(), 1);
        assert_eq!(tl.keyframes()[0].value(), [2.0; 3]);
    }
}
