//! Queueing, per-bone priority resolution and transition blending across
//! concurrently playing animations.
//!
//! The controller owns all mutable playback state: the queued instances,
//! their playheads and the per-bone last-pose cache. Animation definitions
//! are shared read-only through `Arc`. The core is tick-driven and
//! single-threaded; callers serialize calls to [`AnimationController::tick`].

use std::sync::Arc;

use hashbrown::HashMap;

use crate::animation::bone::{BonePlayhead, Frame};
use crate::animation::data::{Animation, LoopMode};
use crate::animation::Tick;
use crate::config::Config;
use crate::error::AnimationError;
use crate::outputs::{BonePose, ControllerEvent, Outputs};

/// Result of advancing one queued animation by one tick.
enum StepOutcome {
    Active,
    /// A looping animation wrapped back to its tick-0 pose.
    Wrapped,
    /// A non-looping animation ran past its length and leaves the queue.
    Finished,
}

/// One playing instance of an animation, with its own playheads and clock.
/// Re-queueing the same animation name creates an independent instance.
#[derive(Debug)]
pub struct QueuedAnimation {
    animation: Arc<Animation>,
    priority: i32,
    transition_ticks: Tick,
    transitioned: bool,
    /// 1-based clock; counts transition ticks first, then playback ticks.
    tick: Tick,
    bezier_samples: usize,
    playheads: HashMap<String, BonePlayhead>,
    /// Last computed pose per bone (tick-0 poses until the first advance).
    frames: HashMap<String, Frame>,
}

impl QueuedAnimation {
    fn new(
        animation: Arc<Animation>,
        priority: i32,
        transition_ticks: Tick,
        config: &Config,
    ) -> Self {
        let playheads: HashMap<String, BonePlayhead> = animation
            .bones
            .iter()
            .map(|(bone, timelines)| {
                (
                    bone.clone(),
                    BonePlayhead::with_resolution(timelines, config.bezier_samples),
                )
            })
            .collect();
        let frames = playheads
            .iter()
            .map(|(bone, playhead)| (bone.clone(), playhead.current()))
            .collect();
        Self {
            animation,
            priority,
            transition_ticks,
            transitioned: false,
            tick: 1,
            bezier_samples: config.bezier_samples,
            playheads,
            frames,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.animation.name
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn is_transitioned(&self) -> bool {
        self.transitioned
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Whether this animation has timeline data for `bone`.
    #[inline]
    pub fn covers(&self, bone: &str) -> bool {
        self.animation.bones.contains_key(bone)
    }

    /// This instance's pose for `bone` as of its last step.
    #[inline]
    pub fn frame(&self, bone: &str) -> Option<Frame> {
        self.frames.get(bone).copied()
    }

    fn step(&mut self, last_pose: &HashMap<String, Frame>) -> StepOutcome {
        if !self.transitioned {
            if self.tick > self.transition_ticks {
                // Transition phase ends; playback begins at its own zero.
                self.transitioned = true;
                self.tick = 1;
            } else {
                // Ease each bone from its last emitted pose toward this
                // animation's tick-0 pose. Playheads stay untouched, so
                // current() is the tick-0 pose for the whole transition.
                let t = self.tick as f32 / self.transition_ticks as f32;
                for (bone, playhead) in &self.playheads {
                    let from = last_pose.get(bone).copied().unwrap_or(Frame::REST);
                    self.frames.insert(bone.clone(), from.lerp(playhead.current(), t));
                }
                self.tick += 1;
                return StepOutcome::Active;
            }
        }
        if self.tick > self.animation.length {
            self.tick = 1;
            if self.animation.loop_mode != LoopMode::Loop {
                return StepOutcome::Finished;
            }
            self.rewind();
            return StepOutcome::Wrapped;
        }
        for (bone, playhead) in self.playheads.iter_mut() {
            if let Some(timelines) = self.animation.bones.get(bone) {
                self.frames.insert(bone.clone(), playhead.advance(timelines));
            }
        }
        self.tick += 1;
        StepOutcome::Active
    }

    /// Playheads are forward-only; wrapping rebuilds them and reports the
    /// tick-0 pose for this tick.
    fn rewind(&mut self) {
        for (bone, timelines) in self.animation.bones.iter() {
            let playhead = BonePlayhead::with_resolution(timelines, self.bezier_samples);
            self.frames.insert(bone.clone(), playhead.current());
            self.playheads.insert(bone.clone(), playhead);
        }
    }
}

/// The blending/priority layer over a library of animation definitions.
#[derive(Debug, Default)]
pub struct AnimationController {
    config: Config,
    animations: HashMap<String, Arc<Animation>>,
    queued: Vec<QueuedAnimation>,
    /// Last emitted pose per bone. Transition blending and held poses read
    /// from here even when the owning animation has not started playback.
    last_pose: HashMap<String, Frame>,
    outputs: Outputs,
}

impl AnimationController {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Add a definition to the library, replacing any previous definition of
    /// the same name. Already-queued instances keep playing their snapshot.
    pub fn register(&mut self, animation: Animation) -> Result<(), AnimationError> {
        animation.validate()?;
        log::debug!(
            "registered animation '{}' ({} bones, length {})",
            animation.name,
            animation.bones.len(),
            animation.length
        );
        self.animations
            .insert(animation.name.clone(), Arc::new(animation));
        Ok(())
    }

    #[inline]
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name).map(|a| a.as_ref())
    }

    /// Start playing a registered animation. Higher priorities win contested
    /// bones; `transition_ticks` eases each bone from its last emitted pose
    /// into the animation before playback starts.
    pub fn queue(
        &mut self,
        name: &str,
        priority: i32,
        transition_ticks: Tick,
    ) -> Result<(), AnimationError> {
        let animation = self.animations.get(name).cloned().ok_or_else(|| {
            AnimationError::AnimationNotFound {
                name: name.to_string(),
            }
        })?;
        log::debug!("queued '{name}' (priority {priority}, transition {transition_ticks} ticks)");
        self.queued.push(QueuedAnimation::new(
            animation,
            priority,
            transition_ticks,
            &self.config,
        ));
        Ok(())
    }

    /// Remove every queued instance of `name`; returns how many were removed.
    pub fn stop(&mut self, name: &str) -> usize {
        let before = self.queued.len();
        self.queued.retain(|qa| qa.animation.name != name);
        let removed = before - self.queued.len();
        if removed > 0 {
            log::debug!("stopped {removed} instance(s) of '{name}'");
        }
        removed
    }

    #[inline]
    pub fn is_queued(&self, name: &str) -> bool {
        self.queued.iter().any(|qa| qa.animation.name == name)
    }

    #[inline]
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    #[inline]
    pub fn queued(&self) -> &[QueuedAnimation] {
        &self.queued
    }

    /// Last pose emitted for `bone`, if any.
    #[inline]
    pub fn last_pose(&self, bone: &str) -> Option<Frame> {
        self.last_pose.get(bone).copied()
    }

    /// Advance the whole controller by one tick and emit per-bone poses.
    ///
    /// Every queued animation advances once; then each bone is resolved to
    /// its highest-priority owner (queue order breaks ties) and that owner's
    /// pose is emitted. Bones no animation owns keep reporting their cached
    /// pose, which is how `Hold` animations persist after leaving the queue.
    pub fn tick(&mut self) -> &Outputs {
        self.outputs.clear();

        // 1) Advance every queued animation; finished ones leave the queue.
        let mut index = 0;
        while index < self.queued.len() {
            match self.queued[index].step(&self.last_pose) {
                StepOutcome::Active => index += 1,
                StepOutcome::Wrapped => {
                    let name = self.queued[index].animation.name.clone();
                    self.outputs
                        .push_event(ControllerEvent::Looped { animation: name });
                    index += 1;
                }
                StepOutcome::Finished => {
                    let finished = self.queued.remove(index);
                    log::debug!("animation '{}' completed", finished.animation.name);
                    if finished.animation.loop_mode == LoopMode::Once {
                        // Bones nothing else drives return to the rest pose;
                        // Hold leaves the cache untouched instead.
                        for bone in finished.animation.bones.keys() {
                            let covered = self.queued.iter().any(|qa| qa.covers(bone));
                            if !covered && self.last_pose.contains_key(bone) {
                                self.last_pose.insert(bone.clone(), Frame::REST);
                            }
                        }
                    }
                    self.outputs.push_event(ControllerEvent::Completed {
                        animation: finished.animation.name.clone(),
                    });
                }
            }
        }

        // 2) Resolve per-bone ownership and emit poses.
        let mut bones: Vec<String> = self
            .queued
            .iter()
            .flat_map(|qa| qa.animation.bones.keys().cloned())
            .collect();
        bones.extend(self.last_pose.keys().cloned());
        bones.sort();
        bones.dedup();

        for bone in bones {
            let mut owner: Option<&QueuedAnimation> = None;
            for qa in &self.queued {
                if !qa.covers(&bone) {
                    continue;
                }
                match owner {
                    Some(current) if qa.priority <= current.priority => {}
                    _ => owner = Some(qa),
                }
            }
            let frame = match owner {
                Some(qa) => qa.frames.get(&bone).copied(),
                None => self.last_pose.get(&bone).copied(),
            };
            if let Some(frame) = frame {
                self.last_pose.insert(bone.clone(), frame);
                self.outputs.push_pose(BonePose {
                    bone,
                    position: frame.position,
                    rotation: frame.rotation,
                    scale: frame.scale,
                });
            }
        }

        &self.outputs
    }
}
