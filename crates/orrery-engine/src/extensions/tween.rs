// extensions/tween.rs
//
// Tween system: eased, timed transitions of the camera rig.
// The owner ticks it once per frame; finished tweens report their
// completion id, which the game drains and handles synchronously.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(Tween::camera_eye(from, to, 1.5, Easing::CubicInOut).with_on_complete(FLY_IN_DONE));
//   tweens.tick(dt, &mut camera, &mut controls);
//   for id in tweens.drain_completed() { ... }

use std::collections::BTreeMap;
use glam::Vec3;
use crate::renderer::camera::{OrbitControls, PerspectiveCamera};
use super::easing::{Easing, ease_vec3};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Animate the camera eye position.
    CameraEye { from: Vec3, to: Vec3 },
    /// Animate the point the orbit controls look at.
    ControlsTarget { from: Vec3, to: Vec3 },
}

/// A single tween animation. Always runs once and is removed on completion.
#[derive(Debug, Clone)]
pub struct Tween {
    /// What to animate.
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    /// Easing function.
    pub easing: Easing,
    /// Optional id reported through `drain_completed` when finished.
    pub on_complete: Option<u32>,
}

impl Tween {
    fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
            on_complete: None,
        }
    }

    /// Create a camera eye tween.
    pub fn camera_eye(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::CameraEye { from, to }, duration, easing)
    }

    /// Create an orbit-controls target tween.
    pub fn controls_target(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::ControlsTarget { from, to }, duration, easing)
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Whether the tween has run its full duration.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn apply(&self, camera: &mut PerspectiveCamera, controls: &mut OrbitControls) {
        let t = self.progress();
        match self.target {
            TweenTarget::CameraEye { from, to } => {
                camera.eye = ease_vec3(from, to, t, self.easing);
            }
            TweenTarget::ControlsTarget { from, to } => {
                controls.target = ease_vec3(from, to, t, self.easing);
            }
        }
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// Manages all active tweens. Ordered by id so ticks are deterministic.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: BTreeMap<TweenId, Tween>,
    next_id: u32,
    /// Completed tween events to be polled.
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween. Returns a handle for later control.
    pub fn add(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, tween);
        id
    }

    /// Remove a tween by handle without firing its completion.
    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Get a tween by handle.
    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id)
    }

    /// Advance all tweens and apply them to the camera rig.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, camera: &mut PerspectiveCamera, controls: &mut OrbitControls) -> usize {
        let mut completed = Vec::new();

        for (&id, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            tween.apply(camera, controls);

            if tween.is_complete() {
                if let Some(event_id) = tween.on_complete {
                    self.completed_events.push(event_id);
                }
                completed.push(id);
            }
        }

        for id in &completed {
            self.tweens.remove(id);
        }

        completed.len()
    }

    /// Drain completed tween events.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Clear all tweens and pending completions.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.completed_events.clear();
    }
}
