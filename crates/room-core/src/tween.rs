//! Fire-and-forget property tweens keyed by (target, property).
//!
//! Starting a tween on a key that already animates replaces the old tween;
//! two tweens never drive the same property at once.

use crate::scene::MeshId;
use fnv::FnvHashMap;
use glam::Vec3;

/// Easing curve over normalized progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// Overshoots past the target then settles (`back.out`).
    BackOut(f32),
    /// Cubic deceleration (`power2.out`).
    Power2Out,
    /// Cubic acceleration then deceleration (`power2.inOut`).
    Power2InOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::BackOut(c) => {
                let p = t - 1.0;
                p * p * ((c + 1.0) * p + c) + 1.0
            }
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Mesh(MeshId),
    Camera,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    Scale,
    Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenKey {
    pub target: TweenTarget,
    pub property: TweenProperty,
}

impl TweenKey {
    pub fn mesh_scale(id: MeshId) -> Self {
        Self {
            target: TweenTarget::Mesh(id),
            property: TweenProperty::Scale,
        }
    }

    pub fn camera_position() -> Self {
        Self {
            target: TweenTarget::Camera,
            property: TweenProperty::Position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: Vec3,
    pub to: Vec3,
    pub start: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f32) -> Vec3 {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(p)
    }

    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Tweens {
    active: FnvHashMap<TweenKey, Tween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `key` from its current value `from` to `to`,
    /// superseding any tween already running on that key.
    pub fn start(
        &mut self,
        key: TweenKey,
        from: Vec3,
        to: Vec3,
        duration: f32,
        easing: Easing,
        now: f32,
    ) {
        let replaced = self.active.insert(
            key,
            Tween {
                from,
                to,
                start: now,
                duration,
                easing,
            },
        );
        if replaced.is_some() {
            log::debug!("[tween] replaced in-flight tween on {:?}", key);
        }
    }

    pub fn cancel(&mut self, key: &TweenKey) -> bool {
        self.active.remove(key).is_some()
    }

    pub fn get(&self, key: &TweenKey) -> Option<&Tween> {
        self.active.get(key)
    }

    /// End value of the tween on `key`, if one is running.
    pub fn target_of(&self, key: &TweenKey) -> Option<Vec3> {
        self.active.get(key).map(|t| t.to)
    }

    pub fn is_active(&self, key: &TweenKey) -> bool {
        self.active.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Sample every tween at `now`, hand each value to `write`, and drop the
    /// tweens that reached their end.
    pub fn advance(&mut self, now: f32, mut write: impl FnMut(TweenKey, Vec3)) {
        self.active.retain(|key, tween| {
            write(*key, tween.sample(now));
            !tween.is_finished(now)
        });
    }
}
