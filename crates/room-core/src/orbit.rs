//! Damped orbit controller around a fixed target.
//!
//! Pointer drags and wheel notches accumulate spherical deltas; every
//! `update` re-derives the spherical position from the camera, applies a
//! damped share of the deltas, clamps to the configured limits and writes the
//! camera position back. Panning is not supported.

use crate::camera::PerspectiveCamera;
use crate::constants::*;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;

const POLAR_EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            min_azimuth: ORBIT_MIN_AZIMUTH,
            max_azimuth: ORBIT_MAX_AZIMUTH,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitEvent {
    Start,
    End,
}

/// Spherical coordinates of an offset from the orbit target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Angle from +Y.
    pub polar: f32,
    /// Angle around +Y, measured from +Z toward +X.
    pub azimuth: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius < 1e-9 {
            return Self {
                radius: 0.0,
                polar: 0.0,
                azimuth: 0.0,
            };
        }
        Self {
            radius,
            polar: (v.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: v.x.atan2(v.z),
        }
    }

    pub fn to_offset(&self) -> Vec3 {
        let s = self.polar.sin() * self.radius;
        Vec3::new(
            s * self.azimuth.sin(),
            self.polar.cos() * self.radius,
            s * self.azimuth.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub limits: OrbitLimits,
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_step: f32,
    pub enabled: bool,
    viewport_height: f32,
    delta_polar: f32,
    delta_azimuth: f32,
    scale: f32,
    drag_last: Option<Vec2>,
    spherical: Spherical,
    events: SmallVec<[OrbitEvent; 2]>,
}

impl OrbitControls {
    pub fn new(limits: OrbitLimits, camera: &PerspectiveCamera) -> Self {
        Self {
            limits,
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_step: ORBIT_ZOOM_STEP,
            enabled: true,
            viewport_height: 1.0,
            delta_polar: 0.0,
            delta_azimuth: 0.0,
            scale: 1.0,
            drag_last: None,
            spherical: Spherical::from_offset(camera.position - camera.target),
            events: SmallVec::new(),
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    /// Polar angle as of the last `update`.
    pub fn polar_angle(&self) -> f32 {
        self.spherical.polar
    }

    /// Azimuth angle as of the last `update`.
    pub fn azimuth_angle(&self) -> f32 {
        self.spherical.azimuth
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last.is_some()
    }

    pub fn pointer_down(&mut self, px: Vec2) {
        if !self.enabled || self.drag_last.is_some() {
            return;
        }
        self.drag_last = Some(px);
        self.events.push(OrbitEvent::Start);
    }

    pub fn pointer_move(&mut self, px: Vec2) {
        let Some(last) = self.drag_last else {
            return;
        };
        let d = px - last;
        self.drag_last = Some(px);
        let k = TAU * self.rotate_speed / self.viewport_height;
        self.delta_azimuth -= d.x * k;
        self.delta_polar -= d.y * k;
    }

    pub fn pointer_up(&mut self) {
        if self.drag_last.take().is_some() {
            self.events.push(OrbitEvent::End);
        }
    }

    /// Positive `delta_y` (scrolling down) moves the camera away.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.enabled || delta_y == 0.0 {
            return;
        }
        self.events.push(OrbitEvent::Start);
        if delta_y > 0.0 {
            self.scale /= self.zoom_step;
        } else {
            self.scale *= self.zoom_step;
        }
        self.events.push(OrbitEvent::End);
    }

    /// Drop pending motion, e.g. when a scripted camera animation takes over.
    pub fn halt(&mut self) {
        self.delta_polar = 0.0;
        self.delta_azimuth = 0.0;
        self.scale = 1.0;
    }

    /// Re-read the angles from a camera moved by something else.
    pub fn sync(&mut self, camera: &PerspectiveCamera) {
        self.spherical = Spherical::from_offset(camera.position - camera.target);
    }

    pub fn take_events(&mut self) -> SmallVec<[OrbitEvent; 2]> {
        std::mem::take(&mut self.events)
    }

    /// Advance one frame and write the camera position. Returns whether the
    /// camera moved noticeably.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - camera.target;
        let mut s = Spherical::from_offset(offset);

        s.azimuth += self.delta_azimuth * self.damping;
        s.polar += self.delta_polar * self.damping;

        let l = self.limits;
        s.azimuth = s.azimuth.clamp(l.min_azimuth, l.max_azimuth);
        s.polar = s
            .polar
            .clamp(l.min_polar, l.max_polar)
            .clamp(POLAR_EPS, std::f32::consts::PI - POLAR_EPS);
        s.radius = (s.radius * self.scale).clamp(l.min_distance, l.max_distance);

        let new_position = camera.target + s.to_offset();
        let moved = (new_position - camera.position).length_squared() > 1e-12;
        camera.position = new_position;

        self.delta_azimuth *= 1.0 - self.damping;
        self.delta_polar *= 1.0 - self.damping;
        self.scale = 1.0;
        self.spherical = s;
        moved
    }
}

