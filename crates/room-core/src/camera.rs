//! Perspective camera, its parallax rig, and viewport scaling.
//!
//! The camera is a child of the rig: the orbit controller moves the camera in
//! rig-local space, the parallax step rotates the rig, and the two compose
//! into one world transform without writing to each other.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_TARGET, REFERENCE_WIDTH};
use crate::raycast::Ray;
use glam::{EulerRot, Mat4, Vec2, Vec3};

/// Right-handed perspective camera looking at `target`.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Values below 1 widen the framing without moving the camera.
    pub zoom: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            target: CAMERA_TARGET,
            up: Vec3::Y,
            fov_deg: CAMERA_FOV_DEG,
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            zoom: 1.0,
        }
    }

    /// Vertical field of view after zoom, in radians.
    pub fn effective_fov(&self) -> f32 {
        let half = (self.fov_deg.to_radians() * 0.5).tan() / self.zoom.max(1e-4);
        2.0 * half.atan()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.effective_fov(), self.aspect, self.near, self.far)
    }

    /// View matrix in the rig's local space.
    pub fn local_view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Apply a viewport size: aspect follows the viewport, zoom follows width.
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
        self.zoom = viewport_zoom(viewport.width);
    }
}

/// Parent transform carrying the camera; rotated by the parallax step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraRig {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Camera plus rig, resolved for one frame.
#[derive(Clone, Copy, Debug)]
pub struct CameraView {
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
}

impl CameraView {
    pub fn resolve(camera: &PerspectiveCamera, rig: &CameraRig) -> Self {
        let rig_m = rig.matrix();
        let view = camera.local_view_matrix() * rig_m.inverse();
        Self {
            view,
            projection: camera.projection_matrix(),
            eye: rig_m.transform_point3(camera.position),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }

    /// World-space ray through a normalized device coordinate in [-1, 1]^2.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let mut ray = Ray::from_ndc(ndc, self.view_proj().inverse());
        ray.origin = self.eye;
        ray
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

/// Scaled-down framing for viewports narrower than the reference width.
#[inline]
pub fn viewport_zoom(width: f32) -> f32 {
    (width / REFERENCE_WIDTH).min(1.0)
}
