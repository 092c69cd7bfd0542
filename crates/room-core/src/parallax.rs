use crate::camera::CameraRig;
use crate::constants::{PARALLAX_EASE, PARALLAX_INTENSITY};
use crate::orbit::OrbitLimits;
use glam::Vec2;

/// Rig offset expressed in the orbit controller's angles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxOffset {
    pub azimuth: f32,
    pub polar: f32,
}

/// Pointer-driven rig rotation, smoothed across frames.
#[derive(Clone, Debug)]
pub struct Parallax {
    pub intensity: f32,
    pub ease: f32,
    current: ParallaxOffset,
}

impl Default for Parallax {
    fn default() -> Self {
        Self::new(PARALLAX_INTENSITY, PARALLAX_EASE)
    }
}

/// Offset interval that keeps `angle + offset` inside `[min, max]`.
#[inline]
fn admissible(angle: f32, min: f32, max: f32) -> (f32, f32) {
    if min > max {
        // Inverted limits leave nothing to blend toward.
        return (0.0, 0.0);
    }
    (min - angle, max - angle)
}

impl Parallax {
    pub fn new(intensity: f32, ease: f32) -> Self {
        Self {
            intensity,
            ease: ease.clamp(0.0, 1.0),
            current: ParallaxOffset::default(),
        }
    }

    pub fn current(&self) -> ParallaxOffset {
        self.current
    }

    /// Unsmoothed offset for `pointer`, clamped against the live orbit angles.
    pub fn target(
        &self,
        pointer: Vec2,
        azimuth: f32,
        polar: f32,
        limits: &OrbitLimits,
    ) -> ParallaxOffset {
        let half = self.intensity * 0.5;
        let (az_lo, az_hi) = admissible(azimuth, limits.min_azimuth, limits.max_azimuth);
        let (po_lo, po_hi) = admissible(polar, limits.min_polar, limits.max_polar);
        ParallaxOffset {
            azimuth: (pointer.x * half).clamp(az_lo, az_hi),
            polar: (-pointer.y * half).clamp(po_lo, po_hi),
        }
    }

    /// Move one smoothing step toward the clamped target and write the rig.
    pub fn update(
        &mut self,
        pointer: Vec2,
        azimuth: f32,
        polar: f32,
        limits: &OrbitLimits,
        rig: &mut CameraRig,
    ) -> ParallaxOffset {
        let target = self.target(pointer, azimuth, polar, limits);
        let (az_lo, az_hi) = admissible(azimuth, limits.min_azimuth, limits.max_azimuth);
        let (po_lo, po_hi) = admissible(polar, limits.min_polar, limits.max_polar);
        let c = self.current;
        // Re-clamp after smoothing: the orbit may have moved since last frame.
        self.current = ParallaxOffset {
            azimuth: (c.azimuth + (target.azimuth - c.azimuth) * self.ease).clamp(az_lo, az_hi),
            polar: (c.polar + (target.polar - c.polar) * self.ease).clamp(po_lo, po_hi),
        };
        rig.yaw = self.current.azimuth;
        rig.pitch = self.current.polar;
        self.current
    }
}
