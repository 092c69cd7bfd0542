use crate::constants::{LOGO_GLOW_BAND, TEXT_GLOW_BAND};
use crate::scene::{MeshId, SceneGraph};
use std::f32::consts::PI;

/// Closed intensity band an oscillating glow sweeps through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowBand {
    pub min: f32,
    pub max: f32,
}

pub const TEXT_GLOW: GlowBand = GlowBand {
    min: TEXT_GLOW_BAND.0,
    max: TEXT_GLOW_BAND.1,
};

pub const LOGO_GLOW: GlowBand = GlowBand {
    min: LOGO_GLOW_BAND.0,
    max: LOGO_GLOW_BAND.1,
};

impl GlowBand {
    /// Intensity at session time `t`; period 2 s, shared phase across bands.
    #[inline]
    pub fn intensity(&self, t: f32) -> f32 {
        let wave = ((t * PI).sin() + 1.0) * 0.5;
        (self.min + wave * (self.max - self.min)).clamp(self.min, self.max)
    }
}

fn apply(scene: &mut SceneGraph, ids: &[MeshId], intensity: f32) {
    for &id in ids {
        if let Some(node) = scene.get_mut(id) {
            node.material.emissive_intensity = intensity;
        }
    }
}

pub fn update_glow(scene: &mut SceneGraph, text: &[MeshId], logo: &[MeshId], t: f32) {
    if !text.is_empty() {
        apply(scene, text, TEXT_GLOW.intensity(t));
    }
    if !logo.is_empty() {
        apply(scene, logo, LOGO_GLOW.intensity(t));
    }
}
