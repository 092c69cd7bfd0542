use crate::classify::ChairHandle;
use crate::constants::{CHAIR_AMPLITUDE_DAMPING, CHAIR_BASE_AMPLITUDE, CHAIR_SWAY_FREQUENCY};
use crate::scene::SceneGraph;

/// Swing amplitude narrows slightly at its own peaks.
#[inline]
pub fn sway_amplitude(t: f32) -> f32 {
    let s = (t * CHAIR_SWAY_FREQUENCY).sin();
    CHAIR_BASE_AMPLITUDE * (1.0 - CHAIR_AMPLITUDE_DAMPING * s.abs())
}

/// Yaw offset from the rest pose at session time `t`.
#[inline]
pub fn sway_offset(t: f32) -> f32 {
    sway_amplitude(t) * (t * CHAIR_SWAY_FREQUENCY).sin()
}

pub fn update_chair(scene: &mut SceneGraph, chair: Option<&ChairHandle>, t: f32) {
    let Some(chair) = chair else {
        return;
    };
    if let Some(node) = scene.get_mut(chair.mesh) {
        node.transform.rotation.y = chair.rest_yaw + sway_offset(t);
    }
}
