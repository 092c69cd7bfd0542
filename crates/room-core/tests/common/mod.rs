// Shared scene builders for the host-side room tests.

#![allow(dead_code)]

use glam::Vec3;
use room_core::raycast::Aabb;
use room_core::scene::{ImageAsset, MeshNode, TextureSampling};
use room_core::{MeshId, SceneGraph, TextureId};

pub fn unit_box_node(name: &str, translation: Vec3) -> MeshNode {
    let mut node = MeshNode::new(MeshId(0), name);
    node.transform.translation = translation;
    node.collider.bounds = Aabb {
        min: Vec3::splat(-0.5),
        max: Vec3::splat(0.5),
    };
    node
}

pub fn textured(mut node: MeshNode, tex: u32) -> MeshNode {
    node.has_material = true;
    node.source_map = Some(TextureId(tex));
    node
}

pub fn blank_image() -> ImageAsset {
    ImageAsset {
        mime_type: "image/png".to_string(),
        bytes: Vec::new(),
        sampling: TextureSampling::default(),
    }
}

pub fn scene_of(names: &[&str]) -> SceneGraph {
    let mut scene = SceneGraph::default();
    for (i, name) in names.iter().enumerate() {
        scene.push(unit_box_node(name, Vec3::new(i as f32 * 2.0, 0.0, 0.0)));
    }
    scene
}
