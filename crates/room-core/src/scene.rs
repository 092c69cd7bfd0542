//! Flattened scene graph consumed by the classifier and the per-frame core.
//!
//! Only mesh-bearing nodes are kept. Each mesh remembers the world transform
//! of its parent chain at import time, so animating a mesh only ever touches
//! its own local [`Transform`].

use crate::raycast::Aabb;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

impl MeshId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// The two looping video streams the room binds to screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VideoSlot {
    Monitor,
    Painting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureRef {
    Image(TextureId),
    Video(VideoSlot),
}

/// Local transform with Euler angles in XYZ order, so single-axis writes
/// (clock hands on X, chair on Y) keep the other two axes as authored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            translation,
            rotation: Vec3::new(x, y, z),
            scale,
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.translation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Texture color only; scene lighting is baked into the texture.
    Unlit,
    /// Physically shaded; the room has no dynamic lights so only emission shows.
    Lit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub map: Option<TextureRef>,
    pub emissive_map: Option<TextureRef>,
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub double_sided: bool,
    pub depth_write: bool,
    pub tone_mapped: bool,
}

impl Material {
    /// Baked-lighting material: texture color only.
    pub fn unlit(map: Option<TextureRef>) -> Self {
        Self {
            shading: Shading::Unlit,
            map,
            emissive_map: None,
            color: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
            depth_write: true,
            tone_mapped: true,
        }
    }

    pub fn is_glowing(&self) -> bool {
        self.shading == Shading::Lit && self.emissive_intensity > 0.0
    }
}

/// Sampler configuration requested for an image texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureSampling {
    pub anisotropy: u16,
    pub trilinear: bool,
}

impl Default for TextureSampling {
    fn default() -> Self {
        Self {
            anisotropy: 1,
            trilinear: false,
        }
    }
}

impl TextureSampling {
    pub fn sharpest(max_anisotropy: u16) -> Self {
        Self {
            anisotropy: max_anisotropy.max(1),
            trilinear: true,
        }
    }
}

/// An image referenced by the model, still in its encoded form.
#[derive(Clone, Debug)]
pub struct ImageAsset {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub sampling: TextureSampling,
}

/// Triangle data kept for exact picking on interactive targets.
#[derive(Clone, Debug, Default)]
pub struct Collider {
    pub bounds: Aabb,
    pub triangles: Vec<[Vec3; 3]>,
}

/// GPU-ready vertex streams for one primitive.
#[derive(Clone, Debug, Default)]
pub struct MeshGeometry {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Debug)]
pub struct MeshNode {
    pub id: MeshId,
    pub name: String,
    pub parent_world: Mat4,
    pub transform: Transform,
    /// Color texture of the imported material; `None` with no material or no texture.
    pub source_map: Option<TextureId>,
    pub has_material: bool,
    pub material: Material,
    pub geometry: MeshGeometry,
    pub collider: Collider,
}

impl MeshNode {
    pub fn new(id: MeshId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_world: Mat4::IDENTITY,
            transform: Transform::default(),
            source_map: None,
            has_material: false,
            material: Material::unlit(None),
            geometry: MeshGeometry::default(),
            collider: Collider::default(),
        }
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.parent_world * self.transform.matrix()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub nodes: Vec<MeshNode>,
    pub images: Vec<ImageAsset>,
}

impl SceneGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, mut node: MeshNode) -> MeshId {
        let id = MeshId(self.nodes.len() as u32);
        node.id = id;
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: MeshId) -> Option<&MeshNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: MeshId) -> Option<&mut MeshNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<MeshId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn image_mut(&mut self, id: TextureId) -> Option<&mut ImageAsset> {
        self.images.get_mut(id.0 as usize)
    }
}
