//! Binary glTF (`.glb`) import into a flattened [`SceneGraph`].
//!
//! Draco-compressed primitives (`KHR_draco_mesh_compression`) are not decoded
//! here. Their bitstream is handed to a [`MeshDecoder`] supplied by the host,
//! which in the browser is the Draco decoder module.

use crate::classify::is_interactive_target;
use crate::raycast::Aabb;
use crate::scene::{
    Collider, ImageAsset, MeshGeometry, MeshId, MeshNode, SceneGraph, TextureId, TextureSampling,
    Transform,
};
use glam::{Mat4, Quat, Vec3};

pub const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to parse glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("GLB binary chunk is missing")]
    MissingBlob,
    #[error("external buffer '{0}' is not supported; pack the model as .glb")]
    ExternalBuffer(String),
    #[error("primitive {primitive} of '{name}' has no readable vertex positions")]
    MissingPositions { name: String, primitive: usize },
    #[error("primitive {primitive} of '{name}' has a malformed Draco extension")]
    MalformedCompression { name: String, primitive: usize },
    #[error("primitive {primitive} of '{name}' failed to decode: {source}")]
    Decode {
        name: String,
        primitive: usize,
        source: DecodeError,
    },
    #[error("model contains no scene")]
    NoScene,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DecodeError(pub String);

/// A compressed primitive as stored in the model: the raw bitstream plus the
/// Draco attribute ids of the vertex streams the room reads.
#[derive(Clone, Copy, Debug)]
pub struct CompressedPrimitive<'a> {
    pub data: &'a [u8],
    pub position_id: u32,
    pub uv_id: Option<u32>,
}

/// Decodes compressed mesh geometry into positions, UVs and indices.
pub trait MeshDecoder {
    fn decode(&mut self, primitive: &CompressedPrimitive<'_>) -> Result<MeshGeometry, DecodeError>;
}

/// Used when no decoder is available; compressed primitives are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecoder;

impl MeshDecoder for NoDecoder {
    fn decode(&mut self, _: &CompressedPrimitive<'_>) -> Result<MeshGeometry, DecodeError> {
        Err(DecodeError("no mesh decoder available".to_string()))
    }
}

/// Parse a GLB that carries no compressed geometry.
pub fn import_glb(bytes: &[u8]) -> Result<SceneGraph, ImportError> {
    import_glb_with(bytes, &mut NoDecoder)
}

/// Parse a GLB and flatten its default scene, decoding compressed primitives
/// with `decoder`.
///
/// Primitives whose geometry cannot be read or decoded are skipped with an
/// error log; the rest of the model still loads.
pub fn import_glb_with(
    bytes: &[u8],
    decoder: &mut dyn MeshDecoder,
) -> Result<SceneGraph, ImportError> {
    let gltf = parse(bytes)?;
    let buffers = load_buffers(&gltf)?;
    let mut scene = SceneGraph {
        nodes: Vec::new(),
        images: load_images(&gltf, &buffers),
    };

    let root = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or(ImportError::NoScene)?;
    let mut importer = Importer {
        gltf: &gltf,
        buffers: &buffers,
        decoder,
    };
    for node in root.nodes() {
        importer.visit(&node, Mat4::IDENTITY, &mut scene);
    }
    log::info!(
        "[load] imported meshes={} images={}",
        scene.nodes.len(),
        scene.images.len()
    );
    Ok(scene)
}

/// Validate everything except the Draco requirement, which the decoder meets.
fn parse(bytes: &[u8]) -> Result<gltf::Gltf, ImportError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice_without_validation(bytes)?;
    let mut root = document.into_json();
    root.extensions_required.retain(|e| e != DRACO_EXTENSION);
    let document = gltf::Document::from_json(root)?;
    Ok(gltf::Gltf { document, blob })
}

fn load_buffers(gltf: &gltf::Gltf) -> Result<Vec<Vec<u8>>, ImportError> {
    let mut out = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf.blob.as_deref().ok_or(ImportError::MissingBlob)?;
                out.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                return Err(ImportError::ExternalBuffer(uri.to_string()));
            }
        }
    }
    Ok(out)
}

fn view_bytes<'b>(buffers: &'b [Vec<u8>], view: &gltf::buffer::View<'_>) -> Option<&'b [u8]> {
    buffers
        .get(view.buffer().index())
        .and_then(|b| b.get(view.offset()..view.offset() + view.length()))
}

fn load_images(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Vec<ImageAsset> {
    gltf.images()
        .map(|image| match image.source() {
            gltf::image::Source::View { view, mime_type } => ImageAsset {
                mime_type: mime_type.to_string(),
                bytes: view_bytes(buffers, &view)
                    .map(|s| s.to_vec())
                    .unwrap_or_default(),
                sampling: TextureSampling::default(),
            },
            gltf::image::Source::Uri { uri, mime_type } => {
                log::warn!("[load] image '{}' is external; it will render untextured", uri);
                ImageAsset {
                    mime_type: mime_type.unwrap_or_default().to_string(),
                    bytes: Vec::new(),
                    sampling: TextureSampling::default(),
                }
            }
        })
        .collect()
}

fn node_name(node: &gltf::Node<'_>) -> String {
    node.name()
        .map(str::to_string)
        .or_else(|| node.mesh().and_then(|m| m.name().map(str::to_string)))
        .unwrap_or_else(|| format!("node_{}", node.index()))
}

struct Importer<'a, 'd> {
    gltf: &'a gltf::Gltf,
    buffers: &'a [Vec<u8>],
    decoder: &'a mut (dyn MeshDecoder + 'd),
}

impl Importer<'_, '_> {
    fn visit(&mut self, node: &gltf::Node<'_>, parent_world: Mat4, scene: &mut SceneGraph) {
        let (t, r, s) = node.transform().decomposed();
        let transform = Transform::from_trs(Vec3::from(t), Quat::from_array(r), Vec3::from(s));

        if let Some(mesh) = node.mesh() {
            let name = node_name(node);
            for (pi, primitive) in mesh.primitives().enumerate() {
                match self.read_primitive(&name, pi, &primitive) {
                    Ok(geometry) => {
                        let material = primitive.material();
                        let source_map = material
                            .pbr_metallic_roughness()
                            .base_color_texture()
                            .map(|info| TextureId(info.texture().source().index() as u32));
                        let mut mesh_node = MeshNode::new(MeshId(0), name.clone());
                        mesh_node.parent_world = parent_world;
                        mesh_node.transform = transform;
                        mesh_node.has_material = material.index().is_some();
                        mesh_node.source_map = source_map;
                        mesh_node.collider = collider_for(&name, &geometry);
                        mesh_node.geometry = geometry;
                        scene.push(mesh_node);
                    }
                    Err(e) => log::error!("[load] {}", e),
                }
            }
        }

        let world = parent_world * transform.matrix();
        for child in node.children() {
            self.visit(&child, world, scene);
        }
    }

    fn read_primitive(
        &mut self,
        name: &str,
        index: usize,
        primitive: &gltf::Primitive<'_>,
    ) -> Result<MeshGeometry, ImportError> {
        match primitive.extension_value(DRACO_EXTENSION) {
            Some(ext) => self.decode_primitive(name, index, ext),
            None => read_geometry(name, index, primitive, self.buffers),
        }
    }

    fn decode_primitive(
        &mut self,
        name: &str,
        index: usize,
        ext: &gltf::json::Value,
    ) -> Result<MeshGeometry, ImportError> {
        let malformed = || ImportError::MalformedCompression {
            name: name.to_string(),
            primitive: index,
        };
        let attribute = |semantic: &str| {
            ext.get("attributes")
                .and_then(|a| a.get(semantic))
                .and_then(|v| v.as_u64())
                .map(|v| v as u32)
        };
        let view_index = ext
            .get("bufferView")
            .and_then(|v| v.as_u64())
            .ok_or_else(malformed)? as usize;
        let data = self
            .gltf
            .views()
            .nth(view_index)
            .and_then(|view| view_bytes(self.buffers, &view))
            .ok_or_else(malformed)?;
        let request = CompressedPrimitive {
            data,
            position_id: attribute("POSITION").ok_or_else(malformed)?,
            uv_id: attribute("TEXCOORD_0"),
        };

        let mut geometry = self
            .decoder
            .decode(&request)
            .map_err(|source| ImportError::Decode {
                name: name.to_string(),
                primitive: index,
                source,
            })?;
        if geometry.uvs.len() != geometry.positions.len() {
            geometry.uvs = vec![[0.0, 0.0]; geometry.positions.len()];
        }
        if geometry.indices.is_empty() {
            geometry.indices = (0..geometry.positions.len() as u32).collect();
        }
        Ok(geometry)
    }
}

fn read_geometry(
    name: &str,
    index: usize,
    primitive: &gltf::Primitive<'_>,
    buffers: &[Vec<u8>],
) -> Result<MeshGeometry, ImportError> {
    let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.as_slice()));
    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .map(|it| it.collect())
        .ok_or_else(|| ImportError::MissingPositions {
            name: name.to_string(),
            primitive: index,
        })?;
    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|it| it.into_f32().collect())
        .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);
    let indices: Vec<u32> = reader
        .read_indices()
        .map(|it| it.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());
    Ok(MeshGeometry {
        positions,
        uvs,
        indices,
    })
}

/// Bounds for every mesh; exact triangles only for interactive targets.
fn collider_for(name: &str, geometry: &MeshGeometry) -> Collider {
    let positions = &geometry.positions;
    let bounds = Aabb::from_points(positions.iter().map(|p| Vec3::from(*p))).unwrap_or_default();
    let triangles = if is_interactive_target(name) {
        geometry
            .indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let p = |i: u32| positions.get(i as usize).map(|v| Vec3::from(*v));
                Some([p(tri[0])?, p(tri[1])?, p(tri[2])?])
            })
            .collect()
    } else {
        Vec::new()
    };
    Collider { bounds, triangles }
}
