mod helpers;
mod mipmaps;
mod scene;

use fnv::FnvHashMap;
use glam::Mat4;
use helpers::{create_depth_texture, create_sampler, create_upload_texture, mip_level_count};
use mipmaps::MipGenerator;
use room_core::constants::BACKGROUND_RGB;
use room_core::scene::TextureSampling;
use room_core::{CameraView, SceneGraph, TextureId, TextureRef, VideoSlot};
use scene::{
    make_room_pipeline, CameraUniforms, GpuMesh, GpuTexture, ObjectUniforms, PipelineKey,
    SceneLayouts,
};
use web_sys as web;

pub static ROOM_WGSL: &str = include_str!("../shaders/room.wgsl");

type MaterialKey = (Option<TextureRef>, Option<TextureRef>);

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: (wgpu::Texture, wgpu::TextureView),

    shader: wgpu::ShaderModule,
    layouts: SceneLayouts,
    pipelines: FnvHashMap<PipelineKey, wgpu::RenderPipeline>,
    mipgen: MipGenerator,

    camera_buffer: wgpu::Buffer,
    camera_bg: wgpu::BindGroup,
    object_stride: u64,
    object_buffer: Option<(wgpu::Buffer, wgpu::BindGroup)>,
    object_staging: Vec<u8>,

    meshes: Vec<Option<GpuMesh>>,
    images: Vec<Option<GpuTexture>>,
    videos: FnvHashMap<VideoSlot, GpuTexture>,
    white: GpuTexture,
    materials: FnvHashMap<MaterialKey, wgpu::BindGroup>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("room_shader"),
            source: wgpu::ShaderSource::Wgsl(ROOM_WGSL.into()),
        });
        let layouts = SceneLayouts::new(&device);
        let mipgen = MipGenerator::new(&device, wgpu::TextureFormat::Rgba8UnormSrgb);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &layouts.camera,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let size = std::mem::size_of::<ObjectUniforms>() as u64;
        let object_stride = size.div_ceil(align) * align;

        let white = create_white_texture(&device, &queue);
        let depth = create_depth_texture(&device, width, height);
        let bg = helpers::srgb_to_linear3(BACKGROUND_RGB);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            shader,
            layouts,
            pipelines: FnvHashMap::default(),
            mipgen,
            camera_buffer,
            camera_bg,
            object_stride,
            object_buffer: None,
            object_staging: Vec::new(),
            meshes: Vec::new(),
            images: Vec::new(),
            videos: FnvHashMap::default(),
            white,
            materials: FnvHashMap::default(),
            width,
            height,
            clear_color: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: 1.0,
            },
        })
    }

    /// Upload vertex data for every mesh and size the per-object uniforms.
    pub fn upload_scene(&mut self, scene: &SceneGraph) {
        self.meshes = scene
            .nodes
            .iter()
            .map(|n| GpuMesh::upload(&self.device, &n.name, &n.geometry))
            .collect();
        self.images = scene.images.iter().map(|_| None).collect();
        self.materials.clear();

        let count = scene.nodes.len().max(1) as u64;
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniforms"),
            size: self.object_stride * count,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bg = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &self.layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                }),
            }],
        });
        self.object_buffer = Some((buffer, bg));
        self.object_staging = vec![0; (self.object_stride * count) as usize];
        log::info!(
            "[gpu] uploaded {} meshes",
            self.meshes.iter().filter(|m| m.is_some()).count()
        );
    }

    /// Install a decoded model texture.
    pub fn set_image(&mut self, id: TextureId, bitmap: &web::ImageBitmap, sampling: TextureSampling) {
        let (w, h) = (bitmap.width(), bitmap.height());
        let mips = if sampling.trilinear {
            mip_level_count(w, h)
        } else {
            1
        };
        let texture = create_upload_texture(&self.device, "room_image", w, h, mips);
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::ImageBitmap(bitmap.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
        self.mipgen.generate(&self.device, &self.queue, &texture);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(&self.device, sampling);
        let idx = id.0 as usize;
        if idx >= self.images.len() {
            self.images.resize_with(idx + 1, || None);
        }
        self.images[idx] = Some(GpuTexture {
            texture,
            view,
            sampler,
        });
        self.materials.clear();
    }

    /// Copy the current frame of a playing video into its texture.
    pub fn upload_video(&mut self, slot: VideoSlot, video: &web::HtmlVideoElement) {
        let (w, h) = (video.video_width(), video.video_height());
        if w == 0 || h == 0 {
            return;
        }
        let stale = self
            .videos
            .get(&slot)
            .map(|t| t.texture.width() != w || t.texture.height() != h)
            .unwrap_or(true);
        if stale {
            let texture = create_upload_texture(&self.device, "room_video", w, h, 1);
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            let sampler = create_sampler(&self.device, TextureSampling::default());
            self.videos.insert(
                slot,
                GpuTexture {
                    texture,
                    view,
                    sampler,
                },
            );
            self.materials.clear();
            log::info!("[gpu] video texture {:?} {}x{}", slot, w, h);
        }
        let Some(tex) = self.videos.get(&slot) else {
            return;
        };
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLVideoElement(video.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &tex.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth = create_depth_texture(&self.device, width, height);
        }
    }

    fn texture_for(&self, r: Option<TextureRef>) -> &GpuTexture {
        let found = match r {
            Some(TextureRef::Image(id)) => self.images.get(id.0 as usize).and_then(Option::as_ref),
            Some(TextureRef::Video(slot)) => self.videos.get(&slot),
            None => None,
        };
        found.unwrap_or(&self.white)
    }

    fn ensure_material(&mut self, key: MaterialKey) {
        if self.materials.contains_key(&key) {
            return;
        }
        let map = self.texture_for(key.0);
        let glow = self.texture_for(key.1);
        let bg = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bg"),
            layout: &self.layouts.material,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&map.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&glow.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&glow.sampler),
                },
            ],
        });
        self.materials.insert(key, bg);
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let p = make_room_pipeline(
            &self.device,
            &self.layouts.pipeline,
            &self.shader,
            self.config.format,
            key,
        );
        self.pipelines.insert(key, p);
    }

    pub fn render(&mut self, scene: &SceneGraph, view: &CameraView) -> Result<(), wgpu::SurfaceError> {
        let cam = CameraUniforms {
            view_proj: view.view_proj().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));

        // Opaque first, then transparent back to front.
        let mut opaque = Vec::new();
        let mut transparent: Vec<(f32, usize)> = Vec::new();
        for (i, node) in scene.nodes.iter().enumerate() {
            if !matches!(self.meshes.get(i), Some(Some(_))) {
                continue;
            }
            let world: Mat4 = node.world_matrix();
            let m = &node.material;
            self.ensure_pipeline(PipelineKey::from(m));
            self.ensure_material((m.map, m.emissive_map));

            let offset = i * self.object_stride as usize;
            let uniforms = ObjectUniforms::new(world, m);
            let bytes = bytemuck::bytes_of(&uniforms);
            if let Some(dst) = self.object_staging.get_mut(offset..offset + bytes.len()) {
                dst.copy_from_slice(bytes);
            }

            if m.transparent {
                let center = world.transform_point3(node.collider.bounds.center());
                let depth = view.view.transform_point3(center).z;
                transparent.push((depth, i));
            } else {
                opaque.push(i);
            }
        }
        transparent.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some((buffer, _)) = &self.object_buffer {
            self.queue.write_buffer(buffer, 0, &self.object_staging);
        }

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("room_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("room_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.1,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_bind_group(0, &self.camera_bg, &[]);

            if let Some((_, object_bg)) = &self.object_buffer {
                let order = opaque
                    .iter()
                    .copied()
                    .chain(transparent.iter().map(|&(_, i)| i));
                for i in order {
                    let (Some(Some(mesh)), Some(node)) = (self.meshes.get(i), scene.nodes.get(i))
                    else {
                        continue;
                    };
                    let m = &node.material;
                    let (Some(pipeline), Some(material_bg)) = (
                        self.pipelines.get(&PipelineKey::from(m)),
                        self.materials.get(&(m.map, m.emissive_map)),
                    ) else {
                        continue;
                    };
                    pass.set_pipeline(pipeline);
                    pass.set_bind_group(1, object_bg, &[(i as u64 * self.object_stride) as u32]);
                    pass.set_bind_group(2, material_bg, &[]);
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Reconfigure after the surface was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

fn create_white_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> GpuTexture {
    let texture = create_upload_texture(device, "white", 1, 1, 1);
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[255, 255, 255, 255],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = create_sampler(device, TextureSampling::default());
    GpuTexture {
        texture,
        view,
        sampler,
    }
}
