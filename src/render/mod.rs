pub mod camera;
pub mod lights;
pub mod pick;

pub use camera::{CameraController, CameraMovement, ProjectionMode};
pub use lights::{Light, LightRig};

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::assets::{self, TextureCache, TextureHandle, TextureImage, DEFAULT_TEXTURE};
use crate::geometry::{Topology, FLOATS_PER_VERTEX};
use crate::scene::SceneState;
use lights::MAX_POINT_LIGHTS;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const SHADOW_SIZE: u32 = 2048;
const OUTLINE_COLOR: [f32; 4] = [1.0, 0.62, 0.1, 1.0];
// Spot cone angles, stored as cosines in the frame uniforms.
const SPOT_INNER_DEGREES: f32 = 3.0;
const SPOT_OUTER_DEGREES: f32 = 5.0;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to acquire graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to acquire frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("failed to encode screenshot: {0}")]
    Screenshot(#[from] image::ImageError),
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct PointLightUniform {
    position: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    light_space: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    dir_light_dir: [f32; 4],
    dir_light_color: [f32; 4],
    spot_pos: [f32; 4],
    spot_dir: [f32; 4],
    spot_color: [f32; 4],
    point_count: [u32; 4],
    point_lights: [PointLightUniform; MAX_POINT_LIGHTS],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    /// roughness, metallic, filter mode, texture toggle.
    params: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ShadowUniforms {
    light_space: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct SkyUniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct OutlineUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
        2 => Float32x3,
        3 => Float32x3,
    ];
    wgpu::VertexBufferLayout {
        array_stride: (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

fn position_only_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// GPU copy of one primitive's mesh, refreshed when the CPU revision
/// moves past the uploaded one.
struct GpuPrimitive {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    index_count: u32,
    topology: Topology,
    revision: u64,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    texture: TextureHandle,
}

// Edges of the selection outline box; corner i has coordinates taken
// from min/max by bits (i&1, i&2, i&4).
const OUTLINE_EDGES: [u16; 24] = [
    0, 1, 2, 3, 4, 5, 6, 7, // x edges
    0, 2, 1, 3, 4, 6, 5, 7, // y edges
    0, 4, 1, 5, 2, 6, 3, 7, // z edges
];

pub struct RenderContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    frame_layout: wgpu::BindGroupLayout,
    model_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,

    shadow_view: wgpu::TextureView,
    shadow_sampler: wgpu::Sampler,
    shadow_buffer: wgpu::Buffer,
    shadow_bind_group: wgpu::BindGroup,

    sky_view: wgpu::TextureView,
    sky_sampler: wgpu::Sampler,
    sky_buffer: wgpu::Buffer,
    sky_bind_group: wgpu::BindGroup,
    sky_layout: wgpu::BindGroupLayout,

    outline_buffer: wgpu::Buffer,
    outline_vertices: wgpu::Buffer,
    outline_indices: wgpu::Buffer,
    outline_bind_group: wgpu::BindGroup,

    object_pipelines: HashMap<Topology, wgpu::RenderPipeline>,
    depth_pipeline: wgpu::RenderPipeline,
    skybox_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,

    primitives: HashMap<u64, GpuPrimitive>,
    texture_bind_groups: HashMap<TextureHandle, wgpu::BindGroup>,

    egui_renderer: egui_wgpu::Renderer,
    pending_screenshot: Option<PathBuf>,
}

impl RenderContext {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::NoAdapter)?;
        log::info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("forma device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, config.width, config.height);

        let shadow_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shadow map"),
            size: wgpu::Extent3d {
                width: SHADOW_SIZE,
                height: SHADOW_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let shadow_view = shadow_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let sky_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sky sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let sky_view = create_cubemap(&device, &queue, &default_sky_faces());

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame layout"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("model layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let shadow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let sky_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky layout"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let outline_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("outline layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = create_frame_bind_group(
            &device,
            &frame_layout,
            &frame_buffer,
            &shadow_view,
            &shadow_sampler,
            &sky_view,
            &sky_sampler,
        );

        let shadow_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shadow uniforms"),
            size: std::mem::size_of::<ShadowUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow bind group"),
            layout: &shadow_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: shadow_buffer.as_entire_binding(),
            }],
        });

        let sky_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sky uniforms"),
            size: std::mem::size_of::<SkyUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sky_bind_group =
            create_sky_bind_group(&device, &sky_layout, &sky_buffer, &sky_view, &sky_sampler);

        let outline_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("outline uniforms"),
            size: std::mem::size_of::<OutlineUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let outline_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("outline bind group"),
            layout: &outline_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: outline_buffer.as_entire_binding(),
            }],
        });
        let outline_vertices = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("outline vertices"),
            size: (8 * 3 * std::mem::size_of::<f32>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let outline_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("outline indices"),
            contents: bytemuck::cast_slice(&OUTLINE_EDGES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let object_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("object shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/object.wgsl").into()),
        });
        let depth_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("depth shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/depth.wgsl").into()),
        });
        let skybox_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skybox shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/skybox.wgsl").into()),
        });
        let outline_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("outline shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/outline.wgsl").into()),
        });

        let object_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("object pipeline layout"),
                bind_group_layouts: &[&frame_layout, &model_layout, &texture_layout],
                push_constant_ranges: &[],
            });
        let mut object_pipelines = HashMap::new();
        for topology in [Topology::TriangleList, Topology::LineList, Topology::PointList] {
            object_pipelines.insert(
                topology,
                create_object_pipeline(
                    &device,
                    &object_pipeline_layout,
                    &object_shader,
                    format,
                    topology,
                ),
            );
        }

        let depth_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("depth pipeline layout"),
                bind_group_layouts: &[&shadow_layout, &model_layout],
                push_constant_ranges: &[],
            });
        let depth_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("depth pipeline"),
            layout: Some(&depth_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &depth_shader,
                entry_point: Some("vs_main"),
                buffers: &[mesh_vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: SHADOW_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let skybox_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("skybox pipeline layout"),
                bind_group_layouts: &[&sky_layout],
                push_constant_ranges: &[],
            });
        let skybox_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("skybox pipeline"),
            layout: Some(&skybox_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &skybox_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &skybox_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let outline_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("outline pipeline layout"),
                bind_group_layouts: &[&outline_layout],
                push_constant_ranges: &[],
            });
        let outline_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("outline pipeline"),
            layout: Some(&outline_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &outline_shader,
                entry_point: Some("vs_main"),
                buffers: &[position_only_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &outline_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            // The outline stays visible through other geometry.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        let mut context = Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            frame_buffer,
            frame_bind_group,
            frame_layout,
            model_layout,
            texture_layout,
            shadow_view,
            shadow_sampler,
            shadow_buffer,
            shadow_bind_group,
            sky_view,
            sky_sampler,
            sky_buffer,
            sky_bind_group,
            sky_layout,
            outline_buffer,
            outline_vertices,
            outline_indices,
            outline_bind_group,
            object_pipelines,
            depth_pipeline,
            skybox_pipeline,
            outline_pipeline,
            primitives: HashMap::new(),
            texture_bind_groups: HashMap::new(),
            egui_renderer,
            pending_screenshot: None,
        };
        context.ensure_texture_bind_group(DEFAULT_TEXTURE, &TextureImage::white());
        Ok(context)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, size.width, size.height);
    }

    /// Replace the skybox cubemap. Faces must share dimensions; the
    /// order is +X, -X, +Y, -Y, +Z, -Z.
    pub fn set_skybox_faces(&mut self, faces: &[TextureImage; 6]) {
        let (w, h) = (faces[0].width, faces[0].height);
        if faces.iter().any(|f| f.width != w || f.height != h) {
            log::warn!("skybox faces have mismatched sizes, keeping current skybox");
            return;
        }
        self.sky_view = create_cubemap(&self.device, &self.queue, faces);
        self.frame_bind_group = create_frame_bind_group(
            &self.device,
            &self.frame_layout,
            &self.frame_buffer,
            &self.shadow_view,
            &self.shadow_sampler,
            &self.sky_view,
            &self.sky_sampler,
        );
        self.sky_bind_group = create_sky_bind_group(
            &self.device,
            &self.sky_layout,
            &self.sky_buffer,
            &self.sky_view,
            &self.sky_sampler,
        );
    }

    pub fn request_screenshot(&mut self, path: PathBuf) {
        self.pending_screenshot = Some(path);
    }

    fn ensure_texture_bind_group(&mut self, handle: TextureHandle, image: &TextureImage) {
        if self.texture_bind_groups.contains_key(&handle) {
            return;
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("material texture"),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material bind group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        self.texture_bind_groups.insert(handle, bind_group);
    }

    /// Mirror the scene into GPU buffers: upload new or re-tessellated
    /// meshes, upload textures seen for the first time, and drop the
    /// buffers of removed primitives.
    pub fn sync_scene(&mut self, scene: &SceneState, textures: &TextureCache) {
        for primitive in scene.primitives() {
            let texture = primitive.material.texture.unwrap_or(DEFAULT_TEXTURE);
            self.ensure_texture_bind_group(texture, textures.image(texture));

            let stale = match self.primitives.get(&primitive.id) {
                Some(gpu) => gpu.revision != primitive.revision(),
                None => true,
            };
            if stale {
                let mesh = primitive.mesh();
                if mesh.is_empty() {
                    self.primitives.remove(&primitive.id);
                    continue;
                }
                let vertex_buffer =
                    self.device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("primitive vertices"),
                            contents: bytemuck::cast_slice(&mesh.vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        });
                let index_buffer = if mesh.indices.is_empty() {
                    None
                } else {
                    Some(
                        self.device
                            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                                label: Some("primitive indices"),
                                contents: bytemuck::cast_slice(&mesh.indices),
                                usage: wgpu::BufferUsages::INDEX,
                            }),
                    )
                };
                let model_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("model uniforms"),
                    size: std::mem::size_of::<ModelUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let model_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("model bind group"),
                    layout: &self.model_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: model_buffer.as_entire_binding(),
                    }],
                });
                self.primitives.insert(
                    primitive.id,
                    GpuPrimitive {
                        vertex_buffer,
                        index_buffer,
                        vertex_count: mesh.vertex_count() as u32,
                        index_count: mesh.indices.len() as u32,
                        topology: mesh.topology,
                        revision: primitive.revision(),
                        model_buffer,
                        model_bind_group,
                        texture,
                    },
                );
            } else if let Some(gpu) = self.primitives.get_mut(&primitive.id) {
                gpu.texture = texture;
            }
        }
        self.primitives.retain(|id, _| scene.get(*id).is_some());
    }

    pub fn render(
        &mut self,
        scene: &SceneState,
        camera: &CameraController,
        lights: &LightRig,
        egui_ctx: &egui::Context,
        egui_output: egui::FullOutput,
    ) -> Result<(), RenderError> {
        let aspect = self.config.width as f32 / self.config.height.max(1) as f32;
        let view = camera.view_matrix();
        let projection = camera.projection_matrix(aspect);
        let light_space = lights.light_space_matrix();

        self.write_frame_uniforms(camera, lights, projection * view, light_space);
        let sky_view_proj = projection * Mat4::from_mat3(glam::Mat3::from_mat4(view));
        self.queue.write_buffer(
            &self.sky_buffer,
            0,
            bytemuck::bytes_of(&SkyUniforms {
                view_proj: sky_view_proj.to_cols_array_2d(),
            }),
        );
        self.queue.write_buffer(
            &self.shadow_buffer,
            0,
            bytemuck::bytes_of(&ShadowUniforms {
                light_space: light_space.to_cols_array_2d(),
            }),
        );
        for primitive in scene.primitives() {
            if let Some(gpu) = self.primitives.get(&primitive.id) {
                let material = &primitive.material;
                let textured = material.texture_enabled && material.texture.is_some();
                let uniforms = ModelUniforms {
                    model: primitive.transform.to_cols_array_2d(),
                    color: material.color.extend(1.0).to_array(),
                    params: [
                        material.roughness,
                        material.metallic,
                        material.filter as f32,
                        if textured { 1.0 } else { 0.0 },
                    ],
                };
                self.queue
                    .write_buffer(&gpu.model_buffer, 0, bytemuck::bytes_of(&uniforms));
            }
        }

        let selected = scene.selected().and_then(|id| scene.get(id));
        if let Some(primitive) = selected {
            let aabb = primitive.local_box();
            let mut corners = [0.0f32; 24];
            for i in 0..8 {
                corners[i * 3] = if i & 1 == 0 { aabb.min.x } else { aabb.max.x };
                corners[i * 3 + 1] = if i & 2 == 0 { aabb.min.y } else { aabb.max.y };
                corners[i * 3 + 2] = if i & 4 == 0 { aabb.min.z } else { aabb.max.z };
            }
            self.queue
                .write_buffer(&self.outline_vertices, 0, bytemuck::cast_slice(&corners));
            self.queue.write_buffer(
                &self.outline_buffer,
                0,
                bytemuck::bytes_of(&OutlineUniforms {
                    view_proj: (projection * view).to_cols_array_2d(),
                    model: primitive.transform.to_cols_array_2d(),
                    color: OUTLINE_COLOR,
                }),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        // Shadow pass: triangle meshes only, from the light's view.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.depth_pipeline);
            pass.set_bind_group(0, &self.shadow_bind_group, &[]);
            for primitive in scene.primitives() {
                let Some(gpu) = self.primitives.get(&primitive.id) else {
                    continue;
                };
                if gpu.topology != Topology::TriangleList {
                    continue;
                }
                pass.set_bind_group(1, &gpu.model_bind_group, &[]);
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                match &gpu.index_buffer {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                    }
                    None => pass.draw(0..gpu.vertex_count, 0..1),
                }
            }
        }

        // Main pass: skybox first, then objects, then the selection
        // outline.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.06,
                            b: 0.08,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.skybox_pipeline);
            pass.set_bind_group(0, &self.sky_bind_group, &[]);
            pass.draw(0..36, 0..1);

            for primitive in scene.primitives() {
                let Some(gpu) = self.primitives.get(&primitive.id) else {
                    continue;
                };
                pass.set_pipeline(&self.object_pipelines[&gpu.topology]);
                pass.set_bind_group(0, &self.frame_bind_group, &[]);
                pass.set_bind_group(1, &gpu.model_bind_group, &[]);
                let texture_group = self
                    .texture_bind_groups
                    .get(&gpu.texture)
                    .unwrap_or(&self.texture_bind_groups[&DEFAULT_TEXTURE]);
                pass.set_bind_group(2, texture_group, &[]);
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                match &gpu.index_buffer {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                    }
                    None => pass.draw(0..gpu.vertex_count, 0..1),
                }
            }

            if selected.is_some() {
                pass.set_pipeline(&self.outline_pipeline);
                pass.set_bind_group(0, &self.outline_bind_group, &[]);
                pass.set_vertex_buffer(0, self.outline_vertices.slice(..));
                pass.set_index_buffer(self.outline_indices.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..24, 0, 0..1);
            }
        }

        self.render_egui(&mut encoder, &frame_view, egui_ctx, egui_output);

        let screenshot = self.pending_screenshot.take().map(|path| {
            let capture = self.copy_frame_to_buffer(&mut encoder, &frame.texture);
            (path, capture)
        });

        self.queue.submit(Some(encoder.finish()));
        frame.present();

        if let Some((path, (buffer, padded_row))) = screenshot {
            self.save_screenshot(&path, buffer, padded_row)?;
        }
        Ok(())
    }

    fn write_frame_uniforms(
        &self,
        camera: &CameraController,
        lights: &LightRig,
        view_proj: Mat4,
        light_space: Mat4,
    ) {
        let mut point_lights = [PointLightUniform {
            position: [0.0; 4],
            color: [0.0; 4],
        }; MAX_POINT_LIGHTS];
        let count = lights.point_lights.len().min(MAX_POINT_LIGHTS);
        for (slot, light) in point_lights.iter_mut().zip(&lights.point_lights) {
            slot.position = light.position.extend(1.0).to_array();
            slot.color = light.color.extend(1.0).to_array();
        }
        let uniforms = FrameUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            light_space: light_space.to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            ambient: lights.ambient.extend(1.0).to_array(),
            dir_light_dir: lights.directional.direction.extend(0.0).to_array(),
            dir_light_color: lights.directional.color.extend(1.0).to_array(),
            spot_pos: Vec4::from((lights.spot.position, SPOT_INNER_DEGREES.to_radians().cos()))
                .to_array(),
            spot_dir: Vec4::from((lights.spot.direction, SPOT_OUTER_DEGREES.to_radians().cos()))
                .to_array(),
            spot_color: lights.spot.color.extend(1.0).to_array(),
            point_count: [count as u32, 0, 0, 0],
            point_lights,
        };
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    fn render_egui(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
        egui_ctx: &egui::Context,
        egui_output: egui::FullOutput,
    ) {
        for (id, delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let primitives = egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };
        self.egui_renderer
            .update_buffers(&self.device, &self.queue, encoder, &primitives, &screen);
        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut pass.forget_lifetime(), &primitives, &screen);
        }
        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    fn copy_frame_to_buffer(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        texture: &wgpu::Texture,
    ) -> (wgpu::Buffer, u32) {
        let unpadded_row = self.config.width * 4;
        let padded_row = unpadded_row.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("screenshot readback"),
            size: (padded_row * self.config.height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(self.config.height),
                },
            },
            wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
        );
        (buffer, padded_row)
    }

    fn save_screenshot(
        &self,
        path: &std::path::Path,
        buffer: wgpu::Buffer,
        padded_row: u32,
    ) -> Result<(), RenderError> {
        let slice = buffer.slice(..);
        slice.map_async(wgpu::MapMode::Read, |_| {});
        self.device.poll(wgpu::Maintain::Wait);

        let unpadded_row = (self.config.width * 4) as usize;
        let data = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity(unpadded_row * self.config.height as usize);
        for row in data.chunks_exact(padded_row as usize) {
            pixels.extend_from_slice(&row[..unpadded_row]);
        }
        drop(data);
        buffer.unmap();

        let bgra = matches!(
            self.config.format,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
        );
        assets::encode_screenshot(path, self.config.width, self.config.height, &pixels, bgra)?;
        log::info!("saved screenshot to {}", path.display());
        Ok(())
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth buffer"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_object_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: Topology,
) -> wgpu::RenderPipeline {
    let wgpu_topology = match topology {
        Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        Topology::LineList => wgpu::PrimitiveTopology::LineList,
        Topology::PointList => wgpu::PrimitiveTopology::PointList,
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("object pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[mesh_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu_topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Flat kinds must stay visible from both sides.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_frame_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    frame_buffer: &wgpu::Buffer,
    shadow_view: &wgpu::TextureView,
    shadow_sampler: &wgpu::Sampler,
    sky_view: &wgpu::TextureView,
    sky_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("frame bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(shadow_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(shadow_sampler),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(sky_view),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::Sampler(sky_sampler),
            },
        ],
    })
}

fn create_sky_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sky_buffer: &wgpu::Buffer,
    sky_view: &wgpu::TextureView,
    sky_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sky bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: sky_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(sky_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sky_sampler),
            },
        ],
    })
}

fn create_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    faces: &[TextureImage; 6],
) -> wgpu::TextureView {
    let (width, height) = (faces[0].width, faces[0].height);
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("sky cubemap"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    for (layer, face) in faces.iter().enumerate() {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: layer as u32,
                },
                aspect: wgpu::TextureAspect::All,
            },
            &face.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }
    texture.create_view(&wgpu::TextureViewDescriptor {
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    })
}

/// Flat-color fallback cubemap: light sky above, dark ground below.
fn default_sky_faces() -> [TextureImage; 6] {
    let face = |color: Vec3| TextureImage {
        width: 1,
        height: 1,
        pixels: vec![
            (color.x * 255.0) as u8,
            (color.y * 255.0) as u8,
            (color.z * 255.0) as u8,
            255,
        ],
    };
    let horizon = Vec3::new(0.35, 0.45, 0.60);
    [
        face(horizon),
        face(horizon),
        face(Vec3::new(0.50, 0.65, 0.85)),
        face(Vec3::new(0.18, 0.16, 0.14)),
        face(horizon),
        face(horizon),
    ]
}
