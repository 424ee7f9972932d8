use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{SurfaceSize, Vec2};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{ubo_min_binding_size, QuadVertex, QUAD_INDICES, QUAD_VERTICES};

/// WGSL source of the noise field program (vertex + fragment stage).
pub const FERROFLUID_WGSL: &str = include_str!("shaders/ferrofluid.wgsl");

/// Uniform block shared with `ferrofluid.wgsl`.
///
/// Layout matches the WGSL struct: `time` at 0, `mouse` at 8, `resolution`
/// at 16, padded to 32 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct FerrofluidUniform {
    pub time: f32,
    pub _pad0: f32,
    pub mouse: [f32; 2],
    pub resolution: [f32; 2],
    pub _pad1: [f32; 2],
}

/// Full-screen noise field renderer.
///
/// The host writes `time` and `mouse` every frame and `resolution` on resize;
/// [`render`](Self::render) uploads the block once and issues one draw.
#[derive(Default)]
pub struct FerrofluidRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    uniforms: FerrofluidUniform,
    warned_no_resolution: bool,
}

impl FerrofluidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current CPU-side copy of the uniform block.
    pub fn uniforms(&self) -> &FerrofluidUniform {
        &self.uniforms
    }

    /// Seconds since the first frame.
    pub fn set_time(&mut self, seconds: f32) {
        self.uniforms.time = seconds;
    }

    /// Pointer position in NDC.
    pub fn set_mouse(&mut self, ndc: Vec2) {
        self.uniforms.mouse = ndc.to_array();
    }

    /// Surface size in physical pixels.
    ///
    /// Zero-sized surfaces (minimized windows) are ignored so the shader never
    /// divides by zero; the previous resolution stays in effect.
    pub fn set_resolution(&mut self, size: SurfaceSize) {
        if !size.is_valid() {
            log::debug!("ignoring {}x{} resolution", size.width, size.height);
            return;
        }
        self.uniforms.resolution = size.to_array();
    }

    /// True once a valid resolution has been written.
    pub fn has_resolution(&self) -> bool {
        self.uniforms.resolution[0] > 0.0 && self.uniforms.resolution[1] > 0.0
    }

    /// Uploads the uniform block and draws the full-screen quad into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if !self.has_resolution() {
            if !self.warned_no_resolution {
                log::warn!("FerrofluidRenderer: no resolution yet; skipping draw");
                self.warned_no_resolution = true;
            }
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&self.uniforms));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ferrofluid pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ferrofluid shader"),
            source: wgpu::ShaderSource::Wgsl(FERROFLUID_WGSL.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("ferrofluid bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: ubo_min_binding_size::<FerrofluidUniform>(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("ferrofluid pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ferrofluid pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    // Opaque output, alpha is always 1.
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("ferrofluid pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ferrofluid uniform ubo"),
            size: std::mem::size_of::<FerrofluidUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ferrofluid bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ferrofluid quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ferrofluid quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}
