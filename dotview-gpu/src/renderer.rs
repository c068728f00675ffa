use crate::buffers::GpuBuffers;
use crate::device::GpuContext;
use dotview_core::{Error, IndexSequence, Point3f, PointSet, PrimitiveMode, Result, TransformState};
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;
use winit::dpi::PhysicalSize;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Maps OpenGL clip depth (-1..1) onto wgpu clip depth (0..1)
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Vertex data for point set rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

impl PointVertex {
    pub fn from_point(point: &Point3f) -> Self {
        Self {
            position: [point.x, point.y, point.z],
        }
    }

    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// `model`, `view` and `projection` uniform block, column-major
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn from_state(state: &TransformState) -> Self {
        Self {
            model: (*state.model()).into(),
            view: (*state.view()).into(),
            projection: (OPENGL_TO_WGPU_MATRIX * state.projection()).into(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background_color: [f64; 4],
    pub enable_depth_test: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [1.0, 1.0, 1.0, 1.0],
            enable_depth_test: true,
        }
    }
}

/// Rasterizer topology for a primitive mode
pub fn primitive_topology(mode: PrimitiveMode) -> wgpu::PrimitiveTopology {
    match mode {
        PrimitiveMode::Points => wgpu::PrimitiveTopology::PointList,
        PrimitiveMode::Lines => wgpu::PrimitiveTopology::LineList,
    }
}

/// Convert a point set to render vertices
pub fn point_set_to_vertices(points: &PointSet) -> Vec<PointVertex> {
    points.iter().map(PointVertex::from_point).collect()
}

/// Point set renderer with one pipeline per primitive mode
pub struct PointSetRenderer<'window> {
    // Buffers are declared first so they are released before the device.
    buffers: Option<GpuBuffers>,
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'window>,
    pub surface_config: wgpu::SurfaceConfiguration,
    points_pipeline: wgpu::RenderPipeline,
    lines_pipeline: wgpu::RenderPipeline,
    transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    pub config: RenderConfig,
}

impl<'window> PointSetRenderer<'window> {
    /// Create a renderer presenting to `target`
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'window>>,
        size: PhysicalSize<u32>,
        config: RenderConfig,
    ) -> Result<Self> {
        let (gpu_context, surface) = GpuContext::with_surface(target).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let transform_buffer = gpu_context.create_buffer_init(
            "Transform Buffer",
            &[TransformUniform::from_state(&TransformState::new())],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let transform_bind_group_layout = gpu_context.create_bind_group_layout(
            "transform_bind_group_layout",
            &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        );

        let transform_bind_group = gpu_context.create_bind_group(
            "transform_bind_group",
            &transform_bind_group_layout,
            &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        );

        let shader = gpu_context.create_shader_module(
            "Point Set Shader",
            include_str!("shaders/point_set.wgsl"),
        );

        let pipeline_layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Set Render Pipeline Layout"),
            bind_group_layouts: &[&transform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let create_pipeline = |mode: PrimitiveMode| {
            gpu_context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(match mode {
                    PrimitiveMode::Points => "Point Set Points Pipeline",
                    PrimitiveMode::Lines => "Point Set Lines Pipeline",
                }),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[PointVertex::desc()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: primitive_topology(mode),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: config.enable_depth_test.then(|| wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            })
        };
        let points_pipeline = create_pipeline(PrimitiveMode::Points);
        let lines_pipeline = create_pipeline(PrimitiveMode::Lines);

        let depth_view = create_depth_view(&gpu_context.device, &surface_config);

        Ok(Self {
            buffers: None,
            gpu_context,
            surface,
            surface_config,
            points_pipeline,
            lines_pipeline,
            transform_buffer,
            transform_bind_group,
            depth_view,
            config,
        })
    }

    /// Upload a point set together with its index sequence
    pub fn upload(&mut self, points: &PointSet, indices: &IndexSequence) -> Result<()> {
        // Release the previous buffers before allocating their replacements.
        self.buffers = None;
        self.buffers = Some(GpuBuffers::new(&self.gpu_context, points, indices)?);
        Ok(())
    }

    /// Replace only the index buffer after a primitive mode change
    pub fn upload_indices(&mut self, indices: &IndexSequence) -> Result<()> {
        let buffers = self
            .buffers
            .as_mut()
            .ok_or_else(|| Error::Visualization("No point set uploaded".to_string()))?;
        buffers.replace_indices(&self.gpu_context, indices)
    }

    /// Write the current model, view and projection matrices
    pub fn update_transform(&mut self, state: &TransformState) {
        let uniform = TransformUniform::from_state(state);
        self.gpu_context
            .queue
            .write_buffer(&self.transform_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Resize renderer surface
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu_context.device, &self.surface_config);
            self.depth_view = create_depth_view(&self.gpu_context.device, &self.surface_config);
        }
    }

    fn pipeline(&self, mode: PrimitiveMode) -> &wgpu::RenderPipeline {
        match mode {
            PrimitiveMode::Points => &self.points_pipeline,
            PrimitiveMode::Lines => &self.lines_pipeline,
        }
    }

    /// Clear, draw the uploaded point set and present
    pub fn render(&mut self) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.gpu_context.device, &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {:?}", e))),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.gpu_context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Point Set Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Set Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background_color[0],
                            g: self.config.background_color[1],
                            b: self.config.background_color[2],
                            a: self.config.background_color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: self.config.enable_depth_test.then(|| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(buffers) = &self.buffers {
                if let Some((vertex_buffer, index_buffer)) = buffers.drawable() {
                    render_pass.set_pipeline(self.pipeline(buffers.mode()));
                    render_pass.set_bind_group(0, &self.transform_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                    render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..buffers.index_count(), 0, 0..1);
                }
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, surface_config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: surface_config.width,
            height: surface_config.height,
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
