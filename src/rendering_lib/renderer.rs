// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use fov_magic::geometry::Point2;

use super::vertex::Vertex;
use crate::engine_lib::camera::ViewCamera;
use crate::engine_lib::coverage_state::CoverageState;

const INITIAL_MAX_VERTICES: usize = 8 * 1024;
const INITIAL_MAX_INDICES: usize = 3 * INITIAL_MAX_VERTICES;

const BOUNDARY_COLOR: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
const OTHER_LINE_COLOR: [f32; 4] = [0.45, 0.45, 0.5, 1.0];
const EDGE_RAY_COLOR: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
const COVERAGE_ALPHA: f32 = 0.35;
const LINE_WIDTH_PX: f32 = 2.0;
const MARKER_SIZE_PX: f32 = 10.0;

const CAMERA_PALETTE: [[f32; 3]; 4] = [
    [0.20, 0.55, 0.95],
    [0.95, 0.35, 0.30],
    [0.30, 0.80, 0.40],
    [0.75, 0.40, 0.90],
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenDimensionsUniform {
    width: f32,
    height: f32,
    _padding1: f32,
    _padding2: f32,
}

/// Mixes `rgb` with white; `factor` 0 keeps the color, 1 gives white.
fn lighten(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    let f = factor.clamp(0.0, 1.0);
    [
        rgb[0] * (1.0 - f) + f,
        rgb[1] * (1.0 - f) + f,
        rgb[2] * (1.0 - f) + f,
    ]
}

/// Color of the n-th camera: palette entries repeat, lighter on each pass.
fn camera_color(index: usize, alpha: f32) -> [f32; 4] {
    let base = CAMERA_PALETTE[index % CAMERA_PALETTE.len()];
    let pass = (index / CAMERA_PALETTE.len()) as f32;
    let [r, g, b] = lighten(base, (pass * 0.2).min(0.8));
    [r, g, b, alpha]
}

pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,

    frame_vertices: Vec<Vertex>,
    frame_indices: Vec<u32>,

    screen_uniform_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        initial_screen_width: f32,
        initial_screen_height: f32,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Coverage Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let screen_uniform_data = ScreenDimensionsUniform {
            width: initial_screen_width,
            height: initial_screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        let screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Dimensions Uniform Buffer"),
            contents: bytemuck::bytes_of(&screen_uniform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("screen_dimensions_bind_group_layout"),
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
            label: Some("screen_dimensions_bind_group"),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Coverage Pipeline Layout"),
            bind_group_layouts: &[&screen_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Coverage Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(device, INITIAL_MAX_VERTICES);
        let index_buffer = Self::create_index_buffer(device, INITIAL_MAX_INDICES);

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            vertex_capacity: INITIAL_MAX_VERTICES,
            index_capacity: INITIAL_MAX_INDICES,
            frame_vertices: Vec::with_capacity(INITIAL_MAX_VERTICES),
            frame_indices: Vec::with_capacity(INITIAL_MAX_INDICES),
            screen_uniform_buffer,
            screen_bind_group,
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Coverage Vertex Buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_index_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Coverage Index Buffer"),
            size: (capacity * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Triangle fan around `points[0]`. Coverage polygons are star-shaped
    /// around the camera, so the fan fills them exactly.
    fn add_fan_to_frame(&mut self, points: &[[f32; 2]], color: [f32; 4]) {
        if points.len() < 3 {
            return;
        }
        let start = self.frame_vertices.len() as u32;
        self.frame_vertices.extend(points.iter().map(|&p| Vertex::new(p, color)));
        for i in 1..(points.len() as u32 - 1) {
            self.frame_indices.extend_from_slice(&[start, start + i, start + i + 1]);
        }
    }

    /// A line as a quad of `width` pixels.
    fn add_line_to_frame(&mut self, a: [f32; 2], b: [f32; 2], width: f32, color: [f32; 4]) {
        let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
        let length = (dx * dx + dy * dy).sqrt();
        if length < f32::EPSILON {
            return;
        }
        let (nx, ny) = (-dy / length * width / 2.0, dx / length * width / 2.0);
        let corners = [
            [a[0] + nx, a[1] + ny],
            [b[0] + nx, b[1] + ny],
            [b[0] - nx, b[1] - ny],
            [a[0] - nx, a[1] - ny],
        ];
        self.add_fan_to_frame(&corners, color);
    }

    fn add_marker_to_frame(&mut self, center: [f32; 2], size: f32, color: [f32; 4]) {
        let h = size / 2.0;
        let corners = [
            [center[0] - h, center[1] - h],
            [center[0] + h, center[1] - h],
            [center[0] + h, center[1] + h],
            [center[0] - h, center[1] + h],
        ];
        self.add_fan_to_frame(&corners, color);
    }

    fn build_frame(&mut self, state: &CoverageState, view: &ViewCamera, screen_width: f32, screen_height: f32) {
        self.frame_vertices.clear();
        self.frame_indices.clear();
        let to_screen = |p: &Point2| view.world_to_screen(p, screen_width, screen_height);

        for (index, coverage) in state.coverage().iter().enumerate() {
            let alpha = if index == state.selected() { COVERAGE_ALPHA + 0.2 } else { COVERAGE_ALPHA };
            let points: Vec<[f32; 2]> = coverage.polygon.points().iter().map(to_screen).collect();
            self.add_fan_to_frame(&points, camera_color(index, alpha));
        }

        let boundary_style = &state.scene().settings.boundary_style;
        for line in &state.scene().detail_lines {
            let color = if &line.style == boundary_style { BOUNDARY_COLOR } else { OTHER_LINE_COLOR };
            self.add_line_to_frame(to_screen(&line.segment.start), to_screen(&line.segment.end), LINE_WIDTH_PX, color);
        }

        if let Some((origin, left, right)) = state.selected_edges() {
            let o = to_screen(&origin);
            self.add_line_to_frame(o, to_screen(&left), 1.0, EDGE_RAY_COLOR);
            self.add_line_to_frame(o, to_screen(&right), 1.0, EDGE_RAY_COLOR);
        }

        for (index, coverage) in state.coverage().iter().enumerate() {
            let size = if index == state.selected() { MARKER_SIZE_PX * 1.5 } else { MARKER_SIZE_PX };
            self.add_marker_to_frame(to_screen(&coverage.origin), size, camera_color(index, 1.0));
        }
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device) {
        if self.frame_vertices.len() > self.vertex_capacity {
            self.vertex_capacity = self.frame_vertices.len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(device, self.vertex_capacity);
            log::debug!("grew vertex buffer to {} vertices", self.vertex_capacity);
        }
        if self.frame_indices.len() > self.index_capacity {
            self.index_capacity = self.frame_indices.len().next_power_of_two();
            self.index_buffer = Self::create_index_buffer(device, self.index_capacity);
            log::debug!("grew index buffer to {} indices", self.index_capacity);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render_coverage(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        state: &CoverageState,
        view: &ViewCamera,
        screen_width: f32,
        screen_height: f32,
        clear_color: wgpu::Color,
    ) {
        let screen_uniform_data = ScreenDimensionsUniform {
            width: screen_width,
            height: screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        queue.write_buffer(&self.screen_uniform_buffer, 0, bytemuck::bytes_of(&screen_uniform_data));

        self.build_frame(state, view, screen_width, screen_height);
        self.ensure_capacity(device);

        if !self.frame_indices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.frame_vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.frame_indices));
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Coverage Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if !self.frame_indices.is_empty() {
            let vertex_bytes = (self.frame_vertices.len() * std::mem::size_of::<Vertex>()) as u64;
            let index_bytes = (self.frame_indices.len() * std::mem::size_of::<u32>()) as u64;

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.screen_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_bytes));
            render_pass.set_index_buffer(self.index_buffer.slice(..index_bytes), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.frame_indices.len() as u32, 0, 0..1);
        }
    }
}
