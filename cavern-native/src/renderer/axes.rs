use wgpu::util::DeviceExt;

use super::depth::depth_state;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

const AXIS_LENGTH: f32 = 1.0;

const COL_X: [f32; 3] = [1.0, 0.2, 0.2]; // lateral
const COL_Y: [f32; 3] = [0.2, 1.0, 0.2]; // up
const COL_Z: [f32; 3] = [0.2, 0.4, 1.0]; // forward, arc centre

//
// ──────────────────────────────────────────────────────────────
//   Line vertex layout: [x, y, z,  r, g, b]  (lines.wgsl)
// ──────────────────────────────────────────────────────────────
//

pub type LineVertex = [f32; 6];

pub fn line_vertex(pos: [f32; 3], col: [f32; 3]) -> LineVertex
{
  [pos[0], pos[1], pos[2], col[0], col[1], col[2]]
}

//
// ──────────────────────────────────────────────────────────────
//   AxesMesh: screen-local frame gizmo at the footprint centre
// ──────────────────────────────────────────────────────────────
//

pub struct AxesMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub vertex_count: u32,
}

impl AxesMesh
{
  pub fn create(device: &wgpu::Device) -> Self
  {
    let vertices = build_vertices();

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Axes Vertex Buffer"),
      contents: bytemuck::cast_slice(&vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    Self { vertex_buffer, vertex_count: vertices.len() as u32 }
  }
}

fn build_vertices() -> Vec<LineVertex>
{
  let o = [0.0_f32; 3];

  vec![
    line_vertex(o, COL_X),
    line_vertex([AXIS_LENGTH, 0.0, 0.0], COL_X),
    line_vertex(o, COL_Y),
    line_vertex([0.0, AXIS_LENGTH, 0.0], COL_Y),
    line_vertex(o, COL_Z),
    line_vertex([0.0, 0.0, AXIS_LENGTH], COL_Z),
  ]
}

//
// ──────────────────────────────────────────────────────────────
//   Line pipeline, shared by the axes and the debug overlay
// ──────────────────────────────────────────────────────────────
//

pub fn create_line_pipeline(
  device: &wgpu::Device,
  config: &wgpu::SurfaceConfiguration,
  view_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Line Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/lines.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Line Pipeline Layout"),
    bind_group_layouts: &[view_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Line Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
          0 => Float32x3,  // position
          1 => Float32x3,  // colour
        ],
      }],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format: config.format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::LineList,
      ..wgpu::PrimitiveState::default()
    },
    depth_stencil: Some(depth_state()),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}
