use cavern_core::{ScreenMesh, ScreenVertex};
use wgpu::util::DeviceExt;

use super::depth::depth_state;

//
// ──────────────────────────────────────────────────────────────
//   ScreenMeshGpu
//
//   GPU copy of the curved screen surface. Re-created whenever
//   the geometry or the previewed eye changes.
// ──────────────────────────────────────────────────────────────
//

pub struct ScreenMeshGpu
{
  pub vertex_buffer: wgpu::Buffer,
  pub index_buffer: wgpu::Buffer,
  pub index_count: u32,
}

impl ScreenMeshGpu
{
  pub fn create(device: &wgpu::Device, mesh: &ScreenMesh) -> Self
  {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Screen Vertex Buffer"),
      contents: bytemuck::cast_slice(&mesh.vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Screen Index Buffer"),
      contents: bytemuck::cast_slice(&mesh.indices),
      usage: wgpu::BufferUsages::INDEX,
    });

    Self { vertex_buffer, index_buffer, index_count: mesh.indices.len() as u32 }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Pipeline
// ──────────────────────────────────────────────────────────────
//

pub fn create_screen_pipeline(
  device: &wgpu::Device,
  config: &wgpu::SurfaceConfiguration,
  view_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Screen Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/screen.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Screen Pipeline Layout"),
    bind_group_layouts: &[view_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Screen Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ScreenVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
          0 => Float32x3,  // position
          1 => Float32x3,  // normal
          2 => Float32x2,  // uv
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
    // The inside of the screen is what the viewer sees; the orbit camera
    // mostly sees the outside. Draw both.
    primitive: wgpu::PrimitiveState { cull_mode: None, ..wgpu::PrimitiveState::default() },
    depth_stencil: Some(depth_state()),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}
