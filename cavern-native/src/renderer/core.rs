use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use cavern_core::{FaceMask, FramePlan, ScreenGeometry, ScreenMesh};
use glam::Vec3;
use winit::window::Window;

use crate::camera::{Camera, ViewUniform};

use super::axes::{create_line_pipeline, AxesMesh};
use super::debug::DebugMesh;
use super::depth::DepthTarget;
use super::screen::{create_screen_pipeline, ScreenMeshGpu};

const CLEAR: wgpu::Color = wgpu::Color { r: 0.02, g: 0.02, b: 0.03, a: 1.0 };

pub struct Renderer
{
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthTarget,
  view_buffer: wgpu::Buffer,
  view_bind_group: wgpu::BindGroup,

  screen_pipeline: wgpu::RenderPipeline,
  line_pipeline: wgpu::RenderPipeline,

  screen: ScreenMeshGpu,
  panels: u32,
  axes: AxesMesh,
  debug: DebugMesh,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>, camera: &Arc<Mutex<Camera>>, mesh: &ScreenMesh) -> Result<Self>
  {
    let size = window.inner_size();

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window).context("creating window surface")?;

    let adapter = request_adapter(&instance, &surface).await?;
    let (device, queue) = request_device(&adapter).await?;

    let config = configure_surface(size.width, size.height, &surface, &adapter, &device)?;
    let depth = DepthTarget::create(&device, &config);

    let (view_buffer, view_bind_group, view_bgl) = create_view_resources(&device);

    // Initial view, before the first frame plan exists
    if let Ok(cam) = camera.lock()
    {
      let uniform = ViewUniform::new(&cam, Vec3::ZERO, FaceMask::EMPTY, mesh.panel_count() as u32);
      queue.write_buffer(&view_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    let screen_pipeline = create_screen_pipeline(&device, &config, &view_bgl);
    let line_pipeline = create_line_pipeline(&device, &config, &view_bgl);

    let screen = ScreenMeshGpu::create(&device, mesh);
    let axes = AxesMesh::create(&device);
    let debug = DebugMesh::create(&device);

    log::info!("renderer ready: {}x{} {:?}", config.width, config.height, config.format);

    Ok(Self {
      surface,
      device,
      queue,
      config,
      depth,
      view_buffer,
      view_bind_group,
      screen_pipeline,
      line_pipeline,
      screen,
      panels: mesh.panel_count() as u32,
      axes,
      debug,
    })
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);

    if !self.depth.matches(&self.config)
    {
      self.depth = DepthTarget::create(&self.device, &self.config);
    }
  }

  pub fn update_view(&mut self, camera: &Camera, head: Vec3, faces: FaceMask)
  {
    let uniform = ViewUniform::new(camera, head, faces, self.panels);
    self.queue.write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(&uniform));
  }

  pub fn upload_screen_mesh(&mut self, mesh: &ScreenMesh)
  {
    self.screen = ScreenMeshGpu::create(&self.device, mesh);
    self.panels = mesh.panel_count() as u32;
  }

  pub fn update_debug(&mut self, plan: &FramePlan, screen: &ScreenGeometry)
  {
    self.debug.update(&self.queue, plan, screen);
  }

  pub fn render(&mut self) -> Result<()>
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        self.surface.configure(&self.device, &self.config);
        return Ok(());
      }
      Err(wgpu::SurfaceError::Timeout) =>
      {
        log::warn!("surface timed out, skipping frame");
        return Ok(());
      }
      Err(e) => return Err(anyhow!("acquiring frame: {e}")),
    };

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Preview Encoder") });

    self.record_pass(&mut encoder, &view);

    self.queue.submit(Some(encoder.finish()));
    frame.present();
    Ok(())
  }

  fn record_pass(&self, encoder: &mut wgpu::CommandEncoder, color_view: &wgpu::TextureView)
  {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
      label: Some("Preview Pass"),
      color_attachments: &[Some(wgpu::RenderPassColorAttachment {
        view: color_view,
        depth_slice: None,
        resolve_target: None,
        ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR), store: wgpu::StoreOp::Store },
      })],
      depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
        view: &self.depth.view,
        depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
        stencil_ops: None,
      }),
      ..Default::default()
    });

    pass.set_bind_group(0, &self.view_bind_group, &[]);

    pass.set_pipeline(&self.screen_pipeline);
    pass.set_vertex_buffer(0, self.screen.vertex_buffer.slice(..));
    pass.set_index_buffer(self.screen.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..self.screen.index_count, 0, 0..1);

    pass.set_pipeline(&self.line_pipeline);
    pass.set_vertex_buffer(0, self.axes.vertex_buffer.slice(..));
    pass.draw(0..self.axes.vertex_count, 0..1);

    if self.debug.vertex_count > 0
    {
      pass.set_vertex_buffer(0, self.debug.vertex_buffer.slice(..));
      pass.draw(0..self.debug.vertex_count, 0..1);
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(instance: &wgpu::Instance, surface: &wgpu::Surface<'_>) -> Result<wgpu::Adapter>
{
  instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .context("no suitable GPU adapter")
}

async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)>
{
  adapter
    .request_device(&wgpu::DeviceDescriptor {
      label: Some("Cavern Device"),
      required_features: wgpu::Features::empty(),
      required_limits: wgpu::Limits::default(),
      ..Default::default()
    })
    .await
    .context("creating GPU device")
}

fn configure_surface(
  width: u32,
  height: u32,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> Result<wgpu::SurfaceConfiguration>
{
  let config = surface
    .get_default_config(adapter, width.max(1), height.max(1))
    .context("surface not supported by adapter")?;

  surface.configure(device, &config);
  Ok(config)
}

fn create_view_resources(device: &wgpu::Device) -> (wgpu::Buffer, wgpu::BindGroup, wgpu::BindGroupLayout)
{
  let buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("View Buffer"),
    size: std::mem::size_of::<ViewUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("View BGL"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("View BG"),
    layout: &layout,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: buffer.as_entire_binding() }],
  });

  (buffer, bind_group, layout)
}
