pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth target sized to the surface. Recreated on resize.
pub struct DepthTarget
{
  pub view: wgpu::TextureView,
  width: u32,
  height: u32,
}

impl DepthTarget
{
  pub fn create(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Self
  {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
      label: Some("Depth Target"),
      size: wgpu::Extent3d { width: config.width, height: config.height, depth_or_array_layers: 1 },
      mip_level_count: 1,
      sample_count: 1,
      dimension: wgpu::TextureDimension::D2,
      format: DEPTH_FORMAT,
      usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
      view_formats: &[],
    });

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    Self { view, width: config.width, height: config.height }
  }

  pub fn matches(&self, config: &wgpu::SurfaceConfiguration) -> bool
  {
    self.width == config.width && self.height == config.height
  }
}

/// Depth state shared by every pipeline in the preview.
pub fn depth_state() -> wgpu::DepthStencilState
{
  wgpu::DepthStencilState {
    format: DEPTH_FORMAT,
    depth_write_enabled: true,
    depth_compare: wgpu::CompareFunction::Less,
    stencil: wgpu::StencilState::default(),
    bias: wgpu::DepthBiasState::default(),
  }
}
