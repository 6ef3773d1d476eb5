use crate::rig::Eye;
use crate::screen::ScreenGeometry;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

/// Roughly one panel every this many degrees of arc.
const DEGREES_PER_PANEL: f32 = 10.0;

//
// ──────────────────────────────────────────────────────────────
//   Vertex layout (GPU side)
//
//   position : vec3<f32>  → 12 bytes
//   normal   : vec3<f32>  → 12 bytes
//   uv       : vec2<f32>  →  8 bytes
//   Total: 32 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenVertex
{
  pub position: [f32; 3],
  pub normal: [f32; 3],
  pub uv: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<ScreenVertex>() == 32);

//
// ──────────────────────────────────────────────────────────────
//   ScreenMesh
//
//   Inner surface of the curved screen. Vertices come in
//   (top, bottom) pairs per angular sample. Triangles wind
//   clockwise seen from inside in the left-handed screen frame;
//   render without back-face culling.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenMesh
{
  pub vertices: Vec<ScreenVertex>,
  pub indices: Vec<u32>,
}

impl ScreenMesh
{
  pub fn panel_count(&self) -> usize
  {
    (self.vertices.len() / 2).saturating_sub(1)
  }

  pub fn triangle_count(&self) -> usize
  {
    self.indices.len() / 3
  }
}

pub fn panel_count(angle: f32) -> usize
{
  ((angle / DEGREES_PER_PANEL) as usize).max(1)
}

/// Build the screen surface. The eye picks which half of a stacked stereo
/// texture the UVs sample: left eye on top (v 0.5..1), right eye below.
pub fn build_screen_mesh(screen: &ScreenGeometry, eye: Eye) -> ScreenMesh
{
  let panels = panel_count(screen.angle());

  let (top_v, bottom_v) = match eye
  {
    Eye::Left => (1.0, 0.5),
    Eye::Right => (0.5, 0.0),
  };

  let top_y = screen.top();
  let bottom_y = screen.elevation();

  let mut vertices = Vec::with_capacity((panels + 1) * 2);

  for i in 0..=panels
  {
    let ratio = i as f32 / panels as f32;

    // Angle 0 points down +Z, not +X.
    let theta = ((ratio - 0.5) * screen.angle()).to_radians();
    let (dir_x, dir_z) = (theta.sin(), theta.cos());

    let x = screen.radius() * dir_x;
    let z = screen.radius() * dir_z;
    let normal = [dir_x, 0.0, dir_z];

    vertices.push(ScreenVertex { position: [x, top_y, z], normal, uv: [ratio, top_v] });
    vertices.push(ScreenVertex { position: [x, bottom_y, z], normal, uv: [ratio, bottom_v] });
  }

  let mut indices = Vec::with_capacity(panels * 6);

  for i in 0..panels as u32
  {
    let top = i * 2;

    indices.extend_from_slice(&[top, top + 2, top + 1]);
    indices.extend_from_slice(&[top + 1, top + 2, top + 3]);
  }

  ScreenMesh { vertices, indices }
}

//
// ──────────────────────────────────────────────────────────────
//   Mesh cache
// ──────────────────────────────────────────────────────────────
//

/// Keeps the last built mesh until the geometry or eye change.
#[derive(Debug, Default)]
pub struct ScreenMeshCache
{
  key: Option<(ScreenGeometry, Eye)>,
  mesh: Option<ScreenMesh>,
  builds: usize,
}

impl ScreenMeshCache
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn get(&mut self, screen: &ScreenGeometry, eye: Eye) -> &ScreenMesh
  {
    let key = (*screen, eye);

    if self.key != Some(key) || self.mesh.is_none()
    {
      let mesh = build_screen_mesh(screen, eye);
      log::debug!(
        "rebuilt screen mesh: {} panels, {} vertices, {:?} eye",
        mesh.panel_count(),
        mesh.vertices.len(),
        eye
      );

      self.key = Some(key);
      self.builds += 1;
      self.mesh = Some(mesh);
    }

    self.mesh.get_or_insert_with(|| build_screen_mesh(screen, eye))
  }

  /// Number of rebuilds so far.
  pub fn builds(&self) -> usize
  {
    self.builds
  }

  pub fn invalidate(&mut self)
  {
    self.key = None;
  }
}
