use cavern_core::boundary::find_boundaries;
use cavern_core::{FramePlan, ScreenGeometry};
use glam::{Vec2, Vec3};

use super::axes::{line_vertex, LineVertex};

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

const HEAD_ARM: f32 = 0.15;
const CAPTURE_ARM: f32 = 0.05;
const BOUNDARY_ARM: f32 = 0.1;
const FOOTPRINT_SEGMENTS: usize = 64;

const COL_HEAD: [f32; 3] = [1.0, 1.0, 1.0]; // white
const COL_CAPTURE: [f32; 3] = [1.0, 0.5, 0.1]; // orange
const COL_BOUNDARY: [f32; 3] = [1.0, 1.0, 0.2]; // yellow
const COL_DIAGONAL: [f32; 3] = [0.5, 0.5, 0.5]; // grey
const COL_FOOTPRINT: [f32; 3] = [0.3, 0.6, 0.6]; // teal

// head cross 6 + 4 capture crosses 24 + 4 boundary crosses 24
// + 4 diagonal segments 8 + footprint 128 = 190
const MAX_VERTS: usize = 256;

//
// ──────────────────────────────────────────────────────────────
//   DebugMesh
//
//   Floor-level overlay of what the face selector sees: the
//   clamped head, the stereo capture points, the footprint
//   circle and where the head's diagonals cross it.
// ──────────────────────────────────────────────────────────────
//

pub struct DebugMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub vertex_count: u32,
}

impl DebugMesh
{
  pub fn create(device: &wgpu::Device) -> Self
  {
    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
      label: Some("Debug Vertex Buffer"),
      size: (MAX_VERTS * std::mem::size_of::<LineVertex>()) as u64,
      usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
      mapped_at_creation: false,
    });

    Self { vertex_buffer, vertex_count: 0 }
  }

  pub fn update(&mut self, queue: &wgpu::Queue, plan: &FramePlan, screen: &ScreenGeometry)
  {
    let mut verts = build_overlay(plan, screen);
    verts.truncate(MAX_VERTS);

    self.vertex_count = verts.len() as u32;
    queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&verts));
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Geometry
// ──────────────────────────────────────────────────────────────
//

pub fn build_overlay(plan: &FramePlan, screen: &ScreenGeometry) -> Vec<LineVertex>
{
  let mut verts = Vec::with_capacity(MAX_VERTS);
  let head = plan.head;

  push_cross(&mut verts, head, HEAD_ARM, COL_HEAD);

  for render in &plan.renders
  {
    push_cross(&mut verts, head + render.offset, CAPTURE_ARM, COL_CAPTURE);
  }

  let floor_head = Vec2::new(head.x, head.z);
  let bounds = find_boundaries(screen.radius(), floor_head);
  let on_floor = |rel: Vec2| Vec3::new(floor_head.x + rel.x, 0.0, floor_head.y + rel.y);

  let mut hits = Vec::with_capacity(4);
  if !bounds.rising.is_empty()
  {
    hits.push(bounds.south_west);
    hits.push(bounds.north_east);
  }
  if !bounds.falling.is_empty()
  {
    hits.push(bounds.north_west);
    hits.push(bounds.south_east);
  }

  let foot = on_floor(Vec2::ZERO);
  for rel in hits
  {
    let p = on_floor(rel);
    push_cross(&mut verts, p, BOUNDARY_ARM, COL_BOUNDARY);
    verts.push(line_vertex(foot.to_array(), COL_DIAGONAL));
    verts.push(line_vertex(p.to_array(), COL_DIAGONAL));
  }

  push_circle(&mut verts, screen.radius(), COL_FOOTPRINT);

  verts
}

fn push_cross(verts: &mut Vec<LineVertex>, centre: Vec3, arm: f32, col: [f32; 3])
{
  for axis in [Vec3::X, Vec3::Y, Vec3::Z]
  {
    verts.push(line_vertex((centre - axis * arm).to_array(), col));
    verts.push(line_vertex((centre + axis * arm).to_array(), col));
  }
}

fn push_circle(verts: &mut Vec<LineVertex>, radius: f32, col: [f32; 3])
{
  let point = |i: usize| {
    let theta = i as f32 / FOOTPRINT_SEGMENTS as f32 * std::f32::consts::TAU;
    [radius * theta.sin(), 0.0, radius * theta.cos()]
  };

  for i in 0..FOOTPRINT_SEGMENTS
  {
    verts.push(line_vertex(point(i), col));
    verts.push(line_vertex(point(i + 1), col));
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use cavern_core::rig::plan_frame;
  use cavern_core::{RigConfig, StereoMode};

  fn overlay(config: &RigConfig, head: Vec3) -> Vec<LineVertex>
  {
    let screen = config.screen().unwrap();
    let plan = plan_frame(config, &screen, head);
    build_overlay(&plan, &screen)
  }

  #[test]
  fn stereo_overlay_fits_the_buffer()
  {
    let config = RigConfig { stereo_mode: StereoMode::Stereo, ..RigConfig::default() };
    let verts = overlay(&config, Vec3::new(0.5, 1.6, -0.3));

    // every part drawn: head, 4 captures, 4 hits with diagonals, circle
    assert_eq!(verts.len(), 6 + 24 + 4 * 8 + 2 * FOOTPRINT_SEGMENTS);
    assert!(verts.len() <= MAX_VERTS);
    assert_eq!(verts.len() % 2, 0);
  }

  #[test]
  fn boundary_crosses_sit_on_the_footprint()
  {
    let config = RigConfig::default();
    let verts = overlay(&config, Vec3::new(0.4, 1.6, 0.9));

    // mono: head cross then one capture cross, then the first boundary cross
    let start = 12;
    let a = Vec3::from_slice(&verts[start][..3]);
    let b = Vec3::from_slice(&verts[start + 1][..3]);
    let centre = (a + b) * 0.5;

    assert!(centre.y.abs() < 1e-5);
    assert!((Vec2::new(centre.x, centre.z).length() - config.radius).abs() < 1e-3);
  }

  #[test]
  fn footprint_circle_is_closed()
  {
    let config = RigConfig::default();
    let verts = overlay(&config, Vec3::new(0.0, 1.6, 0.0));

    let first = Vec3::from_slice(&verts[verts.len() - 2 * FOOTPRINT_SEGMENTS][..3]);
    let last = Vec3::from_slice(&verts[verts.len() - 1][..3]);
    assert!((first - last).length() < 1e-4);
  }
}
