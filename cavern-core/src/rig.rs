use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::RigConfig;
use crate::face_mask::FaceMask;
use crate::face_select::{select_faces, FaceSelection, StereoMode};
use crate::screen::ScreenGeometry;

//
// ──────────────────────────────────────────────────────────────
//   Eyes, slots, resolutions
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eye
{
  Left,
  Right,
}

/// One of the four cubemaps captured around the head. North doubles as
/// the mono cubemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubemapSlot
{
  North,
  South,
  East,
  West,
}

impl CubemapSlot
{
  pub const ALL: [CubemapSlot; 4] =
    [CubemapSlot::North, CubemapSlot::South, CubemapSlot::East, CubemapSlot::West];

  pub fn index(self) -> usize
  {
    self as usize
  }

  /// Capture point relative to the head for a given IPD.
  pub fn offset(self, ipd: f32) -> Vec3
  {
    let half = ipd * 0.5;

    match self
    {
      CubemapSlot::North => Vec3::new(0.0, 0.0, half),
      CubemapSlot::South => Vec3::new(0.0, 0.0, -half),
      CubemapSlot::East => Vec3::new(half, 0.0, 0.0),
      CubemapSlot::West => Vec3::new(-half, 0.0, 0.0),
    }
  }

  /// Eye the host camera renders this capture as.
  pub fn eye(self) -> Eye
  {
    match self
    {
      CubemapSlot::North | CubemapSlot::West => Eye::Left,
      CubemapSlot::South | CubemapSlot::East => Eye::Right,
    }
  }

  fn faces(self, selection: &FaceSelection) -> FaceMask
  {
    match self
    {
      CubemapSlot::North => selection.north,
      CubemapSlot::South => selection.south,
      CubemapSlot::East => selection.east,
      CubemapSlot::West => selection.west,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubemapResolution
{
  VeryLow,
  Low,
  Mid,
  High,
  VeryHigh,
}

impl CubemapResolution
{
  /// Edge length of one cubemap face in pixels.
  pub fn pixels(self) -> u32
  {
    match self
    {
      CubemapResolution::VeryLow => 512,
      CubemapResolution::Low => 1024,
      CubemapResolution::Mid => 2048,
      CubemapResolution::High => 4096,
      CubemapResolution::VeryHigh => 8192,
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Cavern Uniform (GPU side)
//
//   Layout consumed by the cubemap re-projection shader:
//     height, radius, angle, elevation       → 16 bytes
//     head_position : vec3<f32>, ipd : f32   → 16 bytes
//     enable_stereo, enable_convergence,
//     swap_eyes, _pad : u32                  → 16 bytes
//   Total: 48 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CavernUniform
{
  pub height: f32,
  pub radius: f32,
  pub angle: f32,
  pub elevation: f32,

  pub head_position: [f32; 3],
  pub interpupillary_distance: f32,

  pub enable_stereo: u32,
  pub enable_convergence: u32,
  pub swap_eyes: u32,
  pub _pad: u32,
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<CavernUniform>() == 48);

impl CavernUniform
{
  pub fn new(config: &RigConfig, screen: &ScreenGeometry, head: Vec3) -> Self
  {
    Self {
      height: screen.height(),
      radius: screen.radius(),
      angle: screen.angle(),
      elevation: screen.elevation(),
      head_position: head.to_array(),
      interpupillary_distance: config.interpupillary_distance,
      enable_stereo: (config.stereo_mode == StereoMode::Stereo) as u32,
      enable_convergence: config.enable_convergence as u32,
      swap_eyes: config.swap_eyes as u32,
      _pad: 0,
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Frame plan
// ──────────────────────────────────────────────────────────────
//

/// One cubemap capture for the host to perform this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubemapRender
{
  pub slot: CubemapSlot,
  pub eye: Eye,
  /// Capture point relative to the head.
  pub offset: Vec3,
  pub faces: FaceMask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan
{
  /// Head position after clamping, screen-local.
  pub head: Vec3,
  pub selection: FaceSelection,
  pub renders: Vec<CubemapRender>,
  pub uniform: CavernUniform,
}

impl FramePlan
{
  /// Total faces rendered across every capture.
  pub fn face_count(&self) -> usize
  {
    self.renders.iter().map(|r| r.faces.len()).sum()
  }
}

/// Keep the head within `ratio · radius` of the screen centre on the floor
/// plane. Height is left alone.
pub fn clamp_head(head: Vec3, screen: &ScreenGeometry, ratio: f32) -> Vec3
{
  let limit = ratio * screen.radius();
  let floor = Vec2::new(head.x, head.z);

  if floor.length_squared() <= limit * limit
  {
    return head;
  }

  let clamped = floor.normalize_or_zero() * limit;
  Vec3::new(clamped.x, head.y, clamped.y)
}

pub fn plan_frame(config: &RigConfig, screen: &ScreenGeometry, head: Vec3) -> FramePlan
{
  let head = if config.clamp_head_position
  {
    clamp_head(head, screen, config.clamp_head_ratio)
  }
  else
  {
    head
  };

  let selection = select_faces(head, screen, config.stereo_mode, config.enable_convergence);

  let renders = match config.stereo_mode
  {
    StereoMode::Mono => vec![CubemapRender {
      slot: CubemapSlot::North,
      eye: Eye::Left,
      offset: Vec3::ZERO,
      faces: selection.mono,
    }],

    StereoMode::Stereo => CubemapSlot::ALL
      .iter()
      .map(|&slot| CubemapRender {
        slot,
        eye: slot.eye(),
        offset: slot.offset(config.interpupillary_distance),
        faces: slot.faces(&selection),
      })
      .collect(),
  };

  let uniform = CavernUniform::new(config, screen, head);

  FramePlan { head, selection, renders, uniform }
}

#[cfg(test)]
mod tests
{
  use super::*;

  const EPS: f32 = 1e-5;

  #[test]
  fn clamp_keeps_inside_heads()
  {
    let screen = ScreenGeometry::default();
    let head = Vec3::new(1.0, 1.7, -1.0);
    assert_eq!(clamp_head(head, &screen, 0.9), head);
  }

  #[test]
  fn clamp_pulls_outside_heads_to_limit()
  {
    let screen = ScreenGeometry::default();
    let clamped = clamp_head(Vec3::new(0.0, 1.6, 5.0), &screen, 0.8);

    assert!((clamped - Vec3::new(0.0, 1.6, 2.4)).length() < EPS);

    let diagonal = clamp_head(Vec3::new(4.0, 1.0, -4.0), &screen, 0.9);
    assert!((Vec2::new(diagonal.x, diagonal.z).length() - 2.7).abs() < EPS);
    assert!(diagonal.x > 0.0 && diagonal.z < 0.0);
    assert_eq!(diagonal.y, 1.0);
  }

  #[test]
  fn mono_plan_has_single_centred_capture()
  {
    let config = RigConfig::default();
    let screen = config.screen().unwrap();
    let plan = plan_frame(&config, &screen, Vec3::new(0.0, 1.0, 0.0));

    assert_eq!(plan.renders.len(), 1);
    let render = plan.renders[0];
    assert_eq!(render.slot, CubemapSlot::North);
    assert_eq!(render.offset, Vec3::ZERO);
    assert_eq!(render.faces, plan.selection.mono);
    assert_eq!(plan.uniform.enable_stereo, 0);
  }

  #[test]
  fn stereo_plan_offsets_by_half_ipd()
  {
    let config = RigConfig { stereo_mode: StereoMode::Stereo, ..RigConfig::default() };
    let screen = config.screen().unwrap();
    let plan = plan_frame(&config, &screen, Vec3::new(0.0, 1.0, 0.0));

    assert_eq!(plan.renders.len(), 4);

    let half = config.interpupillary_distance * 0.5;
    let expected = [
      (CubemapSlot::North, Eye::Left, Vec3::new(0.0, 0.0, half)),
      (CubemapSlot::South, Eye::Right, Vec3::new(0.0, 0.0, -half)),
      (CubemapSlot::East, Eye::Right, Vec3::new(half, 0.0, 0.0)),
      (CubemapSlot::West, Eye::Left, Vec3::new(-half, 0.0, 0.0)),
    ];

    for (render, (slot, eye, offset)) in plan.renders.iter().zip(expected)
    {
      assert_eq!(render.slot, slot);
      assert_eq!(render.eye, eye);
      assert!((render.offset - offset).length() < EPS);
    }

    assert_eq!(plan.renders[2].faces, plan.selection.east);
    assert_eq!(plan.uniform.enable_stereo, 1);
  }

  #[test]
  fn plan_uses_clamped_head()
  {
    let config = RigConfig::default();
    let screen = config.screen().unwrap();
    let plan = plan_frame(&config, &screen, Vec3::new(10.0, 1.0, 0.0));

    assert!((plan.head.x - 2.7).abs() < EPS);
    assert_eq!(plan.uniform.head_position, plan.head.to_array());

    let unclamped = RigConfig { clamp_head_position: false, ..config };
    let plan = plan_frame(&unclamped, &screen, Vec3::new(10.0, 1.0, 0.0));
    assert_eq!(plan.head.x, 10.0);
    assert_eq!(plan.selection.mono, FaceMask::LEFT);
  }

  #[test]
  fn uniform_bytes_match_layout()
  {
    let config = RigConfig { swap_eyes: true, enable_convergence: true, ..RigConfig::default() };
    let screen = config.screen().unwrap();
    let uniform = CavernUniform::new(&config, &screen, Vec3::new(0.1, 1.5, -0.2));

    let bytes = bytemuck::bytes_of(&uniform);
    assert_eq!(bytes.len(), 48);

    let floats: &[f32] = bytemuck::cast_slice(&bytes[..32]);
    assert_eq!(floats, &[2.0, 3.0, 270.0, 0.0, 0.1, 1.5, -0.2, 0.065]);
    assert_eq!(uniform.enable_convergence, 1);
    assert_eq!(uniform.swap_eyes, 1);
  }

  #[test]
  fn resolution_pixels()
  {
    assert_eq!(CubemapResolution::VeryLow.pixels(), 512);
    assert_eq!(CubemapResolution::Mid.pixels(), 2048);
  }
}
