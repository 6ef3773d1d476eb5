use cavern_core::FaceMask;
use glam::{Mat4, Vec3};

use super::orbit::Camera;

//
// ──────────────────────────────────────────────────────────────
//   View Uniform (GPU side)
//
//   WGSL layout (screen.wgsl, lines.wgsl):
//     view_proj : mat4x4<f32>   → 64 bytes
//     head      : vec3<f32>     → 12 bytes
//     face_mask : u32           →  4 bytes
//     panels    : u32           →  4 bytes (+12 padding)
//   Total: 96 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform
{
  pub view_proj: [[f32; 4]; 4], // 64 bytes
  pub head: [f32; 3],           // 12 bytes
  pub face_mask: u32,           //  4 bytes
  pub panels: u32,              //  4 bytes
  pub _pad: [u32; 3],           // 12 bytes
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<ViewUniform>() == 96);

impl ViewUniform
{
  /// `faces` is the mono mask the screen shader highlights; `panels` spaces
  /// its panel grid.
  pub fn new(camera: &Camera, head: Vec3, faces: FaceMask, panels: u32) -> Self
  {
    let mat: Mat4 = camera.build_view_proj();

    Self {
      view_proj: mat.to_cols_array_2d(),
      head: head.to_array(),
      face_mask: faces.bits() as u32,
      panels,
      _pad: [0; 3],
    }
  }
}
