use cavern_core::{Eye, RigConfig, StereoMode};
use glam::Vec3;
use winit::keyboard::KeyCode;

use crate::camera::Camera;
use crate::input::InputState;

//
// ──────────────────────────────────────────────────────────────
//   Sensitivity constants
// ──────────────────────────────────────────────────────────────
//

const ORBIT_SENSITIVITY: f32 = 0.005; // radians per pixel
const PAN_SENSITIVITY: f32 = 0.002; // world units per pixel (scaled by radius)
const ZOOM_STEP: f32 = 0.1; // radius change per scroll line
const ZOOM_FACTOR_MIN: f32 = 0.1; // per frame, however far the wheel spun

const IPD_STEP: f32 = 0.001; // metres per arrow press

const HEAD_SPEED: f32 = 1.5; // metres per second
const HEAD_HEIGHT_MIN: f32 = -1.0;
const HEAD_HEIGHT_MAX: f32 = 4.0;

/// Standing eye height the head resets to.
pub const DEFAULT_HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);

//
// ──────────────────────────────────────────────────────────────
//   Orbit camera: right-drag orbit, middle-drag pan, wheel zoom
// ──────────────────────────────────────────────────────────────
//

pub fn apply_camera_input(input: &InputState, camera: &mut Camera)
{
  let moved = input.mouse_dx != 0.0 || input.mouse_dy != 0.0;

  if moved && input.right_held
  {
    camera.orbit(input.mouse_dx * ORBIT_SENSITIVITY, input.mouse_dy * ORBIT_SENSITIVITY);
  }

  if moved && input.middle_held
  {
    let scale = camera.radius * PAN_SENSITIVITY;
    camera.pan(-input.mouse_dx * scale, input.mouse_dy * scale);
  }

  if input.scroll != 0.0
  {
    camera.zoom((1.0 - input.scroll * ZOOM_STEP).max(ZOOM_FACTOR_MIN));
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Simulated tracked head
//
//   W/S forward/back (±Z), A/D left/right (∓X), R/F up/down,
//   Space resets. Positions are screen-local.
// ──────────────────────────────────────────────────────────────
//

pub fn apply_head_input(input: &InputState, head: &mut Vec3, dt: f32)
{
  if input.was_pressed(KeyCode::Space)
  {
    *head = DEFAULT_HEAD;
    return;
  }

  let axis = |pos: KeyCode, neg: KeyCode| -> f32 {
    (input.is_held(pos) as i32 - input.is_held(neg) as i32) as f32
  };

  let dir = Vec3::new(
    axis(KeyCode::KeyD, KeyCode::KeyA),
    axis(KeyCode::KeyR, KeyCode::KeyF),
    axis(KeyCode::KeyW, KeyCode::KeyS),
  );

  if dir == Vec3::ZERO
  {
    return;
  }

  *head += dir * HEAD_SPEED * dt;
  head.y = head.y.clamp(HEAD_HEIGHT_MIN, HEAD_HEIGHT_MAX);
}

//
// ──────────────────────────────────────────────────────────────
//   Rig toggles: M stereo, C convergence, E preview eye,
//   H head clamping, X swap eyes, Left/Right arrows IPD
// ──────────────────────────────────────────────────────────────
//

/// The config after this frame's toggles, or `None` if nothing changed.
pub fn apply_rig_toggles(input: &InputState, config: &RigConfig) -> Option<RigConfig>
{
  let mut next = config.clone();

  if input.was_pressed(KeyCode::KeyM)
  {
    next.stereo_mode = match next.stereo_mode
    {
      StereoMode::Mono => StereoMode::Stereo,
      StereoMode::Stereo => StereoMode::Mono,
    };
  }

  if input.was_pressed(KeyCode::KeyC)
  {
    next.enable_convergence = !next.enable_convergence;
  }

  if input.was_pressed(KeyCode::KeyE)
  {
    next.preview_eye = match next.preview_eye
    {
      Eye::Left => Eye::Right,
      Eye::Right => Eye::Left,
    };
  }

  if input.was_pressed(KeyCode::KeyH)
  {
    next.clamp_head_position = !next.clamp_head_position;
  }

  if input.was_pressed(KeyCode::KeyX)
  {
    next.swap_eyes = !next.swap_eyes;
  }

  let ipd_steps = input.was_pressed(KeyCode::ArrowRight) as i32 - input.was_pressed(KeyCode::ArrowLeft) as i32;
  if ipd_steps != 0
  {
    // Never reaches zero; the rig rejects a non-positive IPD.
    next.interpupillary_distance = (next.interpupillary_distance + ipd_steps as f32 * IPD_STEP).max(IPD_STEP);
  }

  (next != *config).then_some(next)
}
