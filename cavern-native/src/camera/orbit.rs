use glam::{Mat4, Vec3};

//
// ──────────────────────────────────────────────────────────────
//   Orbit camera (left-handed, Y-up, same frame as the screen)
//
//   Coordinate system:
//     X → right
//     Y → up
//     Z → forward (centre of the screen arc)
//
//   The eye orbits `target`:
//     azimuth   = horizontal angle (radians, from +Z towards +X)
//     elevation = angle above the XZ plane (radians)
//     radius    = distance from target to eye
// ──────────────────────────────────────────────────────────────
//

pub struct Camera
{
  pub target: Vec3,
  pub radius: f32,
  pub azimuth: f32,
  pub elevation: f32,

  pub aspect: f32,
  pub fovy: f32,
  pub znear: f32,
  pub zfar: f32,
}

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

const RADIUS_MIN: f32 = 0.5;
const RADIUS_MAX: f32 = 200.0;
const ELEVATION_MIN: f32 = -std::f32::consts::FRAC_PI_2 + 0.01; // just above nadir
const ELEVATION_MAX: f32 = std::f32::consts::FRAC_PI_2 - 0.01; // just below zenith

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Camera
{
  /// Start behind the screen's opening, looking forward into the arc.
  pub fn new(aspect: f32, screen_radius: f32) -> Self
  {
    Self {
      target: Vec3::new(0.0, 1.0, 0.0),
      radius: screen_radius * 3.0,
      azimuth: std::f32::consts::PI,
      elevation: std::f32::consts::FRAC_PI_6,

      aspect,
      fovy: std::f32::consts::FRAC_PI_4,
      znear: 0.05,
      zfar: 1_000.0,
    }
  }

  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.aspect = aspect;
  }

  pub fn build_view_proj(&self) -> Mat4
  {
    let eye = self.eye_position();
    let view = Mat4::look_at_lh(eye, self.target, Vec3::Y);
    let proj = Mat4::perspective_lh(self.fovy, self.aspect, self.znear, self.zfar);
    proj * view
  }

  /// `delta_az` and `delta_el` are in radians.
  pub fn orbit(&mut self, delta_az: f32, delta_el: f32)
  {
    self.azimuth += delta_az;
    self.elevation = (self.elevation + delta_el).clamp(ELEVATION_MIN, ELEVATION_MAX);
  }

  /// `factor` > 1 zooms out, < 1 zooms in.
  pub fn zoom(&mut self, factor: f32)
  {
    self.radius = (self.radius * factor).clamp(RADIUS_MIN, RADIUS_MAX);
  }

  /// Slide the target in the view plane. `dx`/`dy` are world units.
  pub fn pan(&mut self, dx: f32, dy: f32)
  {
    let (right, up) = self.view_axes();
    self.target += right * dx + up * dy;
  }

  pub fn eye_position(&self) -> Vec3
  {
    let (sin_el, cos_el) = self.elevation.sin_cos();
    let (sin_az, cos_az) = self.azimuth.sin_cos();

    self.target + self.radius * Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
  }

  fn view_axes(&self) -> (Vec3, Vec3)
  {
    let fwd = (self.target - self.eye_position()).normalize();
    let right = Vec3::Y.cross(fwd).normalize();
    let up = fwd.cross(right).normalize();
    (right, up)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  const EPS: f32 = 1e-4;

  #[test]
  fn starts_behind_the_opening()
  {
    let cam = Camera::new(16.0 / 9.0, 3.0);
    let eye = cam.eye_position();
    assert!(eye.z < 0.0);
    assert!(eye.y > cam.target.y);
    assert!(((eye - cam.target).length() - 9.0).abs() < EPS);
  }

  #[test]
  fn elevation_is_clamped()
  {
    let mut cam = Camera::new(1.0, 3.0);
    cam.orbit(0.0, 10.0);
    assert_eq!(cam.elevation, ELEVATION_MAX);
    cam.orbit(0.0, -20.0);
    assert_eq!(cam.elevation, ELEVATION_MIN);
  }

  #[test]
  fn pan_moves_target_sideways()
  {
    let mut cam = Camera::new(1.0, 3.0);
    cam.elevation = 0.0;
    cam.azimuth = std::f32::consts::PI; // eye on -Z looking +Z

    let before = cam.target;
    cam.pan(1.0, 0.0);
    assert!((cam.target - before - Vec3::X).length() < EPS);
  }

  #[test]
  fn target_projects_to_screen_centre()
  {
    let cam = Camera::new(1.5, 3.0);
    let clip = cam.build_view_proj() * cam.target.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < EPS && ndc.y.abs() < EPS);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
  }
}
