use glam::Vec2;

use crate::error::GeometryError;

//
// ──────────────────────────────────────────────────────────────
//   Screen geometry
//
//   Local frame of the physical screen (Y-up):
//     X → lateral (right)
//     Y → vertical
//     Z → forward; the screen arc is centred on +Z
//
//   The origin is the centre of the screen's circular footprint
//   at the viewer's foot level.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry
{
  radius: f32,
  height: f32,
  angle: f32,
  elevation: f32,
}

impl ScreenGeometry
{
  /// `angle` is the horizontal span in degrees, `elevation` the height of
  /// the screen's bottom edge above the viewer's feet.
  pub fn new(radius: f32, height: f32, angle: f32, elevation: f32) -> Result<Self, GeometryError>
  {
    check_finite("radius", radius)?;
    check_finite("height", height)?;
    check_finite("angle", angle)?;
    check_finite("elevation", elevation)?;

    if radius <= 0.0
    {
      return Err(GeometryError::Radius(radius));
    }

    if height <= 0.0
    {
      return Err(GeometryError::Height(height));
    }

    if angle <= 0.0 || angle > 360.0
    {
      return Err(GeometryError::Angle(angle));
    }

    Ok(Self { radius, height, angle, elevation })
  }

  pub fn radius(&self) -> f32
  {
    self.radius
  }

  pub fn height(&self) -> f32
  {
    self.height
  }

  pub fn angle(&self) -> f32
  {
    self.angle
  }

  pub fn elevation(&self) -> f32
  {
    self.elevation
  }

  pub fn half_angle(&self) -> f32
  {
    self.angle * 0.5
  }

  pub fn top(&self) -> f32
  {
    self.elevation + self.height
  }

  /// Unrolled screen width over its height.
  pub fn aspect_ratio(&self) -> f32
  {
    (self.angle / 360.0) * std::f32::consts::TAU * self.radius / self.height
  }

  /// True when a floor point (x, z) lies on the covered part of the arc's
  /// angular range, measured from +Z.
  pub fn covers_direction(&self, floor: Vec2) -> bool
  {
    angle_from_forward(floor) < self.half_angle()
  }
}

impl Default for ScreenGeometry
{
  fn default() -> Self
  {
    Self { radius: 3.0, height: 2.0, angle: 270.0, elevation: 0.0 }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Helpers
// ──────────────────────────────────────────────────────────────
//

/// Unsigned angle in degrees between a floor vector (x, z) and +Z.
/// A zero vector counts as pointing forward.
pub fn angle_from_forward(floor: Vec2) -> f32
{
  let len = floor.length();
  if len <= f32::EPSILON
  {
    return 0.0;
  }

  (floor.y / len).clamp(-1.0, 1.0).acos().to_degrees()
}

fn check_finite(field: &'static str, value: f32) -> Result<(), GeometryError>
{
  if value.is_finite()
  {
    Ok(())
  }
  else
  {
    Err(GeometryError::NotFinite { field, value })
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn rejects_invalid_dimensions()
  {
    assert_eq!(ScreenGeometry::new(0.0, 2.0, 270.0, 0.0), Err(GeometryError::Radius(0.0)));
    assert_eq!(ScreenGeometry::new(3.0, -1.0, 270.0, 0.0), Err(GeometryError::Height(-1.0)));
    assert_eq!(ScreenGeometry::new(3.0, 2.0, 0.0, 0.0), Err(GeometryError::Angle(0.0)));
    assert_eq!(ScreenGeometry::new(3.0, 2.0, 361.0, 0.0), Err(GeometryError::Angle(361.0)));
    assert!(matches!(
      ScreenGeometry::new(f32::NAN, 2.0, 270.0, 0.0),
      Err(GeometryError::NotFinite { field: "radius", .. })
    ));
  }

  #[test]
  fn accepts_full_circle()
  {
    let screen = ScreenGeometry::new(3.0, 2.0, 360.0, -0.2).unwrap();
    assert_eq!(screen.half_angle(), 180.0);
    assert!((screen.top() - 1.8).abs() < 1e-6);
  }

  #[test]
  fn aspect_ratio_is_arc_length_over_height()
  {
    let screen = ScreenGeometry::new(3.0, 2.0, 180.0, 0.0).unwrap();
    let expected = std::f32::consts::PI * 3.0 / 2.0;
    assert!((screen.aspect_ratio() - expected).abs() < 1e-5);
  }

  #[test]
  fn forward_angle()
  {
    assert_eq!(angle_from_forward(Vec2::ZERO), 0.0);
    assert!((angle_from_forward(Vec2::new(1.0, 0.0)) - 90.0).abs() < 1e-4);
    assert!((angle_from_forward(Vec2::new(-1.0, -1.0)) - 135.0).abs() < 1e-4);
    assert!((angle_from_forward(Vec2::new(0.0, -2.0)) - 180.0).abs() < 1e-4);
  }

  #[test]
  fn coverage_respects_half_angle()
  {
    let screen = ScreenGeometry::default();
    assert!(screen.covers_direction(Vec2::new(0.0, 1.0)));
    assert!(screen.covers_direction(Vec2::new(-1.0, -0.9)));
    assert!(!screen.covers_direction(Vec2::new(0.0, -1.0)));
  }
}
