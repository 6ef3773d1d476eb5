use glam::Vec2;

use crate::quadratic::{solve_quadratic_within, Roots};

//
// ──────────────────────────────────────────────────────────────
//   Quadrant boundaries
//
//   Seen from above the screen footprint is a circle. Two
//   diagonals through the viewer slice it into four quadrants:
//
//     rising  diagonal  z =  x   (south-west → north-east)
//     falling diagonal  z = -x   (north-west → south-east)
//
//   Cubemaps are captured at the viewer, so the circle is moved
//   by -viewer and the diagonals pass through the origin. With
//   (a, b) = -viewer the circle is (x - a)² + (z - b)² = r², and
//   substituting each diagonal gives
//
//     rising : t² + (x + z)·t - ½(r² - x² - z²) = 0,  point (t,  t)
//     falling: t² + (x - z)·t - ½(r² - x² - z²) = 0,  point (t, -t)
//
//   where (x, z) is the viewer's floor position. All boundary
//   points are viewer-relative floor points (x, z).
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantBoundaries
{
  /// Intersections of the rising diagonal with the footprint.
  pub rising: Roots,
  /// Intersections of the falling diagonal with the footprint.
  pub falling: Roots,

  pub south_west: Vec2,
  pub north_east: Vec2,
  pub north_west: Vec2,
  pub south_east: Vec2,
}

impl QuadrantBoundaries
{
  pub fn both_intersect(&self) -> bool
  {
    !self.rising.is_empty() && !self.falling.is_empty()
  }

  pub fn none_intersect(&self) -> bool
  {
    self.rising.is_empty() && self.falling.is_empty()
  }

  pub fn points(&self) -> [Vec2; 4]
  {
    [self.north_east, self.north_west, self.south_east, self.south_west]
  }
}

/// Boundaries for a viewer at floor position `viewer` = (x, z) inside (or
/// near) a footprint of `radius` centred at the origin.
pub fn find_boundaries(radius: f32, viewer: Vec2) -> QuadrantBoundaries
{
  let (x, z) = (viewer.x, viewer.y);
  let c = -0.5 * (radius * radius - x * x - z * z);

  // c cancels r² against x² + z², so its rounding error scales with those
  // terms rather than with c itself. A tangent diagonal lands within it.
  let magnitude = radius * radius + x * x + z * z;
  let tolerance = |b: f32| 4.0 * f32::EPSILON * (b * b + 2.0 * magnitude);

  let rising = solve_quadratic_within(1.0, x + z, c, tolerance(x + z));
  let falling = solve_quadratic_within(1.0, x - z, c, tolerance(x - z));

  // Unset pairs stay at zero; callers only read them when the diagonal hits.
  let (south_west, north_east) = match rising.bounds()
  {
    Some((lo, hi)) => (Vec2::new(lo, lo), Vec2::new(hi, hi)),
    None => (Vec2::ZERO, Vec2::ZERO),
  };

  let (north_west, south_east) = match falling.bounds()
  {
    Some((lo, hi)) => (Vec2::new(lo, -lo), Vec2::new(hi, -hi)),
    None => (Vec2::ZERO, Vec2::ZERO),
  };

  QuadrantBoundaries { rising, falling, south_west, north_east, north_west, south_east }
}

#[cfg(test)]
mod tests
{
  use super::*;

  const EPS: f32 = 1e-4;

  fn on_circle(radius: f32, viewer: Vec2, relative: Vec2) -> bool
  {
    ((viewer + relative).length() - radius).abs() < EPS
  }

  #[test]
  fn centred_viewer_hits_diagonals_symmetrically()
  {
    let b = find_boundaries(2.0, Vec2::ZERO);
    let d = 2.0 / std::f32::consts::SQRT_2;

    assert!(b.both_intersect());
    assert!((b.north_east - Vec2::new(d, d)).length() < EPS);
    assert!((b.south_west - Vec2::new(-d, -d)).length() < EPS);
    assert!((b.north_west - Vec2::new(-d, d)).length() < EPS);
    assert!((b.south_east - Vec2::new(d, -d)).length() < EPS);
  }

  #[test]
  fn offset_viewer_boundaries_lie_on_footprint()
  {
    let radius = 3.0;
    let viewer = Vec2::new(0.7, -1.1);
    let b = find_boundaries(radius, viewer);

    assert!(b.both_intersect());
    for p in b.points()
    {
      assert!(on_circle(radius, viewer, p), "{p:?} not on the footprint");
    }

    // Quadrant orientation relative to the viewer.
    assert!(b.north_east.x > 0.0 && b.north_east.y > 0.0);
    assert!(b.south_west.x < 0.0 && b.south_west.y < 0.0);
    assert!(b.north_west.x < 0.0 && b.north_west.y > 0.0);
    assert!(b.south_east.x > 0.0 && b.south_east.y < 0.0);
  }

  #[test]
  fn far_viewer_misses_both_diagonals()
  {
    let b = find_boundaries(3.0, Vec2::new(0.0, 10.0));
    assert!(b.none_intersect());
    assert_eq!(b.points(), [Vec2::ZERO; 4]);
  }

  #[test]
  fn diagonal_viewer_misses_one_diagonal()
  {
    // Far out along the rising diagonal: the rising line still passes
    // through the centre, the falling line misses.
    let b = find_boundaries(3.0, Vec2::new(6.0, 6.0));
    assert_eq!(b.rising.count(), 2);
    assert!(b.falling.is_empty());
  }

  #[test]
  fn tangent_diagonal_touches_once()
  {
    // Falling line z = -x through (1, 1) is at distance √2 from the centre.
    let radius = std::f32::consts::SQRT_2;
    let b = find_boundaries(radius, Vec2::new(1.0, 1.0));
    assert_eq!(b.falling.count(), 1);
    assert_eq!(b.north_west, b.south_east);
    assert!(b.north_west.length() < 1e-4);
  }

  #[test]
  fn tangent_survives_rounding_at_other_radii()
  {
    for radius in [1.0_f32, 2.5, 3.0, 7.0]
    {
      let d = radius / std::f32::consts::SQRT_2;
      let b = find_boundaries(radius, Vec2::new(d, d));
      assert_eq!(b.falling.count(), 1, "radius {radius}");
      assert_eq!(b.rising.count(), 2, "radius {radius}");

      let b = find_boundaries(radius, Vec2::new(d, -d));
      assert_eq!(b.rising.count(), 1, "radius {radius}");
    }
  }
}
