use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::boundary::{find_boundaries, QuadrantBoundaries};
use crate::face_mask::FaceMask;
use crate::screen::{angle_from_forward, ScreenGeometry};

//
// ──────────────────────────────────────────────────────────────
//   Face selection
//
//   Picks the smallest set of cubemap faces each capture needs
//   so the curved screen can be reconstructed. Captures:
//
//     mono        at the head
//     north/south offset along Z (depth)
//     east/west   offset along X (lateral)
//
//   North/south captures look sideways (left/right faces) for
//   stereo; east/west look forward/back.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StereoMode
{
  Mono,
  Stereo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceSelection
{
  pub mono: FaceMask,
  pub north: FaceMask,
  pub south: FaceMask,
  pub east: FaceMask,
  pub west: FaceMask,
}

/// Face masks for a viewer at `viewer` (screen-local, Y-up).
///
/// `high_accuracy` asks each stereo capture for the extra face that lets the
/// two eyes converge. It costs extra renders and changes no mono result.
pub fn select_faces(
  viewer: Vec3,
  screen: &ScreenGeometry,
  mode: StereoMode,
  high_accuracy: bool,
) -> FaceSelection
{
  let selection = select_all(viewer, screen, high_accuracy);

  match mode
  {
    StereoMode::Stereo => selection,
    StereoMode::Mono => FaceSelection { mono: selection.mono, ..FaceSelection::default() },
  }
}

fn select_all(viewer: Vec3, screen: &ScreenGeometry, high_accuracy: bool) -> FaceSelection
{
  let floor = Vec2::new(viewer.x, viewer.z);
  let bounds = find_boundaries(screen.radius(), floor);

  if bounds.none_intersect()
  {
    if let Some(selection) = outside_both_diagonals(floor)
    {
      return selection;
    }
  }
  else if !bounds.both_intersect()
  {
    if let Some(selection) = outside_one_diagonal(floor, &bounds)
    {
      return selection;
    }
  }

  inside_footprint(viewer, screen, &bounds, high_accuracy)
}

//
// ──────────────────────────────────────────────────────────────
//   Degenerate cases (viewer outside the footprint)
//
//   Top and bottom faces are assumed invisible here; that holds
//   for screens of sane proportions.
// ──────────────────────────────────────────────────────────────
//

/// The whole screen lies in one quadrant of the viewer.
fn outside_both_diagonals(floor: Vec2) -> Option<FaceSelection>
{
  let (x, z) = (floor.x, floor.y);

  // Screen south of the viewer.
  if z > 0.0 && x.abs() < z.abs()
  {
    log::trace!("viewer {floor} outside footprint: screen to the south");
    return Some(forward_back_only(FaceMask::BACK));
  }

  // Screen north of the viewer.
  if z < 0.0 && x.abs() < z.abs()
  {
    log::trace!("viewer {floor} outside footprint: screen to the north");
    return Some(forward_back_only(FaceMask::FRONT));
  }

  // Screen east of the viewer.
  if x < 0.0 && z.abs() < x.abs()
  {
    log::trace!("viewer {floor} outside footprint: screen to the east");
    return Some(sideways_only(FaceMask::RIGHT));
  }

  // Screen west of the viewer.
  if x > 0.0 && z.abs() < x.abs()
  {
    log::trace!("viewer {floor} outside footprint: screen to the west");
    return Some(sideways_only(FaceMask::LEFT));
  }

  None
}

/// The screen lies in a half-plane bounded by the diagonal that missed.
fn outside_one_diagonal(floor: Vec2, bounds: &QuadrantBoundaries) -> Option<FaceSelection>
{
  let rising_dir = Vec2::new(1.0, 1.0).normalize();
  let falling_dir = Vec2::new(1.0, -1.0).normalize();

  if !bounds.rising.is_empty()
  {
    let along = rising_dir.dot(floor);

    if along > 0.0
    {
      log::trace!("viewer {floor} outside footprint: screen to the south-west");
      return Some(corner(FaceMask::BACK, FaceMask::LEFT));
    }

    if along < 0.0
    {
      log::trace!("viewer {floor} outside footprint: screen to the north-east");
      return Some(corner(FaceMask::FRONT, FaceMask::RIGHT));
    }
  }
  else
  {
    let along = falling_dir.dot(floor);

    if along > 0.0
    {
      log::trace!("viewer {floor} outside footprint: screen to the north-west");
      return Some(corner(FaceMask::FRONT, FaceMask::LEFT));
    }

    if along < 0.0
    {
      log::trace!("viewer {floor} outside footprint: screen to the south-east");
      return Some(corner(FaceMask::BACK, FaceMask::RIGHT));
    }
  }

  None
}

fn forward_back_only(face: FaceMask) -> FaceSelection
{
  FaceSelection { mono: face, east: face, west: face, ..FaceSelection::default() }
}

fn sideways_only(face: FaceMask) -> FaceSelection
{
  FaceSelection { mono: face, north: face, south: face, ..FaceSelection::default() }
}

fn corner(depth_face: FaceMask, lateral_face: FaceMask) -> FaceSelection
{
  FaceSelection {
    mono: depth_face | lateral_face,
    north: lateral_face,
    south: lateral_face,
    east: depth_face,
    west: depth_face,
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Regular case (viewer inside the footprint)
// ──────────────────────────────────────────────────────────────
//

fn inside_footprint(
  viewer: Vec3,
  screen: &ScreenGeometry,
  bounds: &QuadrantBoundaries,
  high_accuracy: bool,
) -> FaceSelection
{
  let mut out = FaceSelection::default();

  let head = Vec2::new(viewer.x, viewer.z);
  let screen_top = screen.top() - viewer.y;
  let screen_bottom = screen.elevation() - viewer.y;

  // A boundary is visible when its screen-centred direction falls inside the arc.
  let visible = |relative: Vec2| angle_from_forward(head + relative) < screen.half_angle();

  // Looking north: always.
  out.mono |= FaceMask::FRONT;
  out.west |= FaceMask::FRONT | FaceMask::when(high_accuracy, FaceMask::RIGHT);
  out.east |= FaceMask::FRONT | FaceMask::when(high_accuracy, FaceMask::LEFT);

  // Looking south.
  if visible(bounds.south_west) || visible(bounds.south_east)
  {
    out.mono |= FaceMask::BACK;
    out.east |= FaceMask::BACK;
    out.west |= FaceMask::BACK;
  }

  // Looking east.
  if visible(bounds.north_east) || visible(bounds.south_east)
  {
    out.mono |= FaceMask::RIGHT;
    out.north |= FaceMask::RIGHT | FaceMask::when(high_accuracy, FaceMask::BACK);
    out.south |= FaceMask::RIGHT | FaceMask::when(high_accuracy, FaceMask::FRONT);
  }

  // Looking west.
  if visible(bounds.north_west) || visible(bounds.south_west)
  {
    out.mono |= FaceMask::LEFT;
    out.south |= FaceMask::LEFT | FaceMask::when(high_accuracy, FaceMask::FRONT);
    out.north |= FaceMask::LEFT | FaceMask::when(high_accuracy, FaceMask::BACK);
  }

  // Top and bottom: a boundary closer than the edge's vertical offset sits
  // above 45° of elevation, which the side faces cannot cover.
  let points = bounds.points();
  let any_depth_within = |limit: f32| points.iter().any(|p| p.y.abs() < limit.abs());
  let any_lateral_within = |limit: f32| points.iter().any(|p| p.x.abs() < limit.abs());

  if any_depth_within(screen_top)
  {
    out.mono |= FaceMask::TOP;
    out.east |= FaceMask::TOP;
    out.west |= FaceMask::TOP;
  }

  if any_depth_within(screen_bottom)
  {
    out.mono |= FaceMask::BOTTOM;
    out.east |= FaceMask::BOTTOM;
    out.west |= FaceMask::BOTTOM;
  }

  if any_lateral_within(screen_top)
  {
    out.mono |= FaceMask::TOP;
    out.north |= FaceMask::TOP;
    out.south |= FaceMask::TOP;
  }

  if any_lateral_within(screen_bottom)
  {
    out.mono |= FaceMask::BOTTOM;
    out.north |= FaceMask::BOTTOM;
    out.south |= FaceMask::BOTTOM;
  }

  out
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn screen(angle: f32) -> ScreenGeometry
  {
    ScreenGeometry::new(3.0, 2.0, angle, 0.0).unwrap()
  }

  // Head height inside the screen's vertical band so top/bottom stay off.
  const HEAD_Y: f32 = 1.0;

  #[test]
  fn front_always_rendered_at_centre()
  {
    let sel = select_faces(Vec3::new(0.0, HEAD_Y, 0.0), &screen(270.0), StereoMode::Mono, false);
    assert!(sel.mono.contains(FaceMask::FRONT));
    assert!(sel.mono.contains(FaceMask::LEFT | FaceMask::RIGHT));
  }

  #[test]
  fn back_face_appears_as_span_grows()
  {
    let centre = Vec3::new(0.0, HEAD_Y, 0.0);

    // Centred boundaries sit at 135° from forward.
    let narrow = select_faces(centre, &screen(260.0), StereoMode::Mono, false);
    assert!(!narrow.mono.contains(FaceMask::BACK));

    let mut seen_back = false;
    for angle in [280.0, 300.0, 330.0, 360.0]
    {
      let sel = select_faces(centre, &screen(angle), StereoMode::Mono, false);
      if seen_back
      {
        assert!(sel.mono.contains(FaceMask::BACK), "back face dropped at {angle}");
      }
      seen_back |= sel.mono.contains(FaceMask::BACK);
    }
    assert!(seen_back);
  }

  #[test]
  fn narrow_screen_needs_only_front()
  {
    let sel = select_faces(Vec3::new(0.0, HEAD_Y, 0.0), &screen(60.0), StereoMode::Mono, false);
    assert_eq!(sel.mono, FaceMask::FRONT);
  }

  #[test]
  fn far_outside_along_axes_takes_single_face()
  {
    let s = screen(270.0);
    let cases = [
      (Vec3::new(0.0, HEAD_Y, 10.0), FaceMask::BACK),
      (Vec3::new(0.0, HEAD_Y, -10.0), FaceMask::FRONT),
      (Vec3::new(-10.0, HEAD_Y, 0.0), FaceMask::RIGHT),
      (Vec3::new(10.0, HEAD_Y, 0.0), FaceMask::LEFT),
    ];

    for (viewer, face) in cases
    {
      let sel = select_faces(viewer, &s, StereoMode::Stereo, false);
      assert_eq!(sel.mono, face, "viewer {viewer}");
      assert!(sel.mono.len() <= 2);
    }
  }

  #[test]
  fn outside_screen_south_uses_forward_back_captures()
  {
    let sel = select_faces(Vec3::new(0.0, HEAD_Y, 10.0), &screen(270.0), StereoMode::Stereo, true);
    assert_eq!(sel.east, FaceMask::BACK);
    assert_eq!(sel.west, FaceMask::BACK);
    assert!(sel.north.is_empty());
    assert!(sel.south.is_empty());
  }

  #[test]
  fn outside_along_diagonal_takes_corner_pair()
  {
    let s = screen(270.0);

    // Viewer north-east of the screen: screen lies south-west.
    let from_ne = select_faces(Vec3::new(6.0, HEAD_Y, 6.0), &s, StereoMode::Stereo, false);
    assert_eq!(from_ne.mono, FaceMask::BACK | FaceMask::LEFT);
    assert_eq!(from_ne.north, FaceMask::LEFT);
    assert_eq!(from_ne.east, FaceMask::BACK);

    let from_sw = select_faces(Vec3::new(-6.0, HEAD_Y, -6.0), &s, StereoMode::Stereo, false);
    assert_eq!(from_sw.mono, FaceMask::FRONT | FaceMask::RIGHT);

    let from_se = select_faces(Vec3::new(6.0, HEAD_Y, -6.0), &s, StereoMode::Stereo, false);
    assert_eq!(from_se.mono, FaceMask::FRONT | FaceMask::LEFT);

    let from_nw = select_faces(Vec3::new(-6.0, HEAD_Y, 6.0), &s, StereoMode::Stereo, false);
    assert_eq!(from_nw.mono, FaceMask::BACK | FaceMask::RIGHT);
  }

  #[test]
  fn viewer_on_rim_with_tangent_diagonal_sees_everything()
  {
    let s = screen(270.0);
    let d = s.radius() / std::f32::consts::SQRT_2;
    let viewer = Vec3::new(d, HEAD_Y, d);

    let bounds = find_boundaries(s.radius(), Vec2::new(viewer.x, viewer.z));
    assert_eq!(bounds.falling.count(), 1);
    assert_eq!(bounds.north_west, bounds.south_east);

    // The tangent point is the viewer: every direction meets the screen
    // at zero distance, so top and bottom are needed as well.
    let sel = select_faces(viewer, &s, StereoMode::Stereo, false);
    assert_eq!(sel.mono, FaceMask::ALL);
    assert!(sel.east.contains(FaceMask::FRONT | FaceMask::BACK));
    assert!(sel.north.contains(FaceMask::LEFT | FaceMask::RIGHT));
  }

  #[test]
  fn viewer_outside_with_both_diagonals_uses_regular_case()
  {
    let s = screen(270.0);
    let viewer = Vec3::new(4.0, HEAD_Y, 0.0);

    // Both diagonals still cut the footprint, entirely behind the viewer.
    let bounds = find_boundaries(s.radius(), Vec2::new(viewer.x, viewer.z));
    let (lo, hi) = bounds.rising.bounds().unwrap();
    assert!(lo < 0.0 && hi < 0.0);
    assert!(bounds.both_intersect());

    // South-west lies at 154° and is culled; the other three are visible.
    let sel = select_faces(viewer, &s, StereoMode::Stereo, false);
    assert_eq!(sel.mono, FaceMask::FRONT | FaceMask::BACK | FaceMask::LEFT | FaceMask::RIGHT);
    assert_eq!(sel.east, FaceMask::FRONT | FaceMask::BACK);
    assert_eq!(sel.north, FaceMask::LEFT | FaceMask::RIGHT);
  }

  #[test]
  fn mono_mode_leaves_stereo_masks_empty()
  {
    let sel = select_faces(Vec3::new(0.3, HEAD_Y, 0.2), &screen(270.0), StereoMode::Mono, true);
    assert!(!sel.mono.is_empty());
    assert!(sel.north.is_empty() && sel.south.is_empty());
    assert!(sel.east.is_empty() && sel.west.is_empty());
  }

  #[test]
  fn convergence_adds_perpendicular_faces()
  {
    let viewer = Vec3::new(0.0, HEAD_Y, 0.0);
    let plain = select_faces(viewer, &screen(270.0), StereoMode::Stereo, false);
    let converged = select_faces(viewer, &screen(270.0), StereoMode::Stereo, true);

    assert_eq!(plain.mono, converged.mono);
    assert!(!plain.west.contains(FaceMask::RIGHT));
    assert!(converged.west.contains(FaceMask::FRONT | FaceMask::RIGHT));
    assert!(converged.east.contains(FaceMask::FRONT | FaceMask::LEFT));
    assert!(converged.north.contains(FaceMask::BACK));
    assert!(converged.south.contains(FaceMask::FRONT));
  }

  #[test]
  fn low_head_sees_top_and_high_head_sees_bottom()
  {
    let s = ScreenGeometry::new(1.0, 4.0, 270.0, 0.0).unwrap();

    let low = select_faces(Vec3::new(0.0, 0.0, 0.0), &s, StereoMode::Stereo, false);
    assert!(low.mono.contains(FaceMask::TOP));
    assert!(!low.mono.contains(FaceMask::BOTTOM));
    assert!(low.east.contains(FaceMask::TOP));
    assert!(low.north.contains(FaceMask::TOP));

    let high = select_faces(Vec3::new(0.0, 4.0, 0.0), &s, StereoMode::Stereo, false);
    assert!(high.mono.contains(FaceMask::BOTTOM));
    assert!(!high.mono.contains(FaceMask::TOP));
    assert!(high.south.contains(FaceMask::BOTTOM));
  }
}
