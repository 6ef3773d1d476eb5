use glam::Vec3;

use crate::config::RigConfig;
use crate::error::ConfigError;
use crate::mesh::{ScreenMesh, ScreenMeshCache};
use crate::rig::{plan_frame, CubemapRender, FramePlan};
use crate::screen::ScreenGeometry;

//
// ──────────────────────────────────────────────────────────────
//   Host seams
//
//   The host supplies the tracked head and performs the actual
//   cubemap renders; the renderer only decides what to render.
// ──────────────────────────────────────────────────────────────
//

/// Current tracked head position, screen-local.
pub trait PoseSource
{
  fn head_position(&self) -> Vec3;
}

/// A head that never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPose(pub Vec3);

impl PoseSource for FixedPose
{
  fn head_position(&self) -> Vec3
  {
    self.0
  }
}

impl<F: Fn() -> Vec3> PoseSource for F
{
  fn head_position(&self) -> Vec3
  {
    self()
  }
}

/// Receives one call per cubemap capture, in slot order.
pub trait CubemapSink
{
  fn render_cubemap(&mut self, render: &CubemapRender);
}

//
// ──────────────────────────────────────────────────────────────
//   CavernRenderer
// ──────────────────────────────────────────────────────────────
//

pub struct CavernRenderer
{
  config: RigConfig,
  screen: ScreenGeometry,
  meshes: ScreenMeshCache,
}

impl CavernRenderer
{
  pub fn new(config: RigConfig) -> Result<Self, ConfigError>
  {
    config.validate()?;
    let screen = config.screen()?;

    Ok(Self { config, screen, meshes: ScreenMeshCache::new() })
  }

  pub fn config(&self) -> &RigConfig
  {
    &self.config
  }

  pub fn screen(&self) -> &ScreenGeometry
  {
    &self.screen
  }

  /// Replace the configuration. The screen mesh is rebuilt on next access
  /// if the geometry or preview eye changed.
  pub fn set_config(&mut self, config: RigConfig) -> Result<(), ConfigError>
  {
    config.validate()?;
    self.screen = config.screen()?;
    self.config = config;
    Ok(())
  }

  /// Plan this frame from the current pose and hand every capture to `sink`.
  pub fn render_frame(&mut self, pose: &impl PoseSource, sink: &mut impl CubemapSink) -> FramePlan
  {
    let plan = plan_frame(&self.config, &self.screen, pose.head_position());

    for render in &plan.renders
    {
      sink.render_cubemap(render);
    }

    plan
  }

  pub fn screen_mesh(&mut self) -> &ScreenMesh
  {
    self.meshes.get(&self.screen, self.config.preview_eye)
  }

  pub fn mesh_builds(&self) -> usize
  {
    self.meshes.builds()
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::face_select::StereoMode;
  use crate::rig::Eye;

  #[derive(Default)]
  struct Recorder(Vec<CubemapRender>);

  impl CubemapSink for Recorder
  {
    fn render_cubemap(&mut self, render: &CubemapRender)
    {
      self.0.push(*render);
    }
  }

  #[test]
  fn rejects_invalid_config()
  {
    let config = RigConfig { angle: 0.0, ..RigConfig::default() };
    assert!(CavernRenderer::new(config).is_err());
  }

  #[test]
  fn closure_pose_drives_frame()
  {
    let mut renderer = CavernRenderer::new(RigConfig::default()).unwrap();
    let mut sink = Recorder::default();

    let plan = renderer.render_frame(&|| Vec3::new(0.0, 1.0, 0.0), &mut sink);
    assert_eq!(sink.0, plan.renders);
  }

  #[test]
  fn mesh_follows_config_changes()
  {
    let mut renderer = CavernRenderer::new(RigConfig::default()).unwrap();
    assert_eq!(renderer.screen_mesh().panel_count(), 27);
    renderer.screen_mesh();
    assert_eq!(renderer.mesh_builds(), 1);

    let stereo = RigConfig { stereo_mode: StereoMode::Stereo, ..RigConfig::default() };
    renderer.set_config(stereo).unwrap();
    renderer.screen_mesh();
    assert_eq!(renderer.mesh_builds(), 1);

    let right = RigConfig { preview_eye: Eye::Right, angle: 180.0, ..RigConfig::default() };
    renderer.set_config(right).unwrap();
    assert_eq!(renderer.screen_mesh().panel_count(), 18);
    assert_eq!(renderer.mesh_builds(), 2);
  }

  #[test]
  fn failed_update_keeps_previous_config()
  {
    let mut renderer = CavernRenderer::new(RigConfig::default()).unwrap();
    let bad = RigConfig { radius: -2.0, ..RigConfig::default() };

    assert!(renderer.set_config(bad).is_err());
    assert_eq!(renderer.screen().radius(), 3.0);
  }
}
