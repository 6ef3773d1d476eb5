use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::face_select::StereoMode;
use crate::rig::{CubemapResolution, Eye};
use crate::screen::ScreenGeometry;

//
// ──────────────────────────────────────────────────────────────
//   Rig configuration
//
//   Physical screen dimensions are in metres and degrees. Every
//   key is optional in the JSON file; missing keys take the
//   defaults below.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig
{
  pub stereo_mode: StereoMode,
  pub cubemap_resolution: CubemapResolution,
  pub interpupillary_distance: f32,

  pub height: f32,
  pub radius: f32,
  pub angle: f32,
  /// Bottom edge of the screen relative to the viewer's feet.
  pub elevation: f32,

  /// Render the extra faces that let stereo eyes converge.
  pub enable_convergence: bool,
  /// Off: left eye on top of the stacked output. On: right eye on top.
  pub swap_eyes: bool,

  pub clamp_head_position: bool,
  /// Fraction of the radius the head is clamped to.
  pub clamp_head_ratio: f32,

  pub preview_eye: Eye,
}

impl Default for RigConfig
{
  fn default() -> Self
  {
    Self {
      stereo_mode: StereoMode::Mono,
      cubemap_resolution: CubemapResolution::Mid,
      interpupillary_distance: 0.065,
      height: 2.0,
      radius: 3.0,
      angle: 270.0,
      elevation: 0.0,
      enable_convergence: false,
      swap_eyes: false,
      clamp_head_position: true,
      clamp_head_ratio: 0.9,
      preview_eye: Eye::Left,
    }
  }
}

impl RigConfig
{
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError>
  {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let config = Self::from_json(&text)?;
    log::info!("loaded rig config from {}", path.display());
    Ok(config)
  }

  pub fn from_json(text: &str) -> Result<Self, ConfigError>
  {
    let config: Self = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn to_json(&self) -> Result<String, ConfigError>
  {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn screen(&self) -> Result<ScreenGeometry, ConfigError>
  {
    Ok(ScreenGeometry::new(self.radius, self.height, self.angle, self.elevation)?)
  }

  pub fn validate(&self) -> Result<(), ConfigError>
  {
    self.screen()?;

    let ipd = self.interpupillary_distance;
    if !ipd.is_finite() || ipd <= 0.0
    {
      return Err(ConfigError::InterpupillaryDistance(self.interpupillary_distance));
    }

    if !(0.0..=1.0).contains(&self.clamp_head_ratio)
    {
      return Err(ConfigError::ClampRatio(self.clamp_head_ratio));
    }

    Ok(())
  }
}
