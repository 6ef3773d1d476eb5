use std::path::PathBuf;

use thiserror::Error;

//
// ──────────────────────────────────────────────────────────────
//   Geometry errors
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError
{
  #[error("screen {field} must be finite, got {value}")]
  NotFinite { field: &'static str, value: f32 },

  #[error("screen radius must be positive, got {0}")]
  Radius(f32),

  #[error("screen height must be positive, got {0}")]
  Height(f32),

  #[error("screen angle must be in (0, 360] degrees, got {0}")]
  Angle(f32),
}

//
// ──────────────────────────────────────────────────────────────
//   Config errors
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
pub enum ConfigError
{
  #[error("failed to read rig config {}", path.display())]
  Io
  {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse rig config")]
  Parse(#[from] serde_json::Error),

  #[error(transparent)]
  Geometry(#[from] GeometryError),

  #[error("interpupillary distance must be positive, got {0}")]
  InterpupillaryDistance(f32),

  #[error("head clamp ratio must be in [0, 1], got {0}")]
  ClampRatio(f32),
}
