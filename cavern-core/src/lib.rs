//! Geometry for curved-screen (CAVERN) display rigs.
//!
//! A tracked viewer stands inside a cylindrical screen. The scene is
//! captured into cubemaps around the viewer's head and re-projected onto
//! the screen. This crate decides which cubemap faces each capture needs,
//! where the stereo captures sit, and builds the screen surface mesh.
//!
//! Coordinates are screen-local and Y-up: X lateral, Z forward (the centre
//! of the screen arc), origin at the centre of the footprint at foot level.

pub mod boundary;
pub mod config;
pub mod error;
pub mod face_mask;
pub mod face_select;
pub mod frame;
pub mod mesh;
pub mod quadratic;
pub mod rig;
pub mod screen;

pub use config::RigConfig;
pub use error::{ConfigError, GeometryError};
pub use face_mask::{CubeFace, FaceMask};
pub use face_select::{select_faces, FaceSelection, StereoMode};
pub use frame::{CavernRenderer, CubemapSink, FixedPose, PoseSource};
pub use mesh::{build_screen_mesh, ScreenMesh, ScreenMeshCache, ScreenVertex};
pub use rig::{CavernUniform, CubemapRender, CubemapResolution, CubemapSlot, Eye, FramePlan};
pub use screen::ScreenGeometry;
