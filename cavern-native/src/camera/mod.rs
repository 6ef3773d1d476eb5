mod orbit;
mod uniform;

pub use orbit::Camera;
pub use uniform::ViewUniform;
