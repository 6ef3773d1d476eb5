mod axes;
mod core;
mod debug;
mod depth;
mod screen;

pub use self::core::Renderer;
