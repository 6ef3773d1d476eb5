mod app;
mod camera;
mod input;
mod renderer;

use std::path::PathBuf;

use anyhow::Context;
use cavern_core::RigConfig;

fn main() -> anyhow::Result<()>
{
  // RUST_LOG wins when set; wgpu's HAL is too chatty at info.
  let env = env_logger::Env::default().default_filter_or("info,wgpu_hal=off,naga=warn");
  env_logger::Builder::from_env(env).init();

  let config = match std::env::args_os().nth(1).map(PathBuf::from)
  {
    Some(path) => RigConfig::load(&path).with_context(|| format!("loading {}", path.display()))?,
    None =>
    {
      log::info!("no rig config given, using defaults");
      RigConfig::default()
    }
  };

  app::run(config)
}
