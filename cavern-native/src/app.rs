use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use cavern_core::{CavernRenderer, CubemapRender, CubemapSink, FaceSelection, FixedPose, RigConfig};
use glam::Vec3;
use winit::{
  application::ApplicationHandler,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::input::controls::{apply_camera_input, apply_head_input, apply_rig_toggles, DEFAULT_HEAD};
use crate::input::InputState;
use crate::renderer::Renderer;

pub fn run(config: RigConfig) -> Result<()>
{
  let cavern = CavernRenderer::new(config).context("invalid rig config")?;

  let event_loop = EventLoop::new().context("creating event loop")?;
  let mut app = CavernApp::new(cavern);

  event_loop.run_app(&mut app).context("running event loop")?;

  match app.failure.take()
  {
    Some(e) => Err(e),
    None => Ok(()),
  }
}

//
// ──────────────────────────────────────────────────────────────
//   LogSink
//
//   The preview has no scene to capture; it reports what a host
//   would render each frame.
// ──────────────────────────────────────────────────────────────
//

struct LogSink;

impl CubemapSink for LogSink
{
  fn render_cubemap(&mut self, render: &CubemapRender)
  {
    log::trace!(
      "capture {:?} ({:?} eye) at {:+.3?}: {}",
      render.slot,
      render.eye,
      render.offset,
      render.faces
    );
  }
}

//
// ──────────────────────────────────────────────────────────────
//   CavernApp
// ──────────────────────────────────────────────────────────────
//

struct CavernApp
{
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,
  camera: Arc<Mutex<Camera>>,
  input: InputState,

  cavern: CavernRenderer,
  head: Vec3,
  selection: Option<FaceSelection>,
  last_frame: Instant,

  failure: Option<anyhow::Error>,
}

impl CavernApp
{
  fn new(cavern: CavernRenderer) -> Self
  {
    let camera = Camera::new(16.0 / 9.0, cavern.screen().radius());

    Self {
      window: None,
      renderer: None,
      camera: Arc::new(Mutex::new(camera)),
      input: InputState::new(),
      cavern,
      head: DEFAULT_HEAD,
      selection: None,
      last_frame: Instant::now(),
      failure: None,
    }
  }

  fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error)
  {
    log::error!("{error:#}");
    self.failure = Some(error);
    event_loop.exit();
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes().with_title("Cavern Preview");
    let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

    let size = window.inner_size();
    if let Ok(mut cam) = self.camera.lock()
    {
      cam.set_aspect(size.width.max(1) as f32 / size.height.max(1) as f32);
    }

    let mesh = self.cavern.screen_mesh();
    let renderer = pollster::block_on(Renderer::new(window.clone(), &self.camera, mesh))?;

    self.window = Some(window);
    self.renderer = Some(renderer);
    self.last_frame = Instant::now();
    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    self.input.handle_event(&event);

    match event
    {
      WindowEvent::CloseRequested => elwt.exit(),

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }

        if let Ok(mut cam) = self.camera.lock()
        {
          cam.set_aspect(size.width as f32 / size.height as f32);
        }

        window.request_redraw();
      }

      _ =>
      {}
    }
  }

  fn apply_toggles(&mut self)
  {
    let Some(next) = apply_rig_toggles(&self.input, self.cavern.config())
    else
    {
      return;
    };

    let eye_changed = next.preview_eye != self.cavern.config().preview_eye;

    log::info!(
      "rig: {:?}, ipd {:.3}, swap eyes {}, convergence {}, clamp {}, preview {:?} eye",
      next.stereo_mode,
      next.interpupillary_distance,
      next.swap_eyes,
      next.enable_convergence,
      next.clamp_head_position,
      next.preview_eye
    );

    if let Err(e) = self.cavern.set_config(next)
    {
      log::warn!("rejected rig change: {e}");
      return;
    }

    if eye_changed
    {
      if let Some(renderer) = &mut self.renderer
      {
        renderer.upload_screen_mesh(self.cavern.screen_mesh());
      }
    }
  }

  fn frame(&mut self) -> Result<()>
  {
    let now = Instant::now();
    let dt = (now - self.last_frame).as_secs_f32().min(0.1);
    self.last_frame = now;

    self.apply_toggles();
    apply_head_input(&self.input, &mut self.head, dt);

    let plan = self.cavern.render_frame(&FixedPose(self.head), &mut LogSink);
    self.head = plan.head;

    if self.selection != Some(plan.selection)
    {
      let s = &plan.selection;
      log::info!(
        "faces: mono {} north {} south {} east {} west {} ({} total)",
        s.mono,
        s.north,
        s.south,
        s.east,
        s.west,
        plan.face_count()
      );
      self.selection = Some(plan.selection);
    }

    let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer)
    else
    {
      return Ok(());
    };

    if let Ok(mut cam) = self.camera.lock()
    {
      apply_camera_input(&self.input, &mut cam);
      renderer.update_view(&cam, plan.head, plan.selection.mono);
    }

    renderer.update_debug(&plan, self.cavern.screen());
    renderer.render()?;

    window.request_redraw();
    self.input.end_frame();
    Ok(())
  }
}

impl ApplicationHandler for CavernApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(e) = self.init_window_and_renderer(event_loop)
    {
      self.fail(event_loop, e);
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, event_loop: &ActiveEventLoop)
  {
    if self.window.is_none()
    {
      return;
    }

    if let Err(e) = self.frame()
    {
      self.fail(event_loop, e);
    }
  }
}
