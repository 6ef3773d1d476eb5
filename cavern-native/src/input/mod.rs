pub mod controls;

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

//
// ──────────────────────────────────────────────────────────────
//   Per-frame input snapshot
//
//   Mouse deltas, scroll and key presses accumulate between
//   frames and are cleared by `end_frame`. Held keys persist.
// ──────────────────────────────────────────────────────────────
//

pub struct InputState
{
  pub mouse_x: f32,
  pub mouse_y: f32,
  pub mouse_dx: f32,
  pub mouse_dy: f32,

  pub left_held: bool,
  pub middle_held: bool,
  pub right_held: bool,

  pub scroll: f32,

  held: Vec<KeyCode>,
  pressed: Vec<KeyCode>,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self {
      mouse_x: 0.0,
      mouse_y: 0.0,
      mouse_dx: 0.0,
      mouse_dy: 0.0,

      left_held: false,
      middle_held: false,
      right_held: false,

      scroll: 0.0,

      held: Vec::new(),
      pressed: Vec::new(),
    }
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    match event
    {
      WindowEvent::CursorMoved { position, .. } =>
      {
        let x = position.x as f32;
        let y = position.y as f32;

        self.mouse_dx += x - self.mouse_x;
        self.mouse_dy += y - self.mouse_y;

        self.mouse_x = x;
        self.mouse_y = y;
      }

      WindowEvent::MouseInput { state, button, .. } =>
      {
        let pressed = *state == ElementState::Pressed;

        match button
        {
          MouseButton::Left => self.left_held = pressed,
          MouseButton::Middle => self.middle_held = pressed,
          MouseButton::Right => self.right_held = pressed,
          _ =>
          {}
        }
      }

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(_, y) => self.scroll += *y,
        MouseScrollDelta::PixelDelta(p) => self.scroll += p.y as f32 / 40.0,
      },

      WindowEvent::KeyboardInput { event, .. } =>
      {
        if let PhysicalKey::Code(code) = event.physical_key
        {
          self.set_key(code, event.state == ElementState::Pressed, event.repeat);
        }
      }

      WindowEvent::Focused(false) => self.held.clear(),

      _ =>
      {}
    }
  }

  pub fn set_key(&mut self, code: KeyCode, down: bool, repeat: bool)
  {
    if down
    {
      if !repeat
      {
        self.pressed.push(code);
      }
      if !self.held.contains(&code)
      {
        self.held.push(code);
      }
    }
    else
    {
      self.held.retain(|k| *k != code);
    }
  }

  pub fn is_held(&self, code: KeyCode) -> bool
  {
    self.held.contains(&code)
  }

  /// True once per physical press, not on auto-repeat.
  pub fn was_pressed(&self, code: KeyCode) -> bool
  {
    self.pressed.contains(&code)
  }

  pub fn end_frame(&mut self)
  {
    self.mouse_dx = 0.0;
    self.mouse_dy = 0.0;
    self.scroll = 0.0;
    self.pressed.clear();
  }
}
