// src/engine_lib/controller.rs

use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::engine_lib::camera::ViewCamera;
use crate::engine_lib::coverage_state::CoverageState;

const PAN_SPEED_PIXELS: f64 = 400.0;
const ROTATE_SPEED_DEGREES: f64 = 90.0;
const ZOOM_STEP: f64 = 1.1;

/// Keyboard and mouse input for panning, zooming and moving cameras.
pub struct ViewController {
    pan: [f64; 2],
    rotate: f64,
    zoom_steps: f64,
    cursor: [f32; 2],
    place_requested: bool,
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            pan: [0.0, 0.0],
            rotate: 0.0,
            zoom_steps: 0.0,
            cursor: [0.0, 0.0],
            place_requested: false,
        }
    }

    /// Returns true when the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let amount = if key_event.state == ElementState::Pressed { 1.0 } else { 0.0 };
                match key_event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyW) | PhysicalKey::Code(KeyCode::ArrowUp) => { self.pan[1] = -amount; true }
                    PhysicalKey::Code(KeyCode::KeyS) | PhysicalKey::Code(KeyCode::ArrowDown) => { self.pan[1] = amount; true }
                    PhysicalKey::Code(KeyCode::KeyA) | PhysicalKey::Code(KeyCode::ArrowLeft) => { self.pan[0] = -amount; true }
                    PhysicalKey::Code(KeyCode::KeyD) | PhysicalKey::Code(KeyCode::ArrowRight) => { self.pan[0] = amount; true }
                    PhysicalKey::Code(KeyCode::KeyQ) => { self.rotate = amount; true }
                    PhysicalKey::Code(KeyCode::KeyE) => { self.rotate = -amount; true }
                    _ => false,
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.zoom_steps += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / 40.0,
                };
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = [position.x as f32, position.y as f32];
                false
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                self.place_requested = true;
                true
            }
            _ => false,
        }
    }

    pub fn apply(
        &mut self,
        view: &mut ViewCamera,
        state: &mut CoverageState,
        dt: f32,
        screen_width: f32,
        screen_height: f32,
    ) {
        let dt = dt as f64;
        if self.pan != [0.0, 0.0] {
            view.pan_pixels(self.pan[0] * PAN_SPEED_PIXELS * dt, self.pan[1] * PAN_SPEED_PIXELS * dt);
        }
        if self.zoom_steps != 0.0 {
            view.zoom_at(ZOOM_STEP.powf(self.zoom_steps), self.cursor, screen_width, screen_height);
            self.zoom_steps = 0.0;
        }
        if self.rotate != 0.0 {
            state.rotate_selected(self.rotate * ROTATE_SPEED_DEGREES * dt);
        }
        if self.place_requested {
            state.move_selected(view.screen_to_world(self.cursor, screen_width, screen_height));
            self.place_requested = false;
        }
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}
