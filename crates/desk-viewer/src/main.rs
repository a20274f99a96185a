//! Interactive viewer: opens a window, captures the mouse, and drives the
//! renderer with a first-person camera.

use std::sync::Arc;
use std::time::Instant;

use desk_core::SceneObjectDesc;
use desk_render::{Camera, MoveDirection, Renderer};
use glam::Vec3;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, 8.0);

#[derive(Default)]
struct HeldKeys {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

struct App {
    scene: Vec<SceneObjectDesc>,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    held: HeldKeys,
    last_frame: Instant,
}

impl App {
    fn new() -> Self {
        Self {
            scene: desk_core::desk_scene(),
            window: None,
            renderer: None,
            camera: Camera::new(CAMERA_START),
            held: HeldKeys::default(),
            last_frame: Instant::now(),
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        match code {
            KeyCode::Escape if pressed => event_loop.exit(),
            // Edge-triggered: key repeat must not flip the projection back.
            KeyCode::KeyP if pressed && !event.repeat => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.toggle_projection();
                }
            }
            KeyCode::KeyW => self.held.forward = pressed,
            KeyCode::KeyS => self.held.backward = pressed,
            KeyCode::KeyA => self.held.left = pressed,
            KeyCode::KeyD => self.held.right = pressed,
            KeyCode::KeyQ => self.held.up = pressed,
            KeyCode::KeyE => self.held.down = pressed,
            _ => {}
        }
    }

    fn advance_camera(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let moves = [
            (self.held.forward, MoveDirection::Forward),
            (self.held.backward, MoveDirection::Backward),
            (self.held.left, MoveDirection::Left),
            (self.held.right, MoveDirection::Right),
            (self.held.up, MoveDirection::Up),
            (self.held.down, MoveDirection::Down),
        ];
        for (held, direction) in moves {
            if held {
                self.camera.on_key_held(direction, dt);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("desk scene")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!(error = %err, "window creation failed");
                event_loop.exit();
                return;
            }
        };

        // Mouse-look wants raw deltas, not an on-screen cursor.
        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_ok()
        {
            window.set_cursor_visible(false);
        }

        match pollster::block_on(Renderer::new(window.clone(), &self.scene)) {
            Ok(renderer) => {
                info!("renderer ready");
                self.renderer = Some(renderer);
            }
            Err(err) => {
                error!(error = %err, "renderer init failed");
                event_loop.exit();
                return;
            }
        }

        self.last_frame = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event_loop, event),
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                self.camera.on_scroll(dy);
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.advance_camera();
                if let Some(renderer) = &mut self.renderer {
                    renderer.render(&self.camera);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            // Screen y grows downward; the camera wants positive pitch up.
            self.camera.on_mouse_delta(dx as f32, -dy as f32);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
