use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::OrbitCamera;
use crate::loaders::load_gltf_file;
use crate::mesh::{fallback_cube, Mesh, NORMALIZED_SIZE};
use crate::renderer::Renderer;
use glam::Vec3;

const INITIAL_WINDOW_WIDTH: f64 = 1280.0;
const INITIAL_WINDOW_HEIGHT: f64 = 720.0;

/// Initial camera placement, looking at the origin.
const INITIAL_EYE: Vec3 = Vec3::new(0.0, 1.0, 3.0);

// Pixel-delta wheels (touchpads) report much larger magnitudes than
// line-delta wheels.
const PIXELS_PER_SCROLL_LINE: f64 = 40.0;

pub struct ViewerApp {
    model_path: PathBuf,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: OrbitCamera,
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
}

impl ViewerApp {
    pub fn new(model_path: PathBuf) -> Self {
        Self {
            model_path,
            window: None,
            renderer: None,
            camera: OrbitCamera::new(
                INITIAL_EYE,
                Vec3::ZERO,
                (INITIAL_WINDOW_WIDTH / INITIAL_WINDOW_HEIGHT) as f32,
            ),
            dragging: false,
            last_cursor: None,
        }
    }

    /// The model, normalized into the display envelope - or the fallback
    /// cube, so the viewer never shows an empty scene. Load failure is
    /// terminal: there are no retries.
    fn load_scene_mesh(&self) -> Mesh {
        match load_gltf_file(&self.model_path) {
            Ok(mut mesh) => {
                mesh.normalize_to_fit(NORMALIZED_SIZE);
                mesh
            }
            Err(e) => {
                log::error!("Error loading model: {:#}", e);
                fallback_cube()
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Scene Viewer")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let mut renderer = match pollster::block_on(Renderer::new(window.clone())) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let mesh = self.load_scene_mesh();
            renderer.upload_mesh(&mesh);
            self.camera.set_aspect(renderer.aspect());

            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                    self.camera.set_aspect(renderer.aspect());
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
                if !self.dragging {
                    self.last_cursor = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let Some(last) = self.last_cursor {
                        self.camera.rotate(
                            (position.x - last.x) as f32,
                            (position.y - last.y) as f32,
                        );
                    }
                }
                self.last_cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_SCROLL_LINE) as f32,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                self.camera.update();

                if let Some(renderer) = &mut self.renderer {
                    match renderer.render(&self.camera) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = renderer.size();
                            renderer.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of GPU memory, exiting");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FALLBACK_COLOR;

    #[test]
    fn load_failure_yields_the_fallback_cube() {
        let app = ViewerApp::new(PathBuf::from("/definitely/not/here.glb"));
        let mesh = app.load_scene_mesh();

        // One cube, nothing else, never an error surfaced.
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.vertices.iter().all(|v| v.color == FALLBACK_COLOR));
    }
}
