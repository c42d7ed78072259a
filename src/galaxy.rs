//! The viewer: window, event loop, and per-frame orchestration.
//!
//! [`Galaxy`] is the entry point. It opens a window, scatters the starfield,
//! builds the first glyph field, and then runs the render loop: advance the
//! clock, damp the camera, show the panel, regenerate on commit, draw.

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::GalaxyConfig;
use crate::error::RunError;
use crate::gpu::{GpuField, GpuState, Overlay};
use crate::lifecycle::FieldLifecycle;
use crate::starfield::Starfield;
use crate::time::Time;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::{EguiFrameOutput, EguiIntegration};
#[cfg(feature = "egui")]
use crate::panel::{PanelStats, ParameterPanel};

/// Field rotation about +Y, in radians per second.
pub const ROTATION_SPEED: f32 = 0.1;

/// Radians of orbit per pixel of mouse drag.
const DRAG_SENSITIVITY: f32 = 0.005;

/// Builder for the glyph galaxy viewer.
///
/// # Example
///
/// ```ignore
/// use glyph_galaxy::prelude::*;
///
/// let mut config = GalaxyConfig::default();
/// config.params.count = 50_000;
///
/// Galaxy::new().with_config(config).run()?;
/// ```
pub struct Galaxy {
    config: GalaxyConfig,
    config_path: Option<PathBuf>,
}

impl Galaxy {
    /// Viewer with the default configuration.
    pub fn new() -> Self {
        Self {
            config: GalaxyConfig::default(),
            config_path: None,
        }
    }

    pub fn with_config(mut self, config: GalaxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Where the panel's "Save config" button writes.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.config_path);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    config: GalaxyConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    lifecycle: FieldLifecycle<GpuField>,
    time: Time,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    #[cfg(feature = "egui")]
    panel: ParameterPanel,
    /// Message of the last failed regeneration, cleared on success.
    last_error: Option<String>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    /// Fatal error raised inside the event loop.
    error: Option<RunError>,
}

impl App {
    fn new(config: GalaxyConfig, config_path: Option<PathBuf>) -> Self {
        #[cfg(feature = "egui")]
        let panel = match config_path {
            Some(path) => ParameterPanel::new().with_save_path(path),
            None => ParameterPanel::new(),
        };
        #[cfg(not(feature = "egui"))]
        let _ = config_path;

        Self {
            lifecycle: FieldLifecycle::from_config(&config),
            config,
            window: None,
            gpu_state: None,
            time: Time::new(),
            #[cfg(feature = "egui")]
            egui: None,
            #[cfg(feature = "egui")]
            panel,
            last_error: None,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let stars = Starfield::generate(&mut rng);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), &stars.buffers()))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(
                gpu_state.device(),
                gpu_state.format(),
                &window,
            ));
        }

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);

        let glyph = self.config.initial_glyph.clone();
        self.regenerate(&glyph);
        Ok(())
    }

    /// Rebuild the field for `glyph`. Failures keep the previous field.
    fn regenerate(&mut self, glyph: &str) {
        let Some(gpu_state) = &self.gpu_state else {
            return;
        };
        let mut backend = gpu_state.field_backend();
        match self.lifecycle.regenerate(&mut backend, glyph, &self.config) {
            Ok(_) => self.last_error = None,
            Err(e) => {
                log::warn!("Regeneration failed, keeping previous field: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    #[cfg(feature = "egui")]
    fn panel_stats(&self) -> PanelStats {
        let current = self.lifecycle.current();
        PanelStats {
            fps: self.time.fps(),
            generation: current.map_or(0, |f| f.generation),
            particle_count: current.map_or(0, |f| f.particle_count),
            glyph: current.map(|f| f.glyph.clone()),
            last_error: self.last_error.clone(),
        }
    }

    /// Run the panel for this frame and apply a committed edit.
    #[cfg(feature = "egui")]
    fn run_panel(&mut self, window: &Window) -> Option<EguiFrameOutput> {
        let stats = self.panel_stats();
        let egui = self.egui.as_mut()?;

        egui.begin_pass(window);
        let committed = self.panel.show(&egui.ctx, &mut self.config, &stats);
        let output = egui.end_pass(window);

        if committed {
            let glyph = self.config.commit_glyph.clone();
            self.regenerate(&glyph);
        }
        Some(output)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let (elapsed, _) = self.time.update();

        #[cfg(feature = "egui")]
        let frame_output = self.run_panel(&window);

        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        gpu_state.camera.update();
        let field = self.lifecycle.current().map(|f| &f.resource);

        #[cfg(feature = "egui")]
        let mut egui_overlay = match (&mut self.egui, frame_output) {
            (Some(egui), Some(output)) => Some(egui.overlay(output)),
            _ => None,
        };
        #[cfg(feature = "egui")]
        let overlay = egui_overlay.as_mut().map(|o| o as &mut dyn Overlay);
        #[cfg(not(feature = "egui"))]
        let overlay: Option<&mut dyn Overlay> = None;

        match gpu_state.render(field, elapsed * ROTATION_SPEED, overlay) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(winit::dpi::PhysicalSize {
                    width: gpu_state.config.width,
                    height: gpu_state.config.height,
                })
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }

        window.request_redraw();
    }

    /// Offer an event to the panel first. True if it was consumed there.
    #[cfg(feature = "egui")]
    fn panel_consumed(&mut self, event: &WindowEvent) -> bool {
        match (&mut self.egui, &self.window) {
            (Some(egui), Some(window)) => egui.on_window_event(window, event),
            _ => false,
        }
    }

    #[cfg(not(feature = "egui"))]
    fn panel_consumed(&mut self, _event: &WindowEvent) -> bool {
        false
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to start viewer: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = self.panel_consumed(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    let pressed = state == ElementState::Pressed;
                    self.mouse_pressed = pressed && !consumed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state
                                .camera
                                .rotate(-dx * DRAG_SENSITIVITY, dy * DRAG_SENSITIVITY);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::FieldState;

    #[test]
    fn test_app_starts_without_field() {
        let app = App::new(GalaxyConfig::default(), None);
        assert!(app.window.is_none());
        assert_eq!(app.lifecycle.state(), FieldState::Empty);
        assert!(app.error.is_none());
    }

    #[cfg(feature = "egui")]
    #[test]
    fn test_stats_before_first_field() {
        let mut app = App::new(GalaxyConfig::default(), None);
        app.last_error = Some("boom".into());
        let stats = app.panel_stats();
        assert_eq!(stats.generation, 0);
        assert_eq!(stats.particle_count, 0);
        assert!(stats.glyph.is_none());
        assert_eq!(stats.last_error.as_deref(), Some("boom"));
    }
}
