//! Egui support for the parameter panel.
//!
//! Only compiled with the `egui` feature. [`EguiIntegration`] owns the egui
//! context and its winit/wgpu glue; [`EguiOverlay`] paints one finished
//! frame on top of the scene through the [`Overlay`] hook.

use std::sync::Arc;
use winit::window::Window;

use super::Overlay;

/// Egui context, winit input state, and wgpu renderer.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Tessellated output of one egui pass.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl EguiIntegration {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut visuals = egui::Visuals::dark();
        visuals.window_shadow = egui::Shadow::NONE;
        visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_visuals(visuals);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        // The scene pass owns the depth buffer; the panel draws without one
        let renderer = egui_wgpu::Renderer::new(device, output_format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a winit event to egui.
    ///
    /// Returns true if egui consumed it and the camera should ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Start an egui pass. UI code runs between this and [`end_pass`](Self::end_pass).
    pub fn begin_pass(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
    }

    /// Finish the pass and tessellate it for painting.
    pub fn end_pass(&mut self, window: &Window) -> EguiFrameOutput {
        let full_output = self.ctx.end_pass();

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        EguiFrameOutput {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Pair this integration with a finished pass, ready to hand to the renderer.
    pub fn overlay(&mut self, output: EguiFrameOutput) -> EguiOverlay<'_> {
        EguiOverlay {
            integration: self,
            output,
        }
    }
}

/// One egui frame waiting to be painted.
pub struct EguiOverlay<'a> {
    integration: &'a mut EguiIntegration,
    output: EguiFrameOutput,
}

impl Overlay for EguiOverlay<'_> {
    fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer> {
        let renderer = &mut self.integration.renderer;
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: self.output.pixels_per_point,
        };

        for (id, image_delta) in &self.output.textures_delta.set {
            renderer.update_texture(device, queue, *id, image_delta);
        }

        let command_buffers = renderer.update_buffers(
            device,
            queue,
            encoder,
            &self.output.paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            renderer.render(
                &mut render_pass.forget_lifetime(),
                &self.output.paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &self.output.textures_delta.free {
            renderer.free_texture(id);
        }

        command_buffers
    }
}
