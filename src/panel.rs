//! The parameter panel.
//!
//! Nine bindings on [`FieldParameters`](crate::config::FieldParameters),
//! drawn with egui. Edits write straight into the shared config; the panel
//! reports a commit only when [`CommitGate`] sees a finished gesture.

use std::path::PathBuf;

use crate::color;
use crate::commit::{CommitGate, EditSignal};
use crate::config::{GalaxyConfig, Parameter};

/// Read-only figures shown under the controls.
#[derive(Debug, Clone, Default)]
pub struct PanelStats {
    pub fps: f32,
    pub generation: u64,
    pub particle_count: u32,
    pub glyph: Option<String>,
    pub last_error: Option<String>,
}

/// Egui panel bound to a [`GalaxyConfig`].
pub struct ParameterPanel {
    gate: CommitGate,
    save_path: Option<PathBuf>,
    save_status: Option<String>,
}

impl ParameterPanel {
    pub fn new() -> Self {
        Self {
            gate: CommitGate::new(),
            save_path: None,
            save_status: None,
        }
    }

    /// Enable the "Save config" button, writing to `path`.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    /// Draw the panel. Returns `true` when an edit was committed this frame.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        config: &mut GalaxyConfig,
        stats: &PanelStats,
    ) -> bool {
        let mut committed = false;

        egui::Window::new("Galaxy")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                for parameter in Parameter::ALL {
                    let widget = ui.scope(|ui| parameter_widget(ui, parameter, config));
                    if let Some(hint) = hover_hint(parameter) {
                        widget.response.on_hover_text(hint);
                    }
                    if self.gate.observe(parameter, widget.inner) {
                        log::debug!("Committed edit to '{}'", parameter.name());
                        committed = true;
                    }
                }
                if self.gate.has_pending() {
                    ui.small("Editing...");
                }

                ui.separator();
                stats_ui(ui, stats);

                if let Some(path) = &self.save_path {
                    ui.separator();
                    if ui.button("Save config").clicked() {
                        self.save_status = Some(match config.save(path) {
                            Ok(()) => {
                                log::info!("Saved config to {}", path.display());
                                format!("Saved to {}", path.display())
                            }
                            Err(e) => {
                                log::error!("Failed to save config: {}", e);
                                e.to_string()
                            }
                        });
                    }
                    if let Some(status) = &self.save_status {
                        ui.small(status);
                    }
                }
            });

        committed
    }
}

impl Default for ParameterPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Tooltip for bindings that do not change the field.
fn hover_hint(parameter: Parameter) -> Option<&'static str> {
    if parameter.affects_generation() {
        None
    } else {
        Some("Kept for saved configs; does not change the field")
    }
}

fn stats_ui(ui: &mut egui::Ui, stats: &PanelStats) {
    ui.label(format!("FPS: {:.0}", stats.fps));
    ui.label(format!("Generation: {}", stats.generation));
    ui.label(format!("Particles: {}", stats.particle_count));
    if let Some(glyph) = &stats.glyph {
        ui.label(format!("Glyph: {:?}", glyph));
    }
    if let Some(error) = &stats.last_error {
        ui.colored_label(egui::Color32::from_rgb(255, 120, 100), error);
    }
}

fn parameter_widget(
    ui: &mut egui::Ui,
    parameter: Parameter,
    config: &mut GalaxyConfig,
) -> EditSignal {
    let params = &mut config.params;
    match parameter {
        Parameter::Count => slider(ui, parameter, &mut params.count),
        Parameter::Size => slider(ui, parameter, &mut params.size),
        Parameter::Radius => slider(ui, parameter, &mut params.radius),
        Parameter::Branches => slider(ui, parameter, &mut params.branches),
        Parameter::Spin => slider(ui, parameter, &mut params.spin),
        Parameter::Randomness => slider(ui, parameter, &mut params.randomness),
        Parameter::RandomnessPower => slider(ui, parameter, &mut params.randomness_power),
        Parameter::InsideColor => color_picker(ui, parameter, &mut params.inside_color),
        Parameter::OutsideColor => color_picker(ui, parameter, &mut params.outside_color),
    }
}

fn slider<N: egui::emath::Numeric>(
    ui: &mut egui::Ui,
    parameter: Parameter,
    value: &mut N,
) -> EditSignal {
    let Some(bounds) = parameter.bounds() else {
        return EditSignal::default();
    };
    let response = ui.add(
        egui::Slider::new(value, N::from_f64(bounds.min)..=N::from_f64(bounds.max))
            .step_by(bounds.step)
            .text(parameter.name()),
    );
    EditSignal::new(response.changed(), response.dragged() || response.has_focus())
}

fn color_picker(ui: &mut egui::Ui, parameter: Parameter, value: &mut String) -> EditSignal {
    ui.horizontal(|ui| {
        let signal = match color::parse_hex(value) {
            Some(mut rgb) => {
                let response = ui.color_edit_button_srgb(&mut rgb);
                if response.changed() {
                    *value = color::to_hex(rgb);
                }
                let popup_open = ui.memory(|mem| mem.any_popup_open());
                EditSignal::new(response.changed(), popup_open)
            }
            // Unparseable values stay editable as text until fixed
            None => {
                let response = ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
                EditSignal::new(response.changed(), response.has_focus())
            }
        };
        ui.label(parameter.name());
        signal
    })
    .inner
}
