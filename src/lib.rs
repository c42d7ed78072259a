//! # Glyph Galaxy
//!
//! A glyph-shaped 3D particle field with a live parameter panel.
//!
//! Text is rasterized into a square scratch image, the bright cells become a
//! 2D sample mask, and the generator scatters a configurable number of
//! particles over that mask with random depth and jitter. Each particle gets
//! a color mixed between two endpoints. The field slowly rotates above a
//! static starfield, viewed through a damped orbit camera.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glyph_galaxy::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     let mut config = GalaxyConfig::default();
//!     config.params.inside_color = "#ffcc00".into();
//!     config.initial_glyph = "Hi".into();
//!
//!     Galaxy::new().with_config(config).run()
//! }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Text to sample mask | [`glyph`] |
//! | Mask to particle buffers | [`generator`] |
//! | Buffers to displayed field | [`lifecycle`] |
//! | Panel edits to commits | [`commit`] |
//!
//! Only the windowed viewer needs a GPU. Everything up to
//! [`FieldLifecycle::regenerate`] can run headless against any
//! [`FieldBackend`].
//!
//! ## Features
//!
//! - `egui` (default): the parameter panel.

pub mod color;
pub mod commit;
pub mod config;
pub mod error;
mod galaxy;
pub mod generator;
pub mod glyph;
mod gpu;
pub mod lifecycle;
pub mod material;
#[cfg(feature = "egui")]
pub mod panel;
pub mod starfield;
pub mod time;

pub use config::{FieldParameters, GalaxyConfig, Parameter, WindowConfig};
pub use error::{ConfigError, FieldError, GpuError, RunError};
pub use galaxy::{Galaxy, ROTATION_SPEED};
pub use generator::{generate, ParticleBuffers};
pub use glam::{Vec2, Vec3};
pub use glyph::{rasterize, BitmapFont, GlyphMask, GlyphRenderer};
pub use gpu::{Camera, GpuField, GpuFieldBackend, GpuState, Overlay};
pub use lifecycle::{ActiveField, FieldBackend, FieldLifecycle, FieldState};
pub use material::{BlendMode, PointMaterial};
pub use starfield::Starfield;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use glyph_galaxy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::commit::{CommitGate, EditSignal};
    pub use crate::config::{FieldParameters, GalaxyConfig, Parameter};
    pub use crate::error::{FieldError, RunError};
    pub use crate::galaxy::Galaxy;
    pub use crate::generator::{generate, ParticleBuffers};
    pub use crate::glyph::{rasterize, GlyphMask, GlyphRenderer};
    pub use crate::lifecycle::{FieldBackend, FieldLifecycle, FieldState};
    pub use crate::material::PointMaterial;
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
    #[cfg(feature = "egui")]
    pub use egui;
}
