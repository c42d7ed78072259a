//! Field lifecycle management.
//!
//! [`FieldLifecycle`] owns the one field that is currently displayed and
//! replaces it atomically on every regeneration. Building and releasing the
//! renderable resource is delegated to a [`FieldBackend`], so the same state
//! machine drives the GPU renderer and the in-memory backends used in tests.
//!
//! # States
//!
//! | State | Meaning |
//! |-------|---------|
//! | [`FieldState::Empty`] | No field has been built yet |
//! | [`FieldState::Active`] | Exactly one field is attached |
//!
//! # Regeneration
//!
//! ```text
//! rasterize(glyph) -> generate(mask, params) -> backend.build(..)
//!     -> backend.release(old)   (only when Active)
//!     -> attach new
//! ```
//!
//! The new resource is fully built before the old one is released, so the
//! attached field is never half-built. A failure before the release step
//! leaves the previous field attached. If releasing the old field fails, the
//! new resource is released instead and the old one stays attached.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::GalaxyConfig;
use crate::error::FieldError;
use crate::generator::{self, ParticleBuffers};
use crate::glyph::{self, BitmapFont, GlyphRenderer};
use crate::material::PointMaterial;

/// Builds and releases renderable field resources.
pub trait FieldBackend {
    /// The renderable bundle (buffers, material, scene node).
    type Resource;

    /// Create a resource from fully populated buffers.
    fn build(
        &mut self,
        buffers: &ParticleBuffers,
        material: &PointMaterial,
    ) -> Result<Self::Resource, FieldError>;

    /// Release the resource's geometry and material.
    ///
    /// The resource is dropped by the caller afterwards.
    fn release(&mut self, resource: &mut Self::Resource) -> Result<(), FieldError>;
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Empty,
    Active,
}

/// The attached field and what it was built from.
#[derive(Debug)]
pub struct ActiveField<R> {
    pub resource: R,
    pub glyph: String,
    pub particle_count: u32,
    /// Number of successful regenerations up to and including this one.
    pub generation: u64,
}

/// Owner of the displayed particle field.
pub struct FieldLifecycle<R> {
    current: Option<ActiveField<R>>,
    renderer: Box<dyn GlyphRenderer>,
    rng: SmallRng,
    generation: u64,
}

impl<R> FieldLifecycle<R> {
    /// Create an empty lifecycle seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// Create an empty lifecycle with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    /// Create an empty lifecycle seeded from `config.seed` when present.
    pub fn from_config(config: &GalaxyConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            current: None,
            renderer: Box::new(BitmapFont),
            rng,
            generation: 0,
        }
    }

    /// Replace the text renderer used for rasterization.
    pub fn with_renderer(mut self, renderer: impl GlyphRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn state(&self) -> FieldState {
        if self.current.is_some() {
            FieldState::Active
        } else {
            FieldState::Empty
        }
    }

    /// The attached field, if any.
    pub fn current(&self) -> Option<&ActiveField<R>> {
        self.current.as_ref()
    }

    /// Regenerate the field for `glyph` from the current parameters.
    ///
    /// On error the lifecycle is left exactly as it was.
    pub fn regenerate<B>(
        &mut self,
        backend: &mut B,
        glyph: &str,
        config: &GalaxyConfig,
    ) -> Result<&ActiveField<R>, FieldError>
    where
        B: FieldBackend<Resource = R>,
    {
        let mask = glyph::rasterize_with(
            self.renderer.as_ref(),
            glyph,
            config.raster_size,
            config.threshold,
        );
        if mask.is_empty() {
            return Err(FieldError::DegenerateInput {
                glyph: glyph.to_string(),
            });
        }

        let buffers = generator::generate(&mask, &config.params, &mut self.rng)?;
        let material = PointMaterial::field(&config.params);
        let mut resource = backend.build(&buffers, &material)?;

        if let Some(old) = self.current.as_mut() {
            if let Err(err) = backend.release(&mut old.resource) {
                if let Err(cleanup) = backend.release(&mut resource) {
                    log::error!("Failed to release replacement field: {}", cleanup);
                }
                return Err(err);
            }
        }

        self.generation += 1;
        log::info!(
            "Field regenerated for {:?}: {} particles from {} mask points (generation {})",
            glyph,
            buffers.len(),
            mask.len(),
            self.generation
        );

        let active = self.current.insert(ActiveField {
            resource,
            glyph: glyph.to_string(),
            particle_count: config.params.count,
            generation: self.generation,
        });
        Ok(active)
    }
}

impl<R> Default for FieldLifecycle<R> {
    fn default() -> Self {
        Self::new()
    }
}
