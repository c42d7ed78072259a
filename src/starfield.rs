//! Static background starfield.

use rand::Rng;

use crate::generator::ParticleBuffers;

/// Number of background stars.
pub const STAR_COUNT: usize = 500;

/// Half-size of the cube the stars are scattered in.
pub const STAR_EXTENT: f32 = 50.0;

/// Immutable star positions, uniform in a cube of side `2 * STAR_EXTENT`.
///
/// Generated once at startup and kept for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct Starfield {
    positions: Vec<f32>,
}

impl Starfield {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let positions = (0..STAR_COUNT * 3)
            .map(|_| (rng.gen::<f32>() - 0.5) * STAR_EXTENT * 2.0)
            .collect();
        Self { positions }
    }

    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Renderable buffers with every star colored white.
    pub fn buffers(&self) -> ParticleBuffers {
        ParticleBuffers {
            positions: self.positions.clone(),
            colors: vec![1.0; self.positions.len()],
        }
    }
}
