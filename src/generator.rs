//! Particle field generation.
//!
//! Turns a [`GlyphMask`] and a set of [`FieldParameters`] into flat position
//! and color buffers ready for upload.

use glam::Vec3;
use rand::Rng;

use crate::color;
use crate::config::FieldParameters;
use crate::error::FieldError;
use crate::glyph::GlyphMask;

/// Flat per-particle buffers, three floats per particle each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleBuffers {
    /// `x, y, z` per particle.
    pub positions: Vec<f32>,
    /// Linear `r, g, b` per particle, each in `[0, 1]`.
    pub colors: Vec<f32>,
}

impl ParticleBuffers {
    /// Zeroed buffers for `count` particles.
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of particle `i`.
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Color of particle `i`.
    pub fn color(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[i * 3..i * 3 + 3])
    }
}

/// Generate a particle field by sampling `mask`.
///
/// Each particle picks a mask point uniformly with replacement, scales it by
/// `radius`, and jitters x and y by up to `randomness / 2` either way. Depth
/// is drawn independently with twice that width. Colors mix `inside_color`
/// and `outside_color` by an independent uniform factor, unrelated to the
/// particle's position.
///
/// # Errors
///
/// - [`FieldError::DegenerateInput`] if `mask` is empty.
/// - [`FieldError::InvalidConfiguration`] if a color does not parse.
pub fn generate<R: Rng + ?Sized>(
    mask: &GlyphMask,
    params: &FieldParameters,
    rng: &mut R,
) -> Result<ParticleBuffers, FieldError> {
    if mask.is_empty() {
        return Err(FieldError::DegenerateInput {
            glyph: String::new(),
        });
    }

    let inside = color::resolve("insideColor", &params.inside_color)?;
    let outside = color::resolve("outsideColor", &params.outside_color)?;

    let count = params.count as usize;
    let points = mask.points();
    let mut buffers = ParticleBuffers::zeroed(count);

    for (position, color) in buffers
        .positions
        .chunks_exact_mut(3)
        .zip(buffers.colors.chunks_exact_mut(3))
    {
        let p = points[rng.gen_range(0..points.len())];

        // (u - 0.5) * r instead of gen_range so that zero or negative
        // randomness stays valid
        let x = p.x * params.radius + (rng.gen::<f32>() - 0.5) * params.randomness;
        let y = p.y * params.radius + (rng.gen::<f32>() - 0.5) * params.randomness;
        let z = (rng.gen::<f32>() - 0.5) * params.randomness * 2.0;
        position.copy_from_slice(&[x, y, z]);

        let mixed = inside.lerp(outside, rng.gen::<f32>()).clamp(Vec3::ZERO, Vec3::ONE);
        color.copy_from_slice(&mixed.to_array());
    }

    Ok(buffers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn params(count: u32, radius: f32, randomness: f32) -> FieldParameters {
        FieldParameters {
            count,
            radius,
            randomness,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_point_without_jitter() {
        let mask = GlyphMask::from_points(vec![Vec2::ZERO]);
        let mut rng = SmallRng::seed_from_u64(1);
        let buffers = generate(&mask, &params(10, 5.0, 0.0), &mut rng).unwrap();

        assert_eq!(buffers.len(), 10);
        for i in 0..10 {
            assert_eq!(buffers.position(i), Vec3::ZERO);
        }
    }

    #[test]
    fn test_zero_count() {
        let mask = GlyphMask::from_points(vec![Vec2::ONE]);
        let mut rng = SmallRng::seed_from_u64(2);
        let buffers = generate(&mask, &params(0, 1.0, 0.2), &mut rng).unwrap();
        assert!(buffers.is_empty());
        assert!(buffers.colors.is_empty());
    }

    #[test]
    fn test_empty_mask_is_degenerate() {
        let mut rng = SmallRng::seed_from_u64(3);
        let err = generate(&GlyphMask::default(), &params(10, 1.0, 0.2), &mut rng).unwrap_err();
        assert!(matches!(err, FieldError::DegenerateInput { .. }));
    }

    #[test]
    fn test_invalid_color() {
        let mask = GlyphMask::from_points(vec![Vec2::ONE]);
        let mut rng = SmallRng::seed_from_u64(4);
        let mut p = params(10, 1.0, 0.2);
        p.outside_color = "not-a-color".into();
        let err = generate(&mask, &p, &mut rng).unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidConfiguration {
                parameter: "outsideColor",
                value: "not-a-color".into()
            }
        );
    }

    #[test]
    fn test_depth_jitter_is_wider() {
        let mask = GlyphMask::from_points(vec![Vec2::ZERO]);
        let mut rng = SmallRng::seed_from_u64(5);
        let buffers = generate(&mask, &params(20_000, 1.0, 1.0), &mut rng).unwrap();

        let mut max_xy = 0.0f32;
        let mut max_z = 0.0f32;
        for i in 0..buffers.len() {
            let p = buffers.position(i);
            max_xy = max_xy.max(p.x.abs()).max(p.y.abs());
            max_z = max_z.max(p.z.abs());
        }
        assert!(max_xy <= 0.5);
        assert!(max_z <= 1.0);
        assert!(max_z > 0.9, "depth spread too narrow: {}", max_z);
    }

    #[test]
    fn test_negative_radius_mirrors() {
        let mask = GlyphMask::from_points(vec![Vec2::new(1.0, 0.5)]);
        let mut rng = SmallRng::seed_from_u64(6);
        let buffers = generate(&mask, &params(4, -2.0, 0.0), &mut rng).unwrap();
        assert_eq!(buffers.position(3), Vec3::new(-2.0, -1.0, 0.0));
    }

    #[test]
    fn test_same_color_endpoints() {
        let mask = GlyphMask::from_points(vec![Vec2::ZERO]);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut p = params(50, 1.0, 0.0);
        p.inside_color = "#ffffff".into();
        p.outside_color = "#ffffff".into();
        let buffers = generate(&mask, &p, &mut rng).unwrap();
        for i in 0..buffers.len() {
            assert!((buffers.color(i) - Vec3::ONE).abs().max_element() < 1e-5);
        }
    }
}
