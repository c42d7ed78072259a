//! Point material descriptions.
//!
//! A [`PointMaterial`] describes how a point cloud is drawn. The renderer
//! picks its pipeline from the blend mode.

use crate::config::FieldParameters;

/// Blending mode for point rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending with depth writes (default).
    #[default]
    Alpha,

    /// Additive blending.
    ///
    /// Overlapping points add up and get brighter. Depth is tested but not
    /// written, so dense regions glow instead of occluding each other.
    Additive,
}

impl BlendMode {
    /// Whether points drawn with this mode write depth.
    pub fn writes_depth(&self) -> bool {
        matches!(self, BlendMode::Alpha)
    }
}

/// Material of one point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    /// Point size in world units at unit distance.
    pub size: f32,
    pub blend_mode: BlendMode,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
}

impl PointMaterial {
    /// Material of the glyph field for the given parameters.
    pub fn field(params: &FieldParameters) -> Self {
        Self {
            size: params.size,
            blend_mode: BlendMode::Additive,
            size_attenuation: true,
        }
    }

    /// Material of the background starfield.
    pub fn stars() -> Self {
        Self {
            size: 0.05,
            blend_mode: BlendMode::Alpha,
            size_attenuation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_material_follows_size() {
        let params = FieldParameters {
            size: 0.004,
            ..Default::default()
        };
        let material = PointMaterial::field(&params);
        assert_eq!(material.size, 0.004);
        assert_eq!(material.blend_mode, BlendMode::Additive);
        assert!(!material.blend_mode.writes_depth());
        assert!(PointMaterial::stars().blend_mode.writes_depth());
    }
}
