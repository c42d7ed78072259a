//! Configuration types for Glyph Galaxy.
//!
//! [`GalaxyConfig`] is the single configuration value the viewer owns. The
//! parameter panel edits it in place and the field lifecycle reads it on
//! every regeneration. It can be serialized to JSON and loaded at startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Tunable options of the glyph particle field.
///
/// `branches`, `spin` and `randomness_power` are exposed on the panel and
/// persisted, but the generator does not read them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldParameters {
    /// Number of particles to generate.
    pub count: u32,
    /// On-screen point size.
    pub size: f32,
    /// Scale applied to the mask's plane coordinates.
    pub radius: f32,
    /// Unused by the generator.
    pub branches: u32,
    /// Unused by the generator.
    pub spin: f32,
    /// Jitter magnitude.
    pub randomness: f32,
    /// Unused by the generator.
    pub randomness_power: f32,
    /// First endpoint of the color mix, as a hex string.
    pub inside_color: String,
    /// Second endpoint of the color mix, as a hex string.
    pub outside_color: String,
}

impl Default for FieldParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: "#ff6030".into(),
            outside_color: "#1b3984".into(),
        }
    }
}

/// Window settings for the viewer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Glyph Galaxy".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Complete viewer configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Field parameters edited by the panel.
    pub params: FieldParameters,
    /// Glyph used for the first field built at startup.
    pub initial_glyph: String,
    /// Glyph used for every regeneration triggered by a committed edit.
    pub commit_glyph: String,
    /// Side length of the square scratch raster, in pixels.
    pub raster_size: u32,
    /// Luminance threshold (0-1) above which a raster cell counts as ink.
    pub threshold: f32,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub window: WindowConfig,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            params: FieldParameters::default(),
            initial_glyph: "Ma".into(),
            commit_glyph: "M".into(),
            raster_size: 128,
            threshold: 0.5,
            seed: None,
            window: WindowConfig::default(),
        }
    }
}

impl GalaxyConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::load(path)?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::info!("{} does not exist yet, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// Presentation-layer range of a numeric binding.
///
/// The core never clamps to these; they only drive the panel widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Bounds {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

/// One of the nine bindings on the parameter panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
}

impl Parameter {
    /// All bindings, in panel order.
    pub const ALL: [Parameter; 9] = [
        Parameter::Count,
        Parameter::Size,
        Parameter::Radius,
        Parameter::Branches,
        Parameter::Spin,
        Parameter::Randomness,
        Parameter::RandomnessPower,
        Parameter::InsideColor,
        Parameter::OutsideColor,
    ];

    /// Parameter name as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Count => "count",
            Parameter::Size => "size",
            Parameter::Radius => "radius",
            Parameter::Branches => "branches",
            Parameter::Spin => "spin",
            Parameter::Randomness => "randomness",
            Parameter::RandomnessPower => "randomnessPower",
            Parameter::InsideColor => "insideColor",
            Parameter::OutsideColor => "outsideColor",
        }
    }

    /// Slider range, or `None` for color bindings.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Parameter::Count => Some(Bounds::new(100.0, 1_000_000.0, 100.0)),
            Parameter::Size => Some(Bounds::new(0.001, 0.01, 0.001)),
            Parameter::Radius => Some(Bounds::new(0.01, 20.0, 0.01)),
            Parameter::Branches => Some(Bounds::new(2.0, 20.0, 1.0)),
            Parameter::Spin => Some(Bounds::new(-5.0, 5.0, 0.001)),
            Parameter::Randomness => Some(Bounds::new(0.0, 2.0, 0.001)),
            Parameter::RandomnessPower => Some(Bounds::new(1.0, 10.0, 0.001)),
            Parameter::InsideColor | Parameter::OutsideColor => None,
        }
    }

    /// Whether the generator reads this option.
    pub fn affects_generation(&self) -> bool {
        !matches!(
            self,
            Parameter::Branches | Parameter::Spin | Parameter::RandomnessPower
        )
    }

    /// Position in [`Parameter::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scene() {
        let config = GalaxyConfig::default();
        assert_eq!(config.params.count, 100_000);
        assert_eq!(config.params.radius, 5.0);
        assert_eq!(config.params.randomness, 0.2);
        assert_eq!(config.params.inside_color, "#ff6030");
        assert_eq!(config.params.outside_color, "#1b3984");
        assert_eq!(config.initial_glyph, "Ma");
        assert_eq!(config.commit_glyph, "M");
        assert_eq!(config.raster_size, 128);
        assert_eq!(config.threshold, 0.5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GalaxyConfig =
            serde_json::from_str(r##"{ "params": { "count": 500, "insideColor": "#ffffff" } }"##)
                .unwrap();
        assert_eq!(config.params.count, 500);
        assert_eq!(config.params.inside_color, "#ffffff");
        assert_eq!(config.params.outside_color, "#1b3984");
        assert_eq!(config.commit_glyph, "M");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("galaxy.json");

        let mut config = GalaxyConfig::default();
        config.params.count = 1234;
        config.seed = Some(7);
        config.save(&path).unwrap();

        let loaded = GalaxyConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("galaxy.json");
        assert_eq!(GalaxyConfig::load_or_default(&path).unwrap(), GalaxyConfig::default());

        fs::write(&path, "{ not json").unwrap();
        let err = GalaxyConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = GalaxyConfig::load("/nonexistent/galaxy.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parameter_table() {
        for (i, p) in Parameter::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
        let count = Parameter::Count.bounds().unwrap();
        assert_eq!((count.min, count.max, count.step), (100.0, 1_000_000.0, 100.0));
        assert!(Parameter::InsideColor.bounds().is_none());
        assert!(!Parameter::Spin.affects_generation());
        assert!(Parameter::Randomness.affects_generation());
        assert_eq!(Parameter::RandomnessPower.name(), "randomnessPower");
    }
}
