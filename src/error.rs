//! Error types for Glyph Galaxy.
//!
//! This module provides error types for field regeneration, GPU
//! initialization, configuration loading, and running the viewer.

use std::fmt;

/// Errors that can occur while regenerating a particle field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The glyph produced no ink cells, so there is nothing to sample.
    DegenerateInput {
        /// The glyph string that was rasterized.
        glyph: String,
    },
    /// A parameter value could not be interpreted where it was used.
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value, as supplied.
        value: String,
    },
    /// Building or releasing a field resource failed.
    Resource(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::DegenerateInput { glyph } => write!(
                f,
                "Glyph {:?} has no pixels above the ink threshold; nothing to sample",
                glyph
            ),
            FieldError::InvalidConfiguration { parameter, value } => {
                write!(f, "Invalid value {:?} for parameter '{}'", value, parameter)
            }
            FieldError::Resource(msg) => write!(f, "Field resource error: {}", msg),
        }
    }
}

impl std::error::Error for FieldError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reported no supported formats or alpha modes.
    IncompatibleSurface,
    /// Uploading a static point cloud failed.
    Upload(FieldError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::IncompatibleSurface => write!(f, "Surface is not compatible with the selected adapter"),
            GpuError::Upload(e) => write!(f, "Failed to upload point cloud: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::Upload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when loading or saving a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum RunError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The configuration could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
            RunError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
            RunError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_messages() {
        let err = FieldError::DegenerateInput { glyph: " ".into() };
        assert!(err.to_string().contains("no pixels"));

        let err = FieldError::InvalidConfiguration {
            parameter: "insideColor",
            value: "#zzzzzz".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("insideColor"));
        assert!(msg.contains("#zzzzzz"));
    }

    #[test]
    fn test_config_error_propagates_into_run_error() {
        fn start(path: &str) -> Result<crate::config::GalaxyConfig, RunError> {
            Ok(crate::config::GalaxyConfig::load(path)?)
        }

        let err = start("/nonexistent/galaxy.json").unwrap_err();
        assert!(matches!(err, RunError::Config(ConfigError::Io(_))));
        assert!(err.to_string().starts_with("Config error"));
    }

    #[test]
    fn test_config_error_source() {
        use std::error::Error;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io.into();
        assert!(err.source().is_some());
    }
}
