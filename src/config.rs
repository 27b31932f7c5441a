//! Renderer settings loaded from RON.
//!
//! Every field has a default, so a config file only needs to list the values
//! it changes:
//!
//! ```text
//! (
//!     width: 640,
//!     height: 480,
//!     cull_mode: KeepEyeFacing,
//! )
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::projection::{Projection, YAxis};
use crate::render::{CullMode, RenderMode};

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
    /// A value was read but is out of range.
    Invalid(String),
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render target size in pixels.
    pub width: u32,
    pub height: u32,
    /// Window pixels per rendered pixel.
    pub window_scale: u32,

    pub background: [u8; 3],
    /// Base color for meshes that do not set their own.
    pub base_color: [u8; 3],

    pub light_position: [f32; 3],
    pub light_diffuse: f32,
    pub light_ambient: f32,

    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub camera_position: [f32; 3],

    pub y_axis: YAxis,
    pub cull_mode: CullMode,
    pub render_mode: RenderMode,
    pub draw_axes: bool,

    /// Mesh rotation speed per axis, radians per second.
    pub spin: [f32; 3],
    /// Flip normals read from model files (they usually point outward).
    pub invert_model_normals: bool,

    /// Camera speed in units per second.
    pub move_speed: f32,
    /// Radians per pixel of mouse movement.
    pub look_sensitivity: f32,
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            window_scale: 2,
            background: [50, 0, 0],
            base_color: [255, 255, 255],
            light_position: [10.0, 10.0, 10.0],
            light_diffuse: 0.8,
            light_ambient: 0.2,
            fov_y_degrees: 60.0,
            z_near: 0.1,
            z_far: 100.0,
            camera_position: [0.0, 0.0, 10.0],
            y_axis: YAxis::Down,
            cull_mode: CullMode::KeepAwayFacing,
            render_mode: RenderMode::Shaded,
            draw_axes: true,
            spin: [0.6, 1.2, 1.8],
            invert_model_normals: true,
            move_speed: 6.0,
            look_sensitivity: 0.01,
            target_fps: 60,
        }
    }
}

impl RenderConfig {
    /// Read and validate a RON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`RenderConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(&path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "config {} not found, using defaults",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.width == 0 || self.height == 0 {
            return invalid("width and height must be non-zero");
        }
        if self.window_scale == 0 {
            return invalid("window_scale must be non-zero");
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return invalid("fov_y_degrees must be between 0 and 180");
        }
        if !(self.z_near > 0.0) {
            return invalid("z_near must be positive");
        }
        if !(self.z_far > self.z_near) {
            return invalid("z_far must be greater than z_near");
        }
        if self.target_fps == 0 {
            return invalid("target_fps must be non-zero");
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color {
        Color::from_rgb8(self.background)
    }

    pub fn base_color(&self) -> Color {
        Color::from_rgb8(self.base_color)
    }

    pub fn light_position(&self) -> Vec3 {
        Vec3::from_array(self.light_position)
    }

    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    pub fn spin(&self) -> Vec3 {
        Vec3::from_array(self.spin)
    }

    pub fn projection(&self) -> Projection {
        Projection::from_degrees(
            self.fov_y_degrees,
            self.width as f32 / self.height as f32,
            self.z_near,
            self.z_far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = RenderConfig::from_ron_str(
            "(width: 640, height: 480, cull_mode: KeepEyeFacing, y_axis: Up)",
        )
        .unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.cull_mode, CullMode::KeepEyeFacing);
        assert_eq!(config.y_axis, YAxis::Up);
        assert_eq!(config.background, [50, 0, 0]);
        assert_relative_eq!(config.projection().aspect_ratio(), 640.0 / 480.0);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for source in [
            "(width: 0)",
            "(window_scale: 0)",
            "(fov_y_degrees: 180.0)",
            "(z_near: 0.0)",
            "(z_near: 5.0, z_far: 1.0)",
        ] {
            assert!(
                matches!(RenderConfig::from_ron_str(source), Err(ConfigError::Invalid(_))),
                "{source} was accepted"
            );
        }
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        assert!(matches!(
            RenderConfig::from_ron_str("(width: \"wide\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = std::env::temp_dir().join(format!("rastery-config-{}.ron", std::process::id()));
        let config = RenderConfig {
            render_mode: RenderMode::Wireframe,
            spin: [0.0, 0.5, 0.0],
            ..RenderConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = RenderConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let config = RenderConfig::from_ron_str(include_str!("../rastery.ron")).unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = RenderConfig::load_or_default("does/not/exist.ron").unwrap();
        assert_eq!(config, RenderConfig::default());
    }
}
