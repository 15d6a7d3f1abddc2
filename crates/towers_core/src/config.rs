//! Puzzle configuration: disc count, board geometry, animation pacing, light.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use super::speed::{MAX_FPS, MIN_FPS};

/// Physical dimensions of the board, pegs and disc slots.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct BoardGeometry {
    /// Radius of a peg's pedestal. Every other length scales with it.
    #[serde(default = "default_peg_base_radius")]
    peg_base_radius: f64,

    /// Height of each peg above the board.
    #[serde(default = "default_peg_height")]
    peg_height: f64,

    /// Vertical spacing between stacked disc slots.
    #[serde(default = "default_slice_thickness")]
    slice_thickness: f64,
}

fn default_peg_base_radius() -> f64 {
    1.0
}

fn default_peg_height() -> f64 {
    3.0
}

fn default_slice_thickness() -> f64 {
    0.3
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            peg_base_radius: default_peg_base_radius(),
            peg_height: default_peg_height(),
            slice_thickness: default_slice_thickness(),
        }
    }
}

impl BoardGeometry {
    /// Total width of the board along X.
    pub fn board_width(&self) -> f64 {
        10.0 * self.peg_base_radius
    }

    /// Depth of the board along Y.
    pub fn board_depth(&self) -> f64 {
        3.0 * self.peg_base_radius
    }

    /// Distance between neighbouring pegs.
    pub fn peg_spacing(&self) -> f64 {
        self.board_width() / 3.0
    }

    /// Height a disc is raised to before it flies to another peg.
    pub fn lift_height(&self) -> f64 {
        self.peg_height + 0.2 * self.peg_base_radius
    }

    /// Z of the slot at `height` (0 = bottom).
    pub fn slot_z(&self, height: usize) -> f64 {
        (height + 1) as f64 * self.slice_thickness
    }

    /// Outer ring radius of a disc. Larger ids are wider.
    pub fn disc_radius(&self, disc: usize) -> f64 {
        0.2 * (disc + 1) as f64 * self.peg_base_radius
    }

    /// Tube radius shared by every disc.
    pub fn tube_radius(&self) -> f64 {
        0.2 * self.peg_base_radius
    }
}

/// Light source settings.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct LightConfig {
    /// Initial orbit angle in radians.
    #[serde(default = "default_light_angle")]
    angle: f64,

    /// Initial height above the floor.
    #[serde(default = "default_light_height")]
    height: f64,

    /// Radius of the light's orbit around the scene.
    #[serde(default = "default_orbit_radius")]
    orbit_radius: f64,

    /// Angle advanced per tick while auto-motion is on.
    #[serde(default = "default_auto_step")]
    auto_step: f64,

    /// Whether the light starts orbiting on its own.
    #[serde(default)]
    auto_motion: bool,

    /// Directional (at infinity) rather than positional.
    #[serde(default = "default_directional")]
    directional: bool,
}

fn default_light_angle() -> f64 {
    0.67
}

fn default_light_height() -> f64 {
    10.0
}

fn default_orbit_radius() -> f64 {
    12.0
}

fn default_auto_step() -> f64 {
    0.03
}

fn default_directional() -> bool {
    true
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            angle: default_light_angle(),
            height: default_light_height(),
            orbit_radius: default_orbit_radius(),
            auto_step: default_auto_step(),
            auto_motion: false,
            directional: default_directional(),
        }
    }
}

/// Complete configuration for a puzzle session.
///
/// Loaded from TOML; every field falls back to the classic six-disc setup.
///
/// ```toml
/// discs = 4
/// fps = 120
///
/// [geometry]
/// peg_height = 4.0
///
/// [light]
/// auto_motion = true
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct PuzzleConfig {
    /// Number of discs stacked on peg 0 at start.
    #[serde(default = "default_discs")]
    discs: usize,

    /// Board dimensions.
    #[serde(default)]
    geometry: BoardGeometry,

    /// Z step per tick while lifting or descending.
    #[serde(default = "default_lift_step")]
    lift_step: f64,

    /// Spline parameter step per tick while translating.
    #[serde(default = "default_step_u")]
    step_u: f64,

    /// Initial animation rate in ticks per second.
    #[serde(default = "default_fps")]
    fps: u32,

    /// Light source.
    #[serde(default)]
    light: LightConfig,
}

fn default_discs() -> usize {
    6
}

fn default_lift_step() -> f64 {
    0.05
}

fn default_step_u() -> f64 {
    0.025
}

fn default_fps() -> u32 {
    60
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            discs: default_discs(),
            geometry: BoardGeometry::default(),
            lift_step: default_lift_step(),
            step_u: default_step_u(),
            fps: default_fps(),
            light: LightConfig::default(),
        }
    }
}

impl PuzzleConfig {
    /// Default configuration with `discs` discs.
    #[instrument]
    pub fn with_disc_count(discs: usize) -> Self {
        Self::default().with_discs(discs)
    }

    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading puzzle config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(discs = config.discs, fps = config.fps, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a playable, animatable board.
    #[instrument(skip(self), fields(discs = self.discs))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.geometry;
        if self.discs == 0 {
            return Err(ConfigError::new("At least one disc is required".to_string()));
        }
        let light = &self.light;
        let floats = [
            ("geometry.peg_base_radius", geometry.peg_base_radius),
            ("geometry.peg_height", geometry.peg_height),
            ("geometry.slice_thickness", geometry.slice_thickness),
            ("lift_step", self.lift_step),
            ("step_u", self.step_u),
            ("light.angle", light.angle),
            ("light.height", light.height),
            ("light.orbit_radius", light.orbit_radius),
            ("light.auto_step", light.auto_step),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::new(format!("{} must be finite, got {}", name, value)));
        }
        if geometry.peg_base_radius <= 0.0 || geometry.slice_thickness <= 0.0 {
            return Err(ConfigError::new(
                "Peg radius and slice thickness must be positive".to_string(),
            ));
        }
        let stack_top = geometry.slot_z(self.discs - 1);
        if stack_top > geometry.peg_height + 1e-9 {
            return Err(ConfigError::new(format!(
                "{} discs stack to {:.2}, above the peg height {:.2}",
                self.discs, stack_top, geometry.peg_height
            )));
        }
        if self.lift_step <= 0.0 {
            return Err(ConfigError::new("lift_step must be positive".to_string()));
        }
        if self.step_u <= 0.0 || self.step_u > 1.0 {
            return Err(ConfigError::new("step_u must lie in (0, 1]".to_string()));
        }
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::new(format!(
                "fps must lie in [{}, {}]",
                MIN_FPS, MAX_FPS
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_board() {
        let config = PuzzleConfig::default();
        assert_eq!(*config.discs(), 6);
        assert_eq!(*config.fps(), 60);
        assert!((config.geometry().lift_height() - 3.2).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PuzzleConfig::from_toml("discs = 3\n[light]\nauto_motion = true\n").unwrap();
        assert_eq!(*config.discs(), 3);
        assert!((config.step_u() - 0.025).abs() < 1e-12);
        assert!(*config.light().auto_motion());
        assert!(*config.light().directional());
    }

    #[test]
    fn test_zero_discs_rejected() {
        assert!(PuzzleConfig::with_disc_count(0).validate().is_err());
    }

    #[test]
    fn test_stack_taller_than_peg_rejected() {
        assert!(PuzzleConfig::with_disc_count(10).validate().is_ok());
        let err = PuzzleConfig::with_disc_count(11).validate().unwrap_err();
        assert!(err.message.contains("above the peg height"));
    }

    #[test]
    fn test_bad_step_u_rejected() {
        let config = PuzzleConfig::default().with_step_u(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for value in ["nan", "inf", "-inf"] {
            let toml = format!("discs = 3\n[geometry]\npeg_height = {}\n", value);
            let err = PuzzleConfig::from_toml(&toml).unwrap_err();
            assert!(err.message.contains("peg_height"), "{}", err);
        }
        assert!(PuzzleConfig::from_toml("lift_step = nan").is_err());
        assert!(PuzzleConfig::from_toml("step_u = nan").is_err());
        assert!(PuzzleConfig::from_toml("[light]\nauto_step = inf").is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(PuzzleConfig::from_toml("discs = \"many\"").is_err());
    }
}
