//! Orbiting light source.
//!
//! The light circles the scene at a fixed radius. It can drift on its own,
//! be dragged by the user, and switch between directional and positional.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::config::LightConfig;

/// Horizontal drag distance that turns the light by one radian.
const DRAG_ANGLE_SCALE: f64 = 80.0;
/// Vertical drag distance that raises the light by one unit.
const DRAG_HEIGHT_SCALE: f64 = 40.0;

/// Light position and behavior flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    angle: f64,
    height: f64,
    orbit_radius: f64,
    auto_step: f64,
    auto_motion: bool,
    directional: bool,
    manual_drag: bool,
}

impl LightRig {
    /// Builds the rig from its configuration.
    pub fn new(config: &LightConfig) -> Self {
        Self {
            angle: *config.angle(),
            height: *config.height(),
            orbit_radius: *config.orbit_radius(),
            auto_step: *config.auto_step(),
            auto_motion: *config.auto_motion(),
            directional: *config.directional(),
            manual_drag: false,
        }
    }

    /// Orbit angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Height above the floor.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether the light drifts on its own.
    pub fn auto_motion(&self) -> bool {
        self.auto_motion
    }

    /// Whether the light is at infinity.
    pub fn is_directional(&self) -> bool {
        self.directional
    }

    /// Whether the user is currently dragging the light.
    pub fn is_dragging(&self) -> bool {
        self.manual_drag
    }

    /// Whether ticking the rig moves the light.
    pub fn is_drifting(&self) -> bool {
        self.auto_motion && !self.manual_drag
    }

    /// Advances the orbit by one step. Returns whether the light moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_drifting() {
            return false;
        }
        self.angle += self.auto_step;
        true
    }

    /// Marks the start or end of a manual drag. Drift pauses while dragging.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.manual_drag = dragging;
    }

    /// Applies a pointer drag of `(dx, dy)`. Dragging down lowers the light.
    #[instrument(skip(self))]
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.angle += dx / DRAG_ANGLE_SCALE;
        self.height -= dy / DRAG_HEIGHT_SCALE;
        debug!(angle = self.angle, height = self.height, "Light dragged");
    }

    /// Flips auto-motion. Returns the new state.
    pub fn toggle_auto_motion(&mut self) -> bool {
        self.auto_motion = !self.auto_motion;
        self.auto_motion
    }

    /// Flips between directional and positional. Returns whether the light
    /// is now directional.
    pub fn toggle_directional(&mut self) -> bool {
        self.directional = !self.directional;
        self.directional
    }

    /// Homogeneous light position `[x, y, z, w]` with Y up.
    ///
    /// `w` is `0` for a directional light and `1` for a positional one.
    pub fn position(&self) -> [f64; 4] {
        let w = if self.directional { 0.0 } else { 1.0 };
        [
            self.orbit_radius * self.angle.cos(),
            self.height,
            self.orbit_radius * self.angle.sin(),
            w,
        ]
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new(&LightConfig::default())
    }
}
