//! Minimal 3D point/vector type used for slot positions and disc poses.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or vector) in world space.
///
/// The board lies in the XY plane and discs stack along +Z.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_new::new,
)]
#[display("({:.3}, {:.3}, {:.3})", x, y, z)]
pub struct Point3 {
    /// X coordinate (along the row of pegs).
    pub x: f64,
    /// Y coordinate (across the board).
    pub y: f64,
    /// Z coordinate (height above the board).
    pub z: f64,
}

impl Point3 {
    /// The origin / zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along +Z: the orientation of a disc lying flat.
    pub const UP: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scales to unit length in place. A zero vector is left untouched.
    pub fn normalize(&mut self) {
        let length = self.length();
        if length == 0.0 {
            return;
        }
        self.x /= length;
        self.y /= length;
        self.z /= length;
    }

    /// Returns a unit-length copy (zero stays zero).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;

    fn mul(self, k: f64) -> Point3 {
        Point3::new(self.x * k, self.y * k, self.z * k)
    }
}
