//! Planar point type for projected range readings.

use serde::{Deserialize, Serialize};

/// A 2D point in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `range` along a heading given in degrees.
    #[inline]
    pub fn from_polar_deg(heading_deg: f64, range: f64) -> Self {
        let (sin, cos) = heading_deg.to_radians().sin_cos();
        Self {
            x: cos * range,
            y: sin * range,
        }
    }

    /// Distance from the origin.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}
