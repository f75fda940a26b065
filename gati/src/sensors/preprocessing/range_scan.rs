//! Heading-tagged range scan.
//!
//! A single-beam time-of-flight sensor swept by rotating the robot builds a
//! 2D scan: each range is tagged with the last heading seen and projected
//! into the plane.
//!
//! ```text
//! corrected_range = range + mounting_offset
//! x = corrected_range * cos(heading)
//! y = corrected_range * sin(heading)
//! ```

use crate::core::types::{Point2D, RangeReading, TofReading};

/// Default distance from the rotation center to the sensor face (meters).
pub const DEFAULT_RANGE_OFFSET_M: f64 = 0.05;

/// Pairs time-of-flight frames with the most recent heading.
///
/// Feed observations in log order. Frames that arrive before any heading,
/// or that report no object, are dropped.
#[derive(Debug, Clone, Default)]
pub struct RangeScanBuilder {
    heading_deg: Option<f64>,
    readings: Vec<RangeReading>,
    dropped: usize,
}

impl RangeScanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new heading in degrees.
    pub fn observe_heading(&mut self, heading_deg: f64) {
        self.heading_deg = Some(heading_deg);
    }

    /// Record a time-of-flight frame; returns the reading it produced.
    pub fn observe_tof(&mut self, tof: &TofReading) -> Option<RangeReading> {
        let reading = match (self.heading_deg, tof.nearest()) {
            (Some(heading_deg), Some(range_m)) => RangeReading {
                heading_deg,
                range_m,
            },
            _ => {
                self.dropped += 1;
                return None;
            }
        };
        self.readings.push(reading);
        Some(reading)
    }

    /// Last heading seen, if any.
    pub fn heading(&self) -> Option<f64> {
        self.heading_deg
    }

    pub fn readings(&self) -> &[RangeReading] {
        &self.readings
    }

    /// Frames that produced no reading.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(self) -> Vec<RangeReading> {
        self.readings
    }
}

/// Polar to Cartesian projection of range readings.
pub struct RangeScanConverter;

impl RangeScanConverter {
    /// Project one reading, adding `range_offset_m` to the measured range.
    #[inline]
    pub fn to_point(reading: &RangeReading, range_offset_m: f64) -> Point2D {
        Point2D::from_polar_deg(reading.heading_deg, reading.range_m + range_offset_m)
    }

    /// Project every reading.
    pub fn to_points_with_offset(readings: &[RangeReading], range_offset_m: f64) -> Vec<Point2D> {
        readings
            .iter()
            .map(|r| Self::to_point(r, range_offset_m))
            .collect()
    }
}
