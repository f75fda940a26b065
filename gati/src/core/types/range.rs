//! Time-of-flight range readings.

use serde::{Deserialize, Serialize};

/// One time-of-flight frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TofReading {
    /// Number of objects the sensor reported
    pub objects: u32,
    /// Range per object in meters, nearest first
    pub ranges: Vec<f64>,
}

impl TofReading {
    pub fn new(objects: u32, ranges: Vec<f64>) -> Self {
        Self { objects, ranges }
    }

    /// Range to the nearest object, if any was detected.
    pub fn nearest(&self) -> Option<f64> {
        if self.objects == 0 {
            return None;
        }
        self.ranges.first().copied()
    }
}

/// A range tagged with the heading it was measured at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeReading {
    /// Sensor heading in degrees
    pub heading_deg: f64,
    /// Measured range in meters
    pub range_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest() {
        assert_eq!(TofReading::new(2, vec![0.4, 1.2]).nearest(), Some(0.4));
        assert_eq!(TofReading::new(0, vec![0.4]).nearest(), None);
        assert_eq!(TofReading::new(1, vec![]).nearest(), None);
    }
}
