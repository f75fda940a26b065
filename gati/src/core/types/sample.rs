//! IMU sample and sample series types.

use serde::{Deserialize, Serialize};

use crate::error::{GatiError, Result};

/// Sensor axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in channel order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Channel index of this axis (x = 0, y = 1, z = 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// One IMU observation.
///
/// Units are whatever the sensor reports; the acceleration corrector
/// assumes angular rate in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    /// Timestamp in seconds
    pub stamp: f64,
    /// Linear acceleration [ax, ay, az]
    pub accel: [f64; 3],
    /// Angular rate [wx, wy, wz]
    pub gyro: [f64; 3],
    /// Producer sequence number, when the log carries one
    pub seq: Option<u64>,
}

impl ImuSample {
    /// Create a sample without a sequence number.
    #[inline]
    pub fn new(stamp: f64, accel: [f64; 3], gyro: [f64; 3]) -> Self {
        Self {
            stamp,
            accel,
            gyro,
            seq: None,
        }
    }

    /// Attach a sequence number.
    #[inline]
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    /// Magnitude of the acceleration vector.
    #[inline]
    pub fn accel_norm(&self) -> f64 {
        let [ax, ay, az] = self.accel;
        (ax * ax + ay * ay + az * az).sqrt()
    }
}

/// Ordered, immutable sequence of samples from one log.
///
/// Samples stay in arrival order; timestamps are not checked for
/// monotonicity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    samples: Vec<ImuSample>,
}

impl SampleSeries {
    /// Wrap samples in arrival order.
    pub fn new(samples: Vec<ImuSample>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the series holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ImuSample> {
        self.samples.get(index)
    }

    /// Sample at `index`, reporting out-of-range access as an error.
    pub fn sample(&self, index: usize) -> Result<&ImuSample> {
        self.samples.get(index).ok_or(GatiError::IndexOutOfBounds {
            index,
            len: self.samples.len(),
        })
    }

    /// Borrow all samples.
    #[inline]
    pub fn as_slice(&self) -> &[ImuSample] {
        &self.samples
    }

    /// Iterate over samples in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, ImuSample> {
        self.samples.iter()
    }

    /// Timestamp channel.
    pub fn stamps(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.stamp).collect()
    }

    /// One acceleration channel.
    pub fn accel_channel(&self, axis: Axis) -> Vec<f64> {
        self.samples.iter().map(|s| s.accel[axis.index()]).collect()
    }

    /// One angular rate channel.
    pub fn gyro_channel(&self, axis: Axis) -> Vec<f64> {
        self.samples.iter().map(|s| s.gyro[axis.index()]).collect()
    }

    /// Elapsed time between the first and last sample in seconds.
    ///
    /// Zero for series shorter than two samples.
    pub fn duration_s(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.stamp - first.stamp,
            _ => 0.0,
        }
    }

    /// Copy of this series with the acceleration replaced per sample.
    ///
    /// `accel` must hold one value per sample on every axis.
    pub fn with_accel(&self, accel: [&[f64]; 3]) -> Result<Self> {
        for channel in accel {
            if channel.len() != self.samples.len() {
                return Err(GatiError::LengthMismatch {
                    expected: self.samples.len(),
                    actual: channel.len(),
                });
            }
        }

        let samples = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| ImuSample {
                accel: [accel[0][i], accel[1][i], accel[2][i]],
                ..*s
            })
            .collect();

        Ok(Self { samples })
    }
}

impl FromIterator<ImuSample> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = ImuSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a ImuSample;
    type IntoIter = std::slice::Iter<'a, ImuSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
