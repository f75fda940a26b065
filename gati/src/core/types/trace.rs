//! Derived per-axis traces.

use super::sample::Axis;
use crate::error::{GatiError, Result};

/// Three index-aligned channels, one per axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace3 {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Trace3 {
    /// Build from three channels of equal length.
    pub fn from_channels(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        for other in [&y, &z] {
            if other.len() != x.len() {
                return Err(GatiError::LengthMismatch {
                    expected: x.len(),
                    actual: other.len(),
                });
            }
        }
        Ok(Self { x, y, z })
    }

    /// Build by evaluating `f` once per axis.
    pub fn try_from_fn<F>(mut f: F) -> Result<Self>
    where
        F: FnMut(Axis) -> Result<Vec<f64>>,
    {
        let x = f(Axis::X)?;
        let y = f(Axis::Y)?;
        let z = f(Axis::Z)?;
        Self::from_channels(x, y, z)
    }

    /// Borrow one channel.
    #[inline]
    pub fn channel(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Number of samples per channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Values of all three channels at `index`.
    pub fn at(&self, index: usize) -> Option<[f64; 3]> {
        Some([
            *self.x.get(index)?,
            *self.y.get(index)?,
            *self.z.get(index)?,
        ])
    }

    /// Last value of every channel.
    pub fn last(&self) -> Option<[f64; 3]> {
        self.len().checked_sub(1).and_then(|i| self.at(i))
    }

    /// Borrow the channels as an array in axis order.
    pub fn as_channels(&self) -> [&[f64]; 3] {
        [&self.x, &self.y, &self.z]
    }
}

/// Cumulative orientation angles per axis.
///
/// Same length and index alignment as the series it was integrated from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrientationTrace {
    pub angles: Trace3,
}

impl OrientationTrace {
    pub fn new(angles: Trace3) -> Self {
        Self { angles }
    }

    /// Angle channel of one axis.
    #[inline]
    pub fn angle(&self, axis: Axis) -> &[f64] {
        self.angles.channel(axis)
    }

    /// Heading channel (rotation about z).
    #[inline]
    pub fn yaw(&self) -> &[f64] {
        &self.angles.z
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Velocity and position per axis from double integration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTrace {
    pub velocity: Trace3,
    pub position: Trace3,
}

impl PositionTrace {
    #[inline]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Final position, if any.
    pub fn final_position(&self) -> Option<[f64; 3]> {
        self.position.last()
    }
}
