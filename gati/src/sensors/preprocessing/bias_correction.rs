//! Accelerometer bias removal.
//!
//! The bias vector is fixed in the body frame. As the sensor yaws, its x/y
//! part is re-projected by the current heading before being subtracted:
//!
//! ```text
//! ax' = ax - (by·sin θ + bx·cos θ)
//! ay' = ay - (by·cos θ - bx·sin θ)
//! az' = az - bz
//! ```
//!
//! θ is the integrated yaw in degrees. Without a yaw trace θ = 0 and the
//! bias is subtracted component-wise.

use crate::core::math::rotate_by_heading;
use crate::core::types::{Axis, SampleSeries, Trace3};
use crate::error::{GatiError, Result};
use crate::sensors::calibration::BiasEstimate;

use super::{ChannelFilter, MovingAverage};

/// Removes the static bias and smooths the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccelerationCorrector {
    filter: MovingAverage,
}

impl AccelerationCorrector {
    pub fn new(filter: MovingAverage) -> Self {
        Self { filter }
    }

    /// Corrector that only removes the bias.
    pub fn unfiltered() -> Self {
        Self::new(MovingAverage::disabled())
    }

    pub fn filter(&self) -> &MovingAverage {
        &self.filter
    }

    /// Subtract `bias` from every accelerometer sample.
    ///
    /// `yaw` must have one heading per sample when given.
    pub fn remove_bias(
        &self,
        series: &SampleSeries,
        bias: &BiasEstimate,
        yaw: Option<&[f64]>,
    ) -> Result<Trace3> {
        if let Some(yaw) = yaw {
            if yaw.len() != series.len() {
                return Err(GatiError::LengthMismatch {
                    expected: series.len(),
                    actual: yaw.len(),
                });
            }
        }

        let [bx, by, bz] = bias.accel;
        let n = series.len();
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);

        for (i, sample) in series.iter().enumerate() {
            let heading = yaw.map_or(0.0, |yaw| yaw[i]);
            let (rx, ry) = rotate_by_heading(bx, by, heading);
            let [ax, ay, az] = sample.accel;
            x.push(ax - rx);
            y.push(ay - ry);
            z.push(az - bz);
        }

        Trace3::from_channels(x, y, z)
    }

    /// Remove the bias, then smooth each axis independently.
    pub fn correct(
        &self,
        series: &SampleSeries,
        bias: &BiasEstimate,
        yaw: Option<&[f64]>,
    ) -> Result<Trace3> {
        let raw = self.remove_bias(series, bias, yaw)?;

        if self.filter.is_enabled() && self.filter.passes_through(raw.len()) {
            log::warn!(
                "{} window {} covers all {} samples; output is unfiltered",
                self.filter.name(),
                self.filter.window(),
                raw.len()
            );
        }

        let corrected = Trace3::try_from_fn(|axis: Axis| Ok(self.filter.filter(raw.channel(axis))))?;
        log::debug!(
            "Corrected {} samples (bias [{:.5}, {:.5}, {:.5}], {} yaw, window {})",
            corrected.len(),
            bias.accel[0],
            bias.accel[1],
            bias.accel[2],
            if yaw.is_some() { "rotating" } else { "static" },
            self.filter.window()
        );
        Ok(corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ImuSample;
    use approx::assert_relative_eq;

    fn series(accel: &[[f64; 3]]) -> SampleSeries {
        accel
            .iter()
            .enumerate()
            .map(|(i, &a)| ImuSample::new(i as f64 * 0.1, a, [0.0; 3]))
            .collect()
    }

    #[test]
    fn test_static_subtracts_componentwise() {
        let s = series(&[[1.0, 2.0, 10.0], [1.5, 2.5, 9.5]]);
        let bias = BiasEstimate::from_values([1.0, 2.0, 9.8]);

        let out = AccelerationCorrector::unfiltered()
            .correct(&s, &bias, None)
            .unwrap();

        assert_relative_eq!(out.x[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out.y[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(out.z[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(out.z[1], -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_yaw_matches_static() {
        let s = series(&[[0.3, -0.1, 9.7], [0.2, 0.4, 9.9], [0.0, 0.0, 9.8]]);
        let bias = BiasEstimate::from_values([0.1, 0.2, 9.8]);
        let corrector = AccelerationCorrector::unfiltered();

        let rotating = corrector.correct(&s, &bias, Some(&[0.0; 3])).unwrap();
        let fixed = corrector.correct(&s, &bias, None).unwrap();
        assert_eq!(rotating, fixed);
    }

    #[test]
    fn test_quarter_turn_reprojects_bias() {
        // θ = 90°: subtract (by, -bx) from (ax, ay)
        let s = series(&[[0.0, 0.0, 0.0]]);
        let bias = BiasEstimate::from_values([1.0, 2.0, 3.0]);

        let out = AccelerationCorrector::unfiltered()
            .correct(&s, &bias, Some(&[90.0]))
            .unwrap();

        assert_relative_eq!(out.x[0], -2.0, epsilon = 1e-12);
        assert_relative_eq!(out.y[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.z[0], -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_filter_applies_after_bias() {
        let s = series(&[[2.0, 0.0, 0.0], [4.0, 0.0, 0.0], [6.0, 0.0, 0.0]]);
        let bias = BiasEstimate::from_values([1.0, 0.0, 0.0]);

        let out = AccelerationCorrector::new(MovingAverage::new(2))
            .correct(&s, &bias, None)
            .unwrap();

        // corrected x = [1, 3, 5]; i = 2 averages 5 and 3
        assert_eq!(out.x[..2], [1.0, 3.0]);
        assert_relative_eq!(out.x[2], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_yaw_length_mismatch() {
        let s = series(&[[0.0; 3], [0.0; 3]]);
        let result =
            AccelerationCorrector::unfiltered().correct(&s, &BiasEstimate::zero(), Some(&[0.0]));
        assert!(matches!(
            result,
            Err(GatiError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));

        let corrector = AccelerationCorrector::unfiltered();
        assert!(
            corrector
                .remove_bias(&s, &BiasEstimate::zero(), Some(&[0.0, 0.0]))
                .is_ok()
        );
        assert!(
            corrector
                .remove_bias(&s, &BiasEstimate::zero(), Some(&[0.0; 3]))
                .is_err()
        );
    }

    #[test]
    fn test_empty_series() {
        let out = AccelerationCorrector::default()
            .correct(&SampleSeries::default(), &BiasEstimate::zero(), Some(&[]))
            .unwrap();
        assert!(out.is_empty());
    }
}
