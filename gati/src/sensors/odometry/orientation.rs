//! Gyroscope integration into cumulative orientation angles.
//!
//! Each axis is integrated independently with the forward rectangular rule:
//!
//! ```text
//! angle[0] = 0
//! angle[i] = angle[i-1] + rate[i] × (t[i] - t[i-1])
//! ```
//!
//! No smoothing is applied to angular rate. The resulting angles carry the
//! gyro's unit times seconds; for a deg/s sensor that is degrees, which is
//! what the acceleration corrector expects for yaw.

use crate::core::math::integrate_rectangular;
use crate::core::types::{OrientationTrace, SampleSeries, Trace3};
use crate::error::Result;

/// Integrate one angular rate channel over its timestamps.
///
/// `rates` and `stamps` must have the same length.
pub fn integrate_axis(rates: &[f64], stamps: &[f64]) -> Result<Vec<f64>> {
    integrate_rectangular(rates, stamps)
}

/// Integrate all three gyro axes of `series`.
///
/// The trace has one entry per sample and starts at zero on every axis.
/// Empty series give an empty trace.
pub fn integrate_orientation(series: &SampleSeries) -> Result<OrientationTrace> {
    let stamps = series.stamps();
    let angles = Trace3::try_from_fn(|axis| integrate_axis(&series.gyro_channel(axis), &stamps))?;

    if let Some([x, y, z]) = angles.last() {
        log::debug!(
            "Orientation over {} samples: final angles [{:.3}, {:.3}, {:.3}]",
            angles.len(),
            x,
            y,
            z
        );
    }

    Ok(OrientationTrace::new(angles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Axis, ImuSample};
    use approx::assert_relative_eq;

    fn constant_rate_series(rate: [f64; 3], dt: f64, n: usize) -> SampleSeries {
        (0..n)
            .map(|i| ImuSample::new(i as f64 * dt, [0.0; 3], rate))
            .collect()
    }

    #[test]
    fn test_first_angle_is_zero() {
        let series = constant_rate_series([5.0, -3.0, 12.0], 0.02, 10);
        let trace = integrate_orientation(&series).unwrap();
        for axis in Axis::ALL {
            assert_eq!(trace.angle(axis)[0], 0.0);
        }
    }

    #[test]
    fn test_constant_rate_closed_form() {
        let rate = [1.0, -2.0, 90.0];
        let dt = 0.01;
        let series = constant_rate_series(rate, dt, 200);
        let trace = integrate_orientation(&series).unwrap();

        assert_eq!(trace.len(), 200);
        for axis in Axis::ALL {
            for (i, angle) in trace.angle(axis).iter().enumerate() {
                assert_relative_eq!(
                    *angle,
                    i as f64 * rate[axis.index()] * dt,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // 90 deg/s for one second at 100 Hz
        let series = constant_rate_series([0.0, 0.0, 90.0], 0.01, 101);
        let trace = integrate_orientation(&series).unwrap();
        assert_relative_eq!(*trace.yaw().last().unwrap(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_sample() {
        let series = constant_rate_series([7.0, 7.0, 7.0], 0.01, 1);
        let trace = integrate_orientation(&series).unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.angles.at(0), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_empty_series() {
        let trace = integrate_orientation(&SampleSeries::default()).unwrap();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_repeated_stamp_adds_nothing() {
        let series = SampleSeries::new(vec![
            ImuSample::new(0.0, [0.0; 3], [0.0, 0.0, 10.0]),
            ImuSample::new(1.0, [0.0; 3], [0.0, 0.0, 10.0]),
            ImuSample::new(1.0, [0.0; 3], [0.0, 0.0, 500.0]),
        ]);
        let trace = integrate_orientation(&series).unwrap();
        assert_eq!(trace.yaw(), &[0.0, 10.0, 10.0]);
    }
}
