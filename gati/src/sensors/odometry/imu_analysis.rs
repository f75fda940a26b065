//! IMU analysis utilities for static noise assessment.
//!
//! Summarizes a log recorded with the sensor at rest: per-channel mean and
//! spread, mean gravity magnitude, and the sample rate. Comparing these
//! across sensors shows which one needs an offset and which one drifts.
//!
//! # Example
//!
//! ```ignore
//! use gati::sensors::odometry::ImuAnalyzer;
//!
//! let result = ImuAnalyzer::analyze(&series)?;
//! println!("Accel norm: {:.4}", result.accel_norm_mean);
//! println!("Gyro Z drift: {:.4} deg/s", result.gyro_drift_z);
//! ```

use serde::Serialize;

use crate::core::math::mean;
use crate::core::types::{Axis, SampleSeries};
use crate::error::{GatiError, Result};
use crate::utils::ChannelStats;

/// Results from IMU analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ImuAnalysisResult {
    /// Accelerometer statistics per axis [x, y, z].
    pub accel: [ChannelStats; 3],
    /// Gyroscope statistics per axis [x, y, z].
    pub gyro: [ChannelStats; 3],
    /// Mean magnitude of the acceleration vector.
    pub accel_norm_mean: f64,
    /// Mean gyro Z reading; at rest this is the heading drift rate.
    pub gyro_drift_z: f64,
    /// Recording duration in seconds.
    pub duration_s: f64,
    /// Mean sample rate in Hz (0 when the duration is not positive).
    pub sample_rate_hz: f64,
    /// Total number of samples analyzed.
    pub sample_count: usize,
}

impl ImuAnalysisResult {
    /// Print a human readable report.
    pub fn print(&self) {
        println!("Samples: {}", self.sample_count);
        println!(
            "Duration: {:.3} s ({:.1} Hz)",
            self.duration_s, self.sample_rate_hz
        );
        println!("Accel norm mean: {:.5}", self.accel_norm_mean);
        for axis in Axis::ALL {
            self.accel[axis.index()].print(&format!("Acc {}", axis));
        }
        for axis in Axis::ALL {
            self.gyro[axis.index()].print(&format!("Gyr {}", axis));
        }
        println!("Gyro Z drift: {:.5} per s", self.gyro_drift_z);
    }
}

/// Analyzes IMU data for noise and offset diagnostics.
pub struct ImuAnalyzer;

impl ImuAnalyzer {
    /// Analyze a series; fails on an empty series.
    pub fn analyze(series: &SampleSeries) -> Result<ImuAnalysisResult> {
        if series.is_empty() {
            return Err(GatiError::InsufficientData(
                "cannot analyze an empty series".to_string(),
            ));
        }

        let [ax, ay, az] = Axis::ALL.map(|axis| channel_stats(&series.accel_channel(axis)));
        let accel = [ax?, ay?, az?];
        let [wx, wy, wz] = Axis::ALL.map(|axis| channel_stats(&series.gyro_channel(axis)));
        let gyro = [wx?, wy?, wz?];

        let norms: Vec<f64> = series.iter().map(|s| s.accel_norm()).collect();
        let accel_norm_mean = mean(&norms).ok_or_else(|| {
            GatiError::InsufficientData("cannot average an empty series".to_string())
        })?;

        let duration_s = series.duration_s();
        let sample_rate_hz = if duration_s > 0.0 {
            (series.len() - 1) as f64 / duration_s
        } else {
            0.0
        };

        Ok(ImuAnalysisResult {
            gyro_drift_z: gyro[Axis::Z.index()].mean,
            accel,
            gyro,
            accel_norm_mean,
            duration_s,
            sample_rate_hz,
            sample_count: series.len(),
        })
    }
}

fn channel_stats(values: &[f64]) -> Result<ChannelStats> {
    ChannelStats::compute(values)
        .ok_or_else(|| GatiError::InsufficientData("cannot summarize an empty channel".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ImuSample;
    use approx::assert_relative_eq;

    #[test]
    fn test_analyze_static_log() {
        // 100 Hz for 1 s, gravity on z with alternating noise on x
        let series: SampleSeries = (0..101)
            .map(|i| {
                let noise = if i % 2 == 0 { 0.01 } else { -0.01 };
                ImuSample::new(i as f64 * 0.01, [noise, 0.0, 9.81], [0.0, 0.0, 0.2])
            })
            .collect();

        let result = ImuAnalyzer::analyze(&series).unwrap();

        assert_eq!(result.sample_count, 101);
        assert_relative_eq!(result.duration_s, 1.0, epsilon = 1e-9);
        assert_relative_eq!(result.sample_rate_hz, 100.0, epsilon = 1e-6);
        assert_relative_eq!(result.accel[2].mean, 9.81, epsilon = 1e-9);
        assert_relative_eq!(result.accel[2].std, 0.0, epsilon = 1e-9);
        assert!(result.accel[0].std > 0.009 && result.accel[0].std < 0.011);
        assert_relative_eq!(result.gyro_drift_z, 0.2, epsilon = 1e-12);
        assert!(result.accel_norm_mean > 9.81 && result.accel_norm_mean < 9.8101);
    }

    #[test]
    fn test_analyze_single_sample() {
        let series = SampleSeries::new(vec![ImuSample::new(3.0, [0.0, 0.0, 1.0], [0.0; 3])]);
        let result = ImuAnalyzer::analyze(&series).unwrap();
        assert_eq!(result.sample_count, 1);
        assert_relative_eq!(result.sample_rate_hz, 0.0);
        assert_relative_eq!(result.accel[2].std, 0.0);
    }

    #[test]
    fn test_channel_stats_empty_is_insufficient() {
        assert!(matches!(
            channel_stats(&[]),
            Err(GatiError::InsufficientData(_))
        ));
        let stats = channel_stats(&[2.0, 4.0]).unwrap();
        assert_relative_eq!(stats.mean, 3.0);
    }

    #[test]
    fn test_analyze_empty_fails() {
        assert!(matches!(
            ImuAnalyzer::analyze(&SampleSeries::default()),
            Err(GatiError::InsufficientData(_))
        ));
    }
}
