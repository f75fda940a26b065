//! End-to-end processing of one IMU log.
//!
//! ```text
//! SampleSeries ─► bias ─► orientation ─► corrected accel ─► position
//!                  │                         ▲
//!                  └────── yaw (deg) ────────┘
//! ```
//!
//! [`DeadReckoning`] runs the full chain. [`BiasFilter`] produces a
//! bias-corrected, smoothed copy of the series for re-export.

use crate::config::AppConfig;
use crate::core::types::{OrientationTrace, PositionTrace, SampleSeries, Trace3};
use crate::error::Result;
use crate::io::export::TraceView;
use crate::sensors::calibration::{BiasEstimate, estimate_bias};
use crate::sensors::odometry::{KinematicModel, PositionIntegrator, integrate_orientation};
use crate::sensors::preprocessing::{AccelerationCorrector, MovingAverage};

/// Dead-reckoning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadReckoningConfig {
    /// Bias window (seconds)
    pub bias_window_s: f64,
    /// Moving-average window (samples, 0 disables)
    pub filter_window: usize,
    /// Position update rule
    pub kinematics: KinematicModel,
}

impl Default for DeadReckoningConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for DeadReckoningConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            bias_window_s: config.bias.window_s,
            filter_window: config.filter.window,
            kinematics: config.integration.kinematics,
        }
    }
}

/// Everything derived from one series.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadReckoningResult {
    pub stamps: Vec<f64>,
    pub bias: BiasEstimate,
    pub orientation: OrientationTrace,
    pub corrected_accel: Trace3,
    pub position: PositionTrace,
}

impl DeadReckoningResult {
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Borrow the traces for export.
    pub fn view(&self) -> TraceView<'_> {
        TraceView {
            stamps: &self.stamps,
            orientation: &self.orientation,
            accel: &self.corrected_accel,
            position: &self.position,
        }
    }
}

/// Bias → orientation → correction → position.
///
/// # Example
///
/// ```ignore
/// use gati::pipeline::{DeadReckoning, DeadReckoningConfig};
///
/// let result = DeadReckoning::new(DeadReckoningConfig::default()).run(&series)?;
/// println!("final position: {:?}", result.position.final_position());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadReckoning {
    config: DeadReckoningConfig,
}

impl DeadReckoning {
    pub fn new(config: DeadReckoningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeadReckoningConfig {
        &self.config
    }

    /// Run every stage over `series`.
    ///
    /// Fails with `InsufficientData` when no sample falls in the bias
    /// window, which includes an empty series.
    pub fn run(&self, series: &SampleSeries) -> Result<DeadReckoningResult> {
        let bias = estimate_bias(series, self.config.bias_window_s)?;
        let orientation = integrate_orientation(series)?;

        let corrector = AccelerationCorrector::new(MovingAverage::new(self.config.filter_window));
        let corrected_accel = corrector.correct(series, &bias, Some(orientation.yaw()))?;

        let stamps = series.stamps();
        let position =
            PositionIntegrator::new(self.config.kinematics).integrate(&corrected_accel, &stamps)?;

        if let Some([x, y, z]) = position.final_position() {
            log::info!(
                "Dead reckoning over {} samples ({:.3} s, {}): final position [{:.4}, {:.4}, {:.4}]",
                series.len(),
                series.duration_s(),
                self.config.kinematics,
                x,
                y,
                z
            );
        }

        Ok(DeadReckoningResult {
            stamps,
            bias,
            orientation,
            corrected_accel,
            position,
        })
    }
}

/// Static bias removal and smoothing, keeping the series shape.
///
/// Gyro channels, stamps and sequence numbers pass through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct BiasFilter {
    bias_window_s: f64,
    corrector: AccelerationCorrector,
}

impl BiasFilter {
    pub fn new(bias_window_s: f64, window: usize) -> Self {
        Self {
            bias_window_s,
            corrector: AccelerationCorrector::new(MovingAverage::new(window)),
        }
    }

    /// Filter using the `[bias]` and `[export]` sections.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.bias.window_s, config.export.window)
    }

    /// Returns the bias that was removed and the filtered series.
    pub fn run(&self, series: &SampleSeries) -> Result<(BiasEstimate, SampleSeries)> {
        let bias = estimate_bias(series, self.bias_window_s)?;
        let accel = self.corrector.correct(series, &bias, None)?;
        let filtered = series.with_accel(accel.as_channels())?;
        log::info!(
            "Filtered {} samples (window {})",
            filtered.len(),
            self.corrector.filter().window()
        );
        Ok((bias, filtered))
    }
}
