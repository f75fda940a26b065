//! Accelerometer bias estimation.
//!
//! The bias is the mean accelerometer reading over a stationary window at
//! the start of a log.
//!
//! # Usage
//!
//! ```ignore
//! use gati::sensors::calibration::AccelBiasEstimator;
//!
//! let mut estimator = AccelBiasEstimator::new(5.0); // first 5 seconds
//!
//! for sample in &series {
//!     if !estimator.add_sample(sample) {
//!         break; // window closed
//!     }
//! }
//!
//! let bias = estimator.finalize()?;
//! println!("bias: {:?}", bias.accel);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::{ImuSample, SampleSeries};
use crate::error::{GatiError, Result};

/// Default stationary window in seconds.
pub const DEFAULT_BIAS_WINDOW_S: f64 = 5.0;

/// Static accelerometer offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasEstimate {
    /// Mean acceleration [bias_x, bias_y, bias_z]
    pub accel: [f64; 3],
    /// Number of samples averaged
    pub sample_count: usize,
    /// Window the estimate was computed over (seconds)
    pub window_s: f64,
}

impl BiasEstimate {
    /// Bias with explicit values, for callers that calibrated elsewhere.
    pub fn from_values(accel: [f64; 3]) -> Self {
        Self {
            accel,
            sample_count: 0,
            window_s: 0.0,
        }
    }

    /// A bias that leaves samples untouched.
    pub fn zero() -> Self {
        Self::from_values([0.0; 3])
    }
}

/// Accumulates accelerometer samples over the first `window_s` seconds.
///
/// The window starts at the first sample's timestamp. The first sample with
/// `t - t0 >= window_s` closes it; that sample and everything after it are
/// ignored.
#[derive(Debug, Clone)]
pub struct AccelBiasEstimator {
    /// Window length in seconds
    window_s: f64,
    /// Timestamp of the first sample seen
    start_stamp: Option<f64>,
    /// Running sum per axis
    sum: [f64; 3],
    /// Samples accumulated
    count: usize,
    /// Set once a sample fell outside the window
    closed: bool,
}

impl AccelBiasEstimator {
    /// Create an estimator for a window of `window_s` seconds.
    ///
    /// A window that is not positive admits no samples, so `finalize`
    /// reports insufficient data.
    pub fn new(window_s: f64) -> Self {
        Self {
            window_s,
            start_stamp: None,
            sum: [0.0; 3],
            count: 0,
            closed: false,
        }
    }

    /// Feed the next sample in arrival order.
    ///
    /// Returns `false` once the window has closed; further samples are
    /// ignored.
    pub fn add_sample(&mut self, sample: &ImuSample) -> bool {
        if self.closed {
            return false;
        }

        let t0 = *self.start_stamp.get_or_insert(sample.stamp);

        // NaN windows and stamps fail this comparison and close the window.
        let inside = sample.stamp - t0 < self.window_s;
        if !inside {
            self.closed = true;
            return false;
        }

        for (acc, value) in self.sum.iter_mut().zip(sample.accel) {
            *acc += value;
        }
        self.count += 1;
        true
    }

    /// Number of samples accumulated so far.
    pub fn sample_count(&self) -> usize {
        self.count
    }

    /// True once a sample beyond the window has been seen.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mean of the accumulated samples.
    pub fn finalize(&self) -> Result<BiasEstimate> {
        if self.count == 0 {
            return Err(GatiError::InsufficientData(format!(
                "no samples within the {} s bias window",
                self.window_s
            )));
        }

        let n = self.count as f64;
        Ok(BiasEstimate {
            accel: self.sum.map(|s| s / n),
            sample_count: self.count,
            window_s: self.window_s,
        })
    }
}

/// Estimate the accelerometer bias from the start of `series`.
///
/// Scans from the first sample until `t[i] - t[0] >= window_s` or the end of
/// the series and averages the scanned prefix.
pub fn estimate_bias(series: &SampleSeries, window_s: f64) -> Result<BiasEstimate> {
    let mut estimator = AccelBiasEstimator::new(window_s);
    for sample in series {
        if !estimator.add_sample(sample) {
            break;
        }
    }

    let bias = estimator.finalize()?;
    log::debug!(
        "Accel bias [{:.5}, {:.5}, {:.5}] from {} samples ({} s window)",
        bias.accel[0],
        bias.accel[1],
        bias.accel[2],
        bias.sample_count,
        window_s
    );
    Ok(bias)
}
