//! Statistical utility functions.

use serde::Serialize;

use crate::core::math::mean;

/// Compute the sample standard deviation (n - 1 denominator).
///
/// Returns 0.0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let Some(mean) = mean(values) else {
        return 0.0;
    };
    let variance: f64 = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Summary statistics for one sensor channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl ChannelStats {
    /// Compute statistics from a channel; `None` when it is empty.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let std = std_dev(values);
        Some(Self {
            min,
            max,
            mean,
            std,
        })
    }

    /// Print statistics with a label.
    pub fn print(&self, name: &str) {
        println!(
            "{}: min={:.5}, max={:.5}, mean={:.5}, std={:.5}",
            name, self.min, self.max, self.mean, self.std
        );
    }
}
