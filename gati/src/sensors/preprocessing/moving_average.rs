//! Trailing moving-average smoothing.
//!
//! ```text
//! out[i] = values[i]                                   i < window
//! out[i] = (values[i] + values[i-1] + … + values[i-window+1]) / window
//! ```
//!
//! The first `window` outputs pass through unfiltered: there is not enough
//! history to average. A window of 0 disables filtering.

use super::ChannelFilter;

/// Default window for the dead-reckoning pipeline.
pub const DEFAULT_FILTER_WINDOW: usize = 100;

/// Trailing moving average over a fixed number of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverage {
    window: usize,
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_WINDOW)
    }
}

impl MovingAverage {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// A filter that returns its input unchanged.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.window > 0
    }

    /// True when a channel of `len` samples is too short to be averaged at
    /// any index, so the whole channel passes through.
    pub fn passes_through(&self, len: usize) -> bool {
        !self.is_enabled() || self.window >= len
    }

    /// Smooth one channel.
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        if self.passes_through(values.len()) {
            return values.to_vec();
        }

        let n = self.window as f64;
        (0..values.len())
            .map(|i| {
                if i < self.window {
                    values[i]
                } else {
                    (0..self.window).map(|j| values[i - j]).sum::<f64>() / n
                }
            })
            .collect()
    }
}

impl ChannelFilter for MovingAverage {
    fn filter(&self, values: &[f64]) -> Vec<f64> {
        self.apply(values)
    }

    fn name(&self) -> &'static str {
        "MovingAverage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_warm_up_passes_through() {
        let values = [5.0, 1.0, 9.0, 3.0, 3.0];
        let out = MovingAverage::new(3).apply(&values);

        assert_eq!(out.len(), values.len());
        assert_eq!(&out[..3], &values[..3]);
    }

    #[test]
    fn test_trailing_window_mean() {
        let values = [5.0, 1.0, 9.0, 3.0, 3.0];
        let out = MovingAverage::new(3).apply(&values);

        // i = 3: (3 + 9 + 1) / 3, i = 4: (3 + 3 + 9) / 3
        assert_relative_eq!(out[3], 13.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[4], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_channel_unchanged() {
        let values = vec![2.5; 50];
        let out = MovingAverage::new(10).apply(&values);
        for v in out {
            assert_relative_eq!(v, 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let values = [1.0, -2.0, 3.0];
        assert_eq!(MovingAverage::new(1).apply(&values), values.to_vec());
    }

    #[test]
    fn test_window_larger_than_series() {
        let values = [1.0, 2.0, 3.0];
        let filter = MovingAverage::new(10);
        assert!(filter.passes_through(values.len()));
        assert_eq!(filter.apply(&values), values.to_vec());
    }

    #[test]
    fn test_disabled() {
        let filter = MovingAverage::disabled();
        assert!(!filter.is_enabled());
        assert_eq!(filter.filter(&[4.0, 8.0]), vec![4.0, 8.0]);
        assert_eq!(filter.name(), "MovingAverage");
    }

    #[test]
    fn test_empty_channel() {
        assert!(MovingAverage::new(3).apply(&[]).is_empty());
    }
}
