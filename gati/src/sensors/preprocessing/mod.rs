//! Acceleration and range preprocessing.
//!
//! ```text
//! raw accel → bias removal (yaw-projected) → moving average → corrected accel
//! heading + ToF frames → RangeScanBuilder → RangeScanConverter → points
//! ```
//!
//! Channel smoothers implement [`ChannelFilter`]:
//!
//! ```ignore
//! use gati::sensors::preprocessing::{ChannelFilter, MovingAverage};
//!
//! let filter = MovingAverage::new(10);
//! let smoothed = filter.filter(&accel_x);
//! println!("Filter '{}' applied", filter.name());
//! ```

mod bias_correction;
mod moving_average;
mod range_scan;

pub use bias_correction::AccelerationCorrector;
pub use moving_average::{DEFAULT_FILTER_WINDOW, MovingAverage};
pub use range_scan::{DEFAULT_RANGE_OFFSET_M, RangeScanBuilder, RangeScanConverter};

/// A filter over one scalar channel.
///
/// Output has the same length as the input.
pub trait ChannelFilter: Send + Sync {
    /// Apply the filter to a channel.
    fn filter(&self, values: &[f64]) -> Vec<f64>;

    /// Name of this filter for diagnostics.
    fn name(&self) -> &'static str;
}
