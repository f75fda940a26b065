//! Core data types.
//!
//! - [`ImuSample`]: one timestamped accelerometer + gyroscope reading
//! - [`SampleSeries`]: ordered samples from one log
//! - [`Trace3`]: three index-aligned per-axis channels
//! - [`OrientationTrace`], [`PositionTrace`]: integrator outputs
//! - [`TofReading`], [`RangeReading`]: time-of-flight frames and heading-tagged ranges
//! - [`Point2D`]: projected range reading

mod point;
mod range;
mod sample;
mod trace;

pub use point::Point2D;
pub use range::{RangeReading, TofReading};
pub use sample::{Axis, ImuSample, SampleSeries};
pub use trace::{OrientationTrace, PositionTrace, Trace3};
