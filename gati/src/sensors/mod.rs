//! Sensor processing layer.
//!
//! # Contents
//!
//! - [`calibration`]: static accelerometer bias
//! - [`odometry`]: orientation and position integration, noise analysis
//! - [`preprocessing`]: bias removal, smoothing, range projection

pub mod calibration;
pub mod odometry;
pub mod preprocessing;
