//! Dead-reckoning integrators.
//!
//! Turns IMU samples into orientation, velocity and position estimates.
//!
//! # Components
//!
//! - [`integrate_orientation`]: Gyro rate → cumulative angles per axis
//! - [`PositionIntegrator`]: Corrected acceleration → velocity → position
//! - [`ImuAnalyzer`]: Static noise and offset report
//!
//! # Example
//!
//! ```ignore
//! use gati::sensors::odometry::{integrate_orientation, KinematicModel, PositionIntegrator};
//!
//! let orientation = integrate_orientation(&series)?;
//! println!("Final yaw: {:?}", orientation.yaw().last());
//!
//! let integrator = PositionIntegrator::new(KinematicModel::Kinematic);
//! let trace = integrator.integrate(&corrected_accel, &series.stamps())?;
//! println!("Final position: {:?}", trace.final_position());
//! ```

mod imu_analysis;
mod orientation;
mod position;

pub use imu_analysis::{ImuAnalysisResult, ImuAnalyzer};
pub use orientation::{integrate_axis, integrate_orientation};
pub use position::{KinematicModel, PositionIntegrator, integrate_position, integrate_velocity};
