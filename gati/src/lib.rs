//! gati - dead reckoning from IMU JSON-lines logs
//!
//! # Architecture
//!
//! The crate is organized into layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      main                           │  ← CLI
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │              pipeline/, config                      │  ← Orchestration
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │               (jsonl logs, CSV export)              │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   sensors/                          │  ← Sensor processing
//! │     (calibration, odometry, preprocessing)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                core/, utils/                        │  ← Foundation
//! │               (types, math, stats)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! ```text
//! log ─► LogReader ─► bias ─► orientation ─► corrected accel ─► position ─► CSV
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gati::{DeadReckoning, DeadReckoningConfig, read_series};
//!
//! let series = read_series("imu.json")?;
//! let result = DeadReckoning::new(DeadReckoningConfig::default()).run(&series)?;
//! println!("{:?}", result.position.final_position());
//! # Ok::<(), gati::GatiError>(())
//! ```

pub mod error;

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;
pub mod utils;

// ============================================================================
// Layer 2: Sensor processing (depends on core)
// ============================================================================
pub mod sensors;

// ============================================================================
// Layer 3: I/O infrastructure (depends on core)
// ============================================================================
pub mod io;

// ============================================================================
// Layer 4: Orchestration (depends on all layers)
// ============================================================================
pub mod config;
pub mod pipeline;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use error::{GatiError, Result};

// Core types
pub use core::math;
pub use core::types::{
    Axis, ImuSample, OrientationTrace, Point2D, PositionTrace, RangeReading, SampleSeries,
    TofReading, Trace3,
};

// Sensors
pub use sensors::calibration::{AccelBiasEstimator, BiasEstimate, estimate_bias};
pub use sensors::odometry::{
    ImuAnalysisResult, ImuAnalyzer, KinematicModel, PositionIntegrator, integrate_orientation,
};
pub use sensors::preprocessing::{
    AccelerationCorrector, ChannelFilter, MovingAverage, RangeScanBuilder, RangeScanConverter,
};

// I/O
pub use io::export::{SampleRange, TraceView};
pub use io::jsonl::{LogReader, LogRecord, LogWriter, MessageKind, read_series};

// Orchestration
pub use config::AppConfig;
pub use pipeline::{BiasFilter, DeadReckoning, DeadReckoningConfig, DeadReckoningResult};
