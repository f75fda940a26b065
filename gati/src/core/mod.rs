//! Core foundation layer.
//!
//! This is the bottom layer with no internal dependencies beyond the error
//! type. All other layers depend on core.
//!
//! # Contents
//!
//! - [`types`]: Samples, series and derived traces
//! - [`math`]: Cumulative scan and rectangular integration primitives

pub mod math;
pub mod types;
