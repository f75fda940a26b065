//! Utility functions for the command line tool and reports.
//!
//! This module provides:
//! - Statistical utilities (std_dev, ChannelStats)

mod stats;

pub use stats::{ChannelStats, std_dev};
