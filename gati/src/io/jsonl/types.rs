//! Record types for JSON-lines sensor logs.

use crate::core::types::{ImuSample, TofReading};

/// Value of the `msg` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Raw accelerometer and gyroscope sample
    ImuRaw,
    /// Fused orientation; only the heading is used
    ImuEuler,
    /// Time-of-flight range frame
    TofRaw,
}

impl MessageKind {
    pub const ALL: [MessageKind; 3] = [
        MessageKind::ImuRaw,
        MessageKind::ImuEuler,
        MessageKind::TofRaw,
    ];

    /// Discriminator string as written in the log.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::ImuRaw => "imu_raw",
            MessageKind::ImuEuler => "imu_euler",
            MessageKind::TofRaw => "tof_raw",
        }
    }

    /// Parse a discriminator; unknown kinds give `None`.
    pub fn from_msg(msg: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == msg)
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    Imu(ImuSample),
    /// Heading in degrees
    Heading(f64),
    Tof(TofReading),
}

impl LogRecord {
    pub fn kind(&self) -> MessageKind {
        match self {
            LogRecord::Imu(_) => MessageKind::ImuRaw,
            LogRecord::Heading(_) => MessageKind::ImuEuler,
            LogRecord::Tof(_) => MessageKind::TofRaw,
        }
    }

    pub fn as_imu(&self) -> Option<&ImuSample> {
        match self {
            LogRecord::Imu(sample) => Some(sample),
            _ => None,
        }
    }
}

/// Line accounting for one pass over a log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Lines consumed from the source
    pub lines: usize,
    /// Records returned to the caller
    pub records: usize,
    /// Lines that were not JSON objects with a string `msg`
    pub malformed: usize,
    /// Well-formed lines of a kind that was not requested
    pub filtered: usize,
}
