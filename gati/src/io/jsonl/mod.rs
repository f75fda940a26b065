//! JSON-lines sensor logs.
//!
//! # Format
//!
//! One JSON object per line, discriminated by `msg`:
//!
//! ```text
//! {"msg":"imu_raw","seq":12,"stamp":3.02,"ax":0.01,"ay":-0.02,"az":9.79,"wx":0.1,"wy":0.0,"wz":-0.3}
//! {"msg":"imu_euler","heading":87.5}
//! {"msg":"tof_raw","objects":1,"range":[0.82]}
//! ```
//!
//! `seq` is optional. Numeric fields may also be numeric strings.
//!
//! # Example
//!
//! ```ignore
//! use gati::io::jsonl::{LogWriter, read_series};
//!
//! let series = read_series("imu.json")?;
//!
//! let mut writer = LogWriter::create("copy.json")?;
//! writer.write_series(&series)?;
//! writer.finish()?;
//! ```

mod reader;
mod types;
mod writer;

pub use reader::{LogReader, read_series};
pub use types::{LogRecord, MessageKind, ReadStats};
pub use writer::LogWriter;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
pub use test_fixtures::LogTestFixture;
