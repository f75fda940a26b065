//! I/O layer.
//!
//! # Contents
//!
//! - [`jsonl`]: JSON-lines sensor log reading and writing
//! - [`export`]: CSV export of traces and range scans

pub mod export;
pub mod jsonl;

pub use export::{SampleRange, TraceView};
pub use jsonl::{LogReader, LogRecord, LogWriter, MessageKind, read_series};
