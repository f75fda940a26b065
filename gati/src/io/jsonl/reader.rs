//! Line-by-line reader for JSON-lines sensor logs.
//!
//! Every line is expected to be one JSON object with a string `msg`
//! discriminator. Lines that are not (truncated writes, serial noise, blank
//! lines) are skipped. Lines whose `msg` was not requested are skipped
//! without looking at their fields. A requested record with a missing or
//! mistyped field is a [`GatiError::Schema`].

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use serde_json::{Map, Value};

use super::types::{LogRecord, MessageKind, ReadStats};
use crate::core::types::{ImuSample, SampleSeries, TofReading};
use crate::error::{GatiError, Result};

/// Reader over a JSON-lines log.
///
/// # Example
///
/// ```ignore
/// use gati::io::jsonl::{LogReader, MessageKind};
///
/// let mut reader = LogReader::open("imu.json")?;
/// let series = reader.read_series()?;
///
/// // Second pass over the same file for heading and range frames
/// reader.rewind()?;
/// for record in reader.records_of(&[MessageKind::ImuEuler, MessageKind::TofRaw]) {
///     println!("{:?}", record?);
/// }
/// ```
pub struct LogReader<R> {
    source: R,
    line: Vec<u8>,
    stats: ReadStats,
}

impl LogReader<BufReader<File>> {
    /// Open a log file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LogReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            line: Vec::new(),
            stats: ReadStats::default(),
        }
    }

    /// Line accounting since open or the last rewind.
    pub fn stats(&self) -> ReadStats {
        self.stats
    }

    /// 1-based number of the last line consumed (0 before the first).
    pub fn line_number(&self) -> usize {
        self.stats.lines
    }

    /// Next record whose kind is in `kinds`.
    ///
    /// Returns `None` at end of input.
    pub fn next_of(&mut self, kinds: &[MessageKind]) -> Result<Option<LogRecord>> {
        loop {
            self.line.clear();
            if self.source.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.stats.lines += 1;

            if let Some(record) = self.decode_line(kinds)? {
                self.stats.records += 1;
                return Ok(Some(record));
            }
        }
    }

    /// Next record of any known kind.
    pub fn next_immediate(&mut self) -> Result<Option<LogRecord>> {
        self.next_of(&MessageKind::ALL)
    }

    /// Iterate over records of the given kinds.
    pub fn records_of<'a>(
        &'a mut self,
        kinds: &'a [MessageKind],
    ) -> impl Iterator<Item = Result<LogRecord>> + 'a {
        std::iter::from_fn(move || self.next_of(kinds).transpose())
    }

    /// Iterate over only IMU samples.
    pub fn imu_iter(&mut self) -> impl Iterator<Item = Result<ImuSample>> + '_ {
        std::iter::from_fn(move || {
            loop {
                match self.next_of(&[MessageKind::ImuRaw]) {
                    Ok(Some(LogRecord::Imu(sample))) => return Some(Ok(sample)),
                    Ok(Some(_)) => continue,
                    Ok(None) => return None,
                    Err(e) => return Some(Err(e)),
                }
            }
        })
    }

    /// Collect the remaining IMU samples.
    pub fn read_series(&mut self) -> Result<SampleSeries> {
        let samples = self.imu_iter().collect::<Result<Vec<_>>>()?;
        log::debug!(
            "Read {} IMU samples from {} lines ({} malformed, {} other kinds)",
            samples.len(),
            self.stats.lines,
            self.stats.malformed,
            self.stats.filtered
        );
        Ok(SampleSeries::new(samples))
    }

    fn decode_line(&mut self, kinds: &[MessageKind]) -> Result<Option<LogRecord>> {
        let line = self.stats.lines;

        let value: Value = match serde_json::from_slice(&self.line) {
            Ok(value) => value,
            Err(e) => {
                log::trace!("line {}: skipped, not JSON ({})", line, e);
                self.stats.malformed += 1;
                return Ok(None);
            }
        };

        let Some((object, msg)) = value
            .as_object()
            .and_then(|o| o.get("msg").and_then(Value::as_str).map(|msg| (o, msg)))
        else {
            log::trace!("line {}: skipped, no `msg` discriminator", line);
            self.stats.malformed += 1;
            return Ok(None);
        };

        let Some(kind) = MessageKind::from_msg(msg).filter(|k| kinds.contains(k)) else {
            self.stats.filtered += 1;
            return Ok(None);
        };

        let fields = Fields { object, line, kind };
        let record = match kind {
            MessageKind::ImuRaw => LogRecord::Imu(fields.imu_sample()?),
            MessageKind::ImuEuler => LogRecord::Heading(fields.number("heading")?),
            MessageKind::TofRaw => LogRecord::Tof(fields.tof_reading()?),
        };
        Ok(Some(record))
    }
}

impl<R: BufRead + Seek> LogReader<R> {
    /// Reset to the first line.
    pub fn rewind(&mut self) -> Result<()> {
        self.source.seek(SeekFrom::Start(0))?;
        self.stats = ReadStats::default();
        Ok(())
    }
}

/// Iterator over records of every known kind.
impl<R: BufRead> Iterator for LogReader<R> {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_immediate().transpose()
    }
}

/// Read every IMU sample from a log file.
pub fn read_series(path: impl AsRef<Path>) -> Result<SampleSeries> {
    LogReader::open(path)?.read_series()
}

/// Typed access to the fields of one record.
struct Fields<'a> {
    object: &'a Map<String, Value>,
    line: usize,
    kind: MessageKind,
}

impl Fields<'_> {
    fn error(&self, field: &'static str, reason: impl Into<String>) -> GatiError {
        GatiError::schema(self.line, self.kind.as_str(), field, reason)
    }

    fn required(&self, field: &'static str) -> Result<&Value> {
        match self.object.get(field) {
            Some(Value::Null) | None => Err(self.error(field, "is missing")),
            Some(value) => Ok(value),
        }
    }

    /// Numeric field; numbers and numeric strings are accepted.
    fn number(&self, field: &'static str) -> Result<f64> {
        let value = self.required(field)?;
        coerce_f64(value).map_err(|reason| self.error(field, reason))
    }

    /// Non-negative integer count.
    fn count(&self, field: &'static str) -> Result<u32> {
        let value = self.number(field)?;
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(self.error(field, format!("is not a valid count: {}", value)));
        }
        Ok(value as u32)
    }

    fn optional_u64(&self, field: &'static str) -> Result<Option<u64>> {
        match self.object.get(field) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.error(field, "must be a non-negative integer")),
        }
    }

    /// Array of numbers; absent is an empty array.
    fn number_array(&self, field: &'static str) -> Result<Vec<f64>> {
        match self.object.get(field) {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| coerce_f64(item).map_err(|reason| self.error(field, reason)))
                .collect(),
            Some(other) => Err(self.error(
                field,
                format!("has type {}, expected array", json_type(other)),
            )),
        }
    }

    fn imu_sample(&self) -> Result<ImuSample> {
        let sample = ImuSample::new(
            self.number("stamp")?,
            [self.number("ax")?, self.number("ay")?, self.number("az")?],
            [self.number("wx")?, self.number("wy")?, self.number("wz")?],
        );
        Ok(match self.optional_u64("seq")? {
            Some(seq) => sample.with_seq(seq),
            None => sample,
        })
    }

    fn tof_reading(&self) -> Result<TofReading> {
        let objects = self.count("objects")?;
        let ranges = self.number_array("range")?;
        if objects > 0 && ranges.is_empty() {
            return Err(self.error("range", format!("is empty but {} objects reported", objects)));
        }
        Ok(TofReading::new(objects, ranges))
    }
}

/// JSON has no encoding for inf or NaN, so non-finite strings are rejected.
fn coerce_f64(value: &Value) -> std::result::Result<f64, String> {
    let number = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("is not representable as f64: {}", n))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("is not a number: {:?}", s))?,
        other => return Err(format!("has type {}, expected number", json_type(other))),
    };
    if !number.is_finite() {
        return Err(format!("is not finite: {}", number));
    }
    Ok(number)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
