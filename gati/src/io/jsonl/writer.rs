//! JSON-lines writer producing logs the [`LogReader`](super::LogReader)
//! can read back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::types::{LogRecord, MessageKind};
use crate::core::types::{ImuSample, SampleSeries, TofReading};
use crate::error::Result;

#[derive(Serialize)]
struct ImuRawLine {
    msg: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seq: Option<u64>,
    stamp: f64,
    ax: f64,
    ay: f64,
    az: f64,
    wx: f64,
    wy: f64,
    wz: f64,
}

impl From<&ImuSample> for ImuRawLine {
    fn from(s: &ImuSample) -> Self {
        let [ax, ay, az] = s.accel;
        let [wx, wy, wz] = s.gyro;
        Self {
            msg: MessageKind::ImuRaw.as_str(),
            seq: s.seq,
            stamp: s.stamp,
            ax,
            ay,
            az,
            wx,
            wy,
            wz,
        }
    }
}

#[derive(Serialize)]
struct HeadingLine {
    msg: &'static str,
    heading: f64,
}

#[derive(Serialize)]
struct TofLine<'a> {
    msg: &'static str,
    objects: u32,
    range: &'a [f64],
}

/// Writes records one JSON object per line.
///
/// # Example
///
/// ```ignore
/// use gati::io::jsonl::LogWriter;
///
/// let mut writer = LogWriter::create("filtered.json")?;
/// writer.write_series(&filtered)?;
/// let lines = writer.finish()?;
/// ```
pub struct LogWriter<W: Write> {
    writer: W,
    path: Option<PathBuf>,
    lines_written: u64,
}

impl LogWriter<BufWriter<File>> {
    /// Create (or truncate) a log file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = Self::new(BufWriter::new(file));
        writer.path = Some(path);
        Ok(writer)
    }
}

impl<W: Write> LogWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            path: None,
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Write an `imu_raw` line.
    pub fn write_sample(&mut self, sample: &ImuSample) -> Result<()> {
        self.write_line(&ImuRawLine::from(sample))
    }

    /// Write every sample of a series in order.
    pub fn write_series(&mut self, series: &SampleSeries) -> Result<()> {
        for sample in series {
            self.write_sample(sample)?;
        }
        Ok(())
    }

    /// Write an `imu_euler` line carrying only a heading.
    pub fn write_heading(&mut self, heading_deg: f64) -> Result<()> {
        self.write_line(&HeadingLine {
            msg: MessageKind::ImuEuler.as_str(),
            heading: heading_deg,
        })
    }

    /// Write a `tof_raw` line.
    pub fn write_tof(&mut self, tof: &TofReading) -> Result<()> {
        self.write_line(&TofLine {
            msg: MessageKind::TofRaw.as_str(),
            objects: tof.objects,
            range: &tof.ranges,
        })
    }

    /// Write any record.
    pub fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        match record {
            LogRecord::Imu(sample) => self.write_sample(sample),
            LogRecord::Heading(heading) => self.write_heading(*heading),
            LogRecord::Tof(tof) => self.write_tof(tof),
        }
    }

    /// Write a pre-formatted line verbatim.
    pub fn write_raw(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Flush and return the number of lines written.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        if let Some(path) = &self.path {
            log::debug!("Wrote {} lines to {}", self.lines_written, path.display());
        }
        Ok(self.lines_written)
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line<T: Serialize>(&mut self, line: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }
}
