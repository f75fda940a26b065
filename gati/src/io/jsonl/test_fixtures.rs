//! Test fixtures for generating synthetic log files.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::writer::LogWriter;
use crate::core::types::{ImuSample, TofReading};

/// Temporary JSON-lines log with synthetic data.
///
/// The temporary directory is removed when the fixture is dropped.
pub struct LogTestFixture {
    temp_dir: TempDir,
    log_path: PathBuf,
}

impl LogTestFixture {
    fn build(name: &str, f: impl FnOnce(&mut LogWriter<std::io::BufWriter<std::fs::File>>)) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join(name);

        let mut writer = LogWriter::create(&log_path).expect("Failed to create log");
        f(&mut writer);
        writer.finish().expect("Failed to finish log");

        Self { temp_dir, log_path }
    }

    /// Sensor at rest with a constant offset on every accelerometer axis.
    ///
    /// 100 Hz for `seconds`, gravity on z.
    pub fn stationary(seconds: f64, offset: [f64; 3]) -> Self {
        let n = (seconds * 100.0).round() as usize;
        Self::build("stationary.json", |w| {
            for i in 0..n {
                let sample = ImuSample::new(
                    i as f64 * 0.01,
                    [offset[0], offset[1], 9.81 + offset[2]],
                    [0.0; 3],
                )
                .with_seq(i as u64);
                w.write_sample(&sample).expect("Failed to write sample");
            }
        })
    }

    /// Heading sweep with a wall at constant range.
    ///
    /// Starts with one range frame before any heading, then alternates
    /// heading and range frames every `step_deg` through a full turn.
    pub fn heading_sweep(step_deg: f64, range_m: f64) -> Self {
        Self::build("sweep.json", |w| {
            w.write_tof(&TofReading::new(1, vec![range_m]))
                .expect("Failed to write tof");
            let steps = (360.0 / step_deg) as usize;
            for i in 0..steps {
                w.write_heading(i as f64 * step_deg)
                    .expect("Failed to write heading");
                w.write_tof(&TofReading::new(1, vec![range_m]))
                    .expect("Failed to write tof");
            }
        })
    }

    /// Log built from literal lines.
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::build("lines.json", |w| {
            for line in lines {
                w.write_raw(line).expect("Failed to write line");
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::jsonl::{LogReader, MessageKind, read_series};

    #[test]
    fn test_stationary_fixture() {
        let fixture = LogTestFixture::stationary(1.0, [0.1, 0.0, 0.0]);
        let series = read_series(fixture.path()).unwrap();
        assert_eq!(series.len(), 100);
        assert_eq!(series.get(99).unwrap().seq, Some(99));
    }

    #[test]
    fn test_sweep_fixture() {
        let fixture = LogTestFixture::heading_sweep(90.0, 1.0);
        let mut reader = LogReader::open(fixture.path()).unwrap();
        let count = reader
            .records_of(&[MessageKind::ImuEuler, MessageKind::TofRaw])
            .count();
        assert_eq!(count, 9);
    }
}
