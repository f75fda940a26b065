//! CSV export of derived traces.
//!
//! # Output Files
//!
//! - trace CSV: `stamp, angle_{x,y,z}, accel_{x,y,z}, vel_{x,y,z}, pos_{x,y,z}`,
//!   one row per sample
//! - orientation CSV: `stamp, angle_{x,y,z}`
//! - scan CSV: `heading_deg, range_m, x_m, y_m`, one row per range reading

use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;

use crate::core::types::{OrientationTrace, Point2D, PositionTrace, RangeReading, Trace3};
use crate::error::{GatiError, Result};

/// Trace CSV header.
pub const TRACE_HEADER: &str = "stamp,angle_x,angle_y,angle_z,accel_x,accel_y,accel_z,vel_x,vel_y,vel_z,pos_x,pos_y,pos_z";

/// Orientation CSV header.
pub const ORIENTATION_HEADER: &str = "stamp,angle_x,angle_y,angle_z";

/// Scan CSV header.
pub const SCAN_HEADER: &str = "heading_deg,range_m,x_m,y_m";

/// Half-open sample index range `[begin, end)`.
///
/// `end` past the series is clamped; `None` means the whole tail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleRange {
    pub begin: usize,
    pub end: Option<usize>,
}

impl SampleRange {
    pub fn new(begin: usize, end: Option<usize>) -> Self {
        Self { begin, end }
    }

    /// Every sample.
    pub fn all() -> Self {
        Self::default()
    }

    /// Concrete indices for a series of `len` samples.
    pub fn resolve(&self, len: usize) -> Result<Range<usize>> {
        let end = self.end.map_or(len, |end| end.min(len));
        if self.begin > end {
            return Err(GatiError::IndexOutOfBounds {
                index: self.begin,
                len: end,
            });
        }
        Ok(self.begin..end)
    }
}

/// Borrowed, index-aligned traces of one run.
#[derive(Debug, Clone, Copy)]
pub struct TraceView<'a> {
    pub stamps: &'a [f64],
    pub orientation: &'a OrientationTrace,
    pub accel: &'a Trace3,
    pub position: &'a PositionTrace,
}

impl TraceView<'_> {
    fn check_aligned(&self) -> Result<()> {
        let expected = self.stamps.len();
        for actual in [
            self.orientation.len(),
            self.accel.len(),
            self.position.velocity.len(),
            self.position.position.len(),
        ] {
            if actual != expected {
                return Err(GatiError::LengthMismatch { expected, actual });
            }
        }
        Ok(())
    }
}

/// Write trace rows in `range`; returns the number of rows written.
pub fn write_trace_csv<W: Write>(
    writer: &mut W,
    view: &TraceView<'_>,
    range: SampleRange,
) -> Result<usize> {
    view.check_aligned()?;
    let rows = range.resolve(view.stamps.len())?;

    writeln!(writer, "{}", TRACE_HEADER)?;
    for i in rows.clone() {
        write!(writer, "{:.6}", view.stamps[i])?;
        for trace in [
            &view.orientation.angles,
            view.accel,
            &view.position.velocity,
            &view.position.position,
        ] {
            for channel in trace.as_channels() {
                write!(writer, ",{:.6}", channel[i])?;
            }
        }
        writeln!(writer)?;
    }
    Ok(rows.len())
}

/// Write orientation rows in `range`.
pub fn write_orientation_csv<W: Write>(
    writer: &mut W,
    stamps: &[f64],
    orientation: &OrientationTrace,
    range: SampleRange,
) -> Result<usize> {
    if orientation.len() != stamps.len() {
        return Err(GatiError::LengthMismatch {
            expected: stamps.len(),
            actual: orientation.len(),
        });
    }
    let rows = range.resolve(stamps.len())?;

    writeln!(writer, "{}", ORIENTATION_HEADER)?;
    for i in rows.clone() {
        let [x, y, z] = orientation.angles.as_channels().map(|c| c[i]);
        writeln!(writer, "{:.6},{:.6},{:.6},{:.6}", stamps[i], x, y, z)?;
    }
    Ok(rows.len())
}

/// Write scan rows pairing each reading with its projected point.
pub fn write_scan_csv<W: Write>(
    writer: &mut W,
    readings: &[RangeReading],
    points: &[Point2D],
) -> Result<usize> {
    if readings.len() != points.len() {
        return Err(GatiError::LengthMismatch {
            expected: readings.len(),
            actual: points.len(),
        });
    }

    writeln!(writer, "{}", SCAN_HEADER)?;
    for (reading, point) in readings.iter().zip(points) {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4}",
            reading.heading_deg, reading.range_m, point.x, point.y
        )?;
    }
    Ok(readings.len())
}

/// Write a trace CSV file.
pub fn export_trace(path: impl AsRef<Path>, view: &TraceView<'_>, range: SampleRange) -> Result<usize> {
    let mut file = BufWriter::new(File::create(path.as_ref())?);
    let rows = write_trace_csv(&mut file, view, range)?;
    file.flush()?;
    log::debug!("Exported {} trace rows to {}", rows, path.as_ref().display());
    Ok(rows)
}

/// Write an orientation CSV file.
pub fn export_orientation(
    path: impl AsRef<Path>,
    stamps: &[f64],
    orientation: &OrientationTrace,
    range: SampleRange,
) -> Result<usize> {
    let mut file = BufWriter::new(File::create(path.as_ref())?);
    let rows = write_orientation_csv(&mut file, stamps, orientation, range)?;
    file.flush()?;
    log::debug!("Exported {} orientation rows to {}", rows, path.as_ref().display());
    Ok(rows)
}

/// Write a scan CSV file.
pub fn export_scan(
    path: impl AsRef<Path>,
    readings: &[RangeReading],
    points: &[Point2D],
) -> Result<usize> {
    let mut file = BufWriter::new(File::create(path.as_ref())?);
    let rows = write_scan_csv(&mut file, readings, points)?;
    file.flush()?;
    log::debug!("Exported {} scan rows to {}", rows, path.as_ref().display());
    Ok(rows)
}
