//! gati - dead reckoning from IMU JSON-lines logs
//!
//! # Usage
//!
//! ```bash
//! # Noise statistics of a log recorded at rest
//! gati info static.json
//!
//! # Full pipeline, trace written to CSV
//! gati position walk.json -o walk.csv --kinematics legacy --begin 500 --end 2000
//!
//! # Bias-corrected, smoothed copy of a log
//! gati filter walk.json -o filtered.json --filter-size 10
//!
//! # Heading-tagged range scan
//! gati --config gati.toml scan sweep.json -o scan.csv
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use gati::config::AppConfig;
use gati::core::types::SampleSeries;
use gati::io::export::{self, SampleRange};
use gati::io::jsonl::{LogReader, LogRecord, LogWriter, MessageKind};
use gati::pipeline::{BiasFilter, DeadReckoning, DeadReckoningConfig};
use gati::sensors::calibration::estimate_bias;
use gati::sensors::odometry::{ImuAnalyzer, KinematicModel, integrate_orientation};
use gati::sensors::preprocessing::{RangeScanBuilder, RangeScanConverter};

#[derive(Parser)]
#[command(name = "gati")]
#[command(version, about = "Dead reckoning from IMU JSON-lines logs")]
struct Cli {
    /// Configuration file (default: ./gati.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Noise statistics of a log recorded at rest
    Info {
        /// Input log
        #[arg(value_name = "LOG")]
        input: PathBuf,
    },

    /// Estimate the accelerometer bias
    Bias {
        /// Input log
        #[arg(value_name = "LOG")]
        input: PathBuf,

        /// Stationary window (seconds)
        #[arg(long)]
        bias_time: Option<f64>,
    },

    /// Integrate angular rate into orientation
    Orientation {
        /// Input log
        #[arg(value_name = "LOG")]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Full dead reckoning: bias, orientation, correction, position
    Position {
        /// Input log
        #[arg(value_name = "LOG")]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stationary window (seconds)
        #[arg(long)]
        bias_time: Option<f64>,

        /// Moving-average window (samples, 0 disables)
        #[arg(long)]
        filter_size: Option<usize>,

        /// Position update rule
        #[arg(long, value_enum)]
        kinematics: Option<KinematicModel>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Write a bias-corrected, smoothed copy of a log
    Filter {
        /// Input log
        #[arg(value_name = "LOG")]
        input: PathBuf,

        /// Output log
        #[arg(short, long, default_value = "filtered.json")]
        output: PathBuf,

        /// Stationary window (seconds)
        #[arg(long)]
        bias_time: Option<f64>,

        /// Moving-average window (samples, 0 disables)
        #[arg(long)]
        filter_size: Option<usize>,
    },

    /// Project heading-tagged ranges into a 2D scan
    Scan {
        /// Input log
        #[arg(value_name = "LOG")]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Distance from the rotation axis to the sensor (meters)
        #[arg(long)]
        range_offset: Option<f64>,
    },
}

/// Sample index range for exports.
#[derive(Args)]
struct RangeArgs {
    /// First exported sample index
    #[arg(long, default_value = "0")]
    begin: usize,

    /// One past the last exported sample index
    #[arg(long)]
    end: Option<usize>,
}

impl RangeArgs {
    fn sample_range(&self) -> SampleRange {
        SampleRange::new(self.begin, self.end)
    }
}

fn main() {
    let cli = Cli::parse();

    let (config, source) = match AppConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} - {}",
            record.level(),
            record.target(),
            record.args()
        )
    })
    .init();

    match &source {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::debug!("Using default config"),
    }

    if let Err(e) = run(&cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: &Command, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Info { input } => {
            let series = load_series(input)?;
            let result = ImuAnalyzer::analyze(&series)?;
            result.print();
        }

        Command::Bias { input, bias_time } => {
            let series = load_series(input)?;
            let window_s = bias_time.unwrap_or(config.bias.window_s);
            let bias = estimate_bias(&series, window_s)?;
            println!(
                "Bias over {} samples ({} s): ax={:.6} ay={:.6} az={:.6}",
                bias.sample_count, window_s, bias.accel[0], bias.accel[1], bias.accel[2]
            );
        }

        Command::Orientation {
            input,
            output,
            range,
        } => {
            let series = load_series(input)?;
            let orientation = integrate_orientation(&series)?;
            if let Some([x, y, z]) = orientation.angles.last() {
                println!("Final angles: x={:.3} y={:.3} z={:.3}", x, y, z);
            }
            if let Some(path) = output {
                let rows = export::export_orientation(
                    path,
                    &series.stamps(),
                    &orientation,
                    range.sample_range(),
                )?;
                log::info!("Wrote {} rows to {}", rows, path.display());
            }
        }

        Command::Position {
            input,
            output,
            bias_time,
            filter_size,
            kinematics,
            range,
        } => {
            let series = load_series(input)?;
            let mut params = DeadReckoningConfig::from(config);
            if let Some(window_s) = bias_time {
                params.bias_window_s = *window_s;
            }
            if let Some(window) = filter_size {
                params.filter_window = *window;
            }
            if let Some(model) = kinematics {
                params.kinematics = *model;
            }

            let result = DeadReckoning::new(params).run(&series)?;
            println!(
                "Bias: [{:.6}, {:.6}, {:.6}] from {} samples",
                result.bias.accel[0],
                result.bias.accel[1],
                result.bias.accel[2],
                result.bias.sample_count
            );
            if let Some([x, y, z]) = result.position.final_position() {
                println!("Final position ({}): x={:.4} y={:.4} z={:.4}", params.kinematics, x, y, z);
            }
            if let Some(path) = output {
                let rows = export::export_trace(path, &result.view(), range.sample_range())?;
                log::info!("Wrote {} rows to {}", rows, path.display());
            }
        }

        Command::Filter {
            input,
            output,
            bias_time,
            filter_size,
        } => {
            let series = load_series(input)?;
            let filter = BiasFilter::new(
                bias_time.unwrap_or(config.bias.window_s),
                filter_size.unwrap_or(config.export.window),
            );
            let (bias, filtered) = filter.run(&series)?;

            let mut writer = LogWriter::create(output)?;
            writer.write_series(&filtered)?;
            let lines = writer.finish()?;
            println!(
                "Removed bias [{:.6}, {:.6}, {:.6}]; wrote {} samples to {}",
                bias.accel[0],
                bias.accel[1],
                bias.accel[2],
                lines,
                output.display()
            );
        }

        Command::Scan {
            input,
            output,
            range_offset,
        } => {
            let mut reader = LogReader::open(input)?;
            let mut builder = RangeScanBuilder::new();
            for record in reader.records_of(&[MessageKind::ImuEuler, MessageKind::TofRaw]) {
                match record? {
                    LogRecord::Heading(heading) => builder.observe_heading(heading),
                    LogRecord::Tof(tof) => {
                        builder.observe_tof(&tof);
                    }
                    LogRecord::Imu(_) => {}
                }
            }
            log::info!(
                "{} range readings ({} frames dropped)",
                builder.readings().len(),
                builder.dropped()
            );

            let offset = range_offset.unwrap_or(config.scan.range_offset_m);
            let readings = builder.finish();
            let points = RangeScanConverter::to_points_with_offset(&readings, offset);
            match output {
                Some(path) => {
                    let rows = export::export_scan(path, &readings, &points)?;
                    log::info!("Wrote {} rows to {}", rows, path.display());
                }
                None => {
                    let stdout = std::io::stdout();
                    export::write_scan_csv(&mut stdout.lock(), &readings, &points)?;
                }
            }
        }
    }
    Ok(())
}

fn load_series(path: &Path) -> Result<SampleSeries, Box<dyn std::error::Error>> {
    let mut reader = LogReader::open(path)?;
    let series = reader.read_series()?;
    let stats = reader.stats();
    log::info!(
        "Loaded {} IMU samples from {} ({} lines, {} malformed)",
        series.len(),
        path.display(),
        stats.lines,
        stats.malformed
    );
    Ok(series)
}
