//! Configuration for gati
//!
//! Loaded from a TOML file. Every section and field is optional and falls
//! back to its default, so an empty file is a valid configuration.

use crate::error::Result;
use crate::sensors::calibration::DEFAULT_BIAS_WINDOW_S;
use crate::sensors::odometry::KinematicModel;
use crate::sensors::preprocessing::{DEFAULT_FILTER_WINDOW, DEFAULT_RANGE_OFFSET_M};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file tried when none is given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "gati.toml";

/// Default moving-average window when writing a filtered log.
pub const DEFAULT_EXPORT_WINDOW: usize = 10;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub bias: BiasConfig,
    pub filter: FilterConfig,
    pub export: ExportConfig,
    pub integration: IntegrationConfig,
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

/// Accelerometer bias estimation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BiasConfig {
    /// Stationary window at the start of the log (seconds)
    pub window_s: f64,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            window_s: DEFAULT_BIAS_WINDOW_S,
        }
    }
}

/// Smoothing of corrected acceleration for dead reckoning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Moving-average window in samples (0 disables)
    pub window: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_FILTER_WINDOW,
        }
    }
}

/// Filtered log output
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Moving-average window in samples (0 disables)
    pub window: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_EXPORT_WINDOW,
        }
    }
}

/// Position integration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Position update rule
    pub kinematics: KinematicModel,
}

/// Heading-tagged range scan
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Distance from the rotation axis to the sensor face (meters)
    pub range_offset_m: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            range_offset_m: DEFAULT_RANGE_OFFSET_M,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use gati::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("gati.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must load. Without one, [`DEFAULT_CONFIG_PATH`] is
    /// loaded if it exists; otherwise defaults apply. Returns the file the
    /// configuration came from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !fallback.exists() {
                    return Ok((Self::default(), None));
                }
                fallback
            }
        };
        let config = Self::from_file(&path)?;
        Ok((config, Some(path)))
    }
}
