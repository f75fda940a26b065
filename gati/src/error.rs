//! Error types for gati

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, GatiError>;

/// gati error types
#[derive(Debug, Error)]
pub enum GatiError {
    /// I/O error while reading a log or writing an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record with a recognized `msg` kind is missing a field or has a
    /// field of the wrong type.
    #[error("Schema error at line {line} ({kind}): field `{field}` {reason}")]
    Schema {
        /// 1-based line number in the source
        line: usize,
        /// Message kind the record was decoded as
        kind: &'static str,
        /// Offending field name
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Not enough samples to compute the requested quantity
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Two channels that must be index-aligned have different lengths
    #[error("Length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Length of the reference channel
        expected: usize,
        /// Length of the offending channel
        actual: usize,
    },

    /// Checked access past the end of a series
    #[error("Index {index} out of bounds for series of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Series length
        len: usize,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for GatiError {
    fn from(e: toml::de::Error) -> Self {
        GatiError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for GatiError {
    fn from(e: toml::ser::Error) -> Self {
        GatiError::Config(e.to_string())
    }
}

impl GatiError {
    /// Build a schema error for `field` of a `kind` record on `line`.
    pub(crate) fn schema(
        line: usize,
        kind: &'static str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        GatiError::Schema {
            line,
            kind,
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = GatiError::schema(3, "imu_raw", "az", "is missing");
        assert_eq!(
            err.to_string(),
            "Schema error at line 3 (imu_raw): field `az` is missing"
        );
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: GatiError = toml::from_str::<toml::Value>("[bias\nwindow_s = ")
            .unwrap_err()
            .into();
        assert!(matches!(err, GatiError::Config(_)));
    }
}
