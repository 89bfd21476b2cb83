//! Error handling for the `PopReader`.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

/// Specialized error type for synthetic population access
#[derive(Debug, thiserror::Error)]
pub enum PopReaderError {
    /// Dataset root, country or version directory not found, or an invalid config
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An identifier is neither a known county FIPS code nor a location name
    #[error("Location not found: '{identifier}' is neither a county FIPS code nor a location name")]
    UnknownLocation {
        /// The identifier as supplied by the caller
        identifier: String,
    },

    /// No location is defined by exactly this set of FIPS codes
    #[error("No location defined by the FIPS codes: {fips_codes:?}")]
    UnknownFipsSet {
        /// The normalized (padded and sorted) FIPS codes
        fips_codes: Vec<String>,
    },

    /// More than one location claims the same set of FIPS codes
    #[error("FIPS codes {fips_codes:?} are claimed by several locations: {names:?}")]
    AmbiguousFipsSet {
        /// The normalized FIPS codes
        fips_codes: Vec<String>,
        /// Every location name sharing that set
        names: Vec<String>,
    },

    /// An expected data file is absent
    #[error("Missing file {} (needed for {purpose})", path.display())]
    MissingFileError {
        /// Path of the missing file
        path: PathBuf,
        /// What the file was needed for
        purpose: String,
    },

    /// A value or column does not match its declared schema
    #[error("Schema error in {}: {message}", path.display())]
    SchemaError {
        /// File (or directory) the offending data came from
        path: PathBuf,
        /// Description of the mismatch
        message: String,
    },

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error building or combining Arrow data
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),

    /// Error parsing a JSON configuration file
    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] serde_json::Error),

    /// Internal state could not be accessed, e.g. a poisoned cache lock
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl PopReaderError {
    /// Build a schema error tied to a file path
    pub fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports an unrecognized location or FIPS set
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownLocation { .. } | Self::UnknownFipsSet { .. }
        )
    }
}

/// Result type for `PopReader` operations
pub type Result<T> = std::result::Result<T, PopReaderError>;
