//! Configuration for `PopReader`.

pub mod paths;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::error::util::safe_read_to_string;
use crate::schema::SchemaVersion;
use crate::utils::{DEFAULT_BATCH_SIZE, get_batch_size};

pub use paths::resolve_population_path;

/// Configuration for opening a synthetic population
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopReaderConfig {
    /// Country subdirectory under `<data root>/country`
    pub country: String,
    /// Population version subdirectory, e.g. `US_2010.v5`
    pub version: String,
    /// Explicit data root; takes precedence over `FRED_DATA`
    pub fred_data: Option<PathBuf>,
    /// Explicit home directory; its `data` subdirectory is used when no data root is known
    pub fred_home: Option<PathBuf>,
    /// On-disk format; detected from the population directory when unset
    pub format: Option<SchemaVersion>,
    /// Read per-county directories on the rayon pool
    pub parallel: bool,
    /// Keep the parsed locations index for the lifetime of the population object
    pub cache_locations: bool,
    /// Draw a progress bar while reading directories
    pub show_progress: bool,
    /// Rows per Arrow batch while parsing
    pub batch_size: usize,
}

impl Default for PopReaderConfig {
    fn default() -> Self {
        Self {
            country: "usa".to_string(),
            version: "US_2010.v5".to_string(),
            fred_data: None,
            fred_home: None,
            format: None,
            parallel: true,
            cache_locations: true,
            show_progress: false,
            batch_size: get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }
}

impl PopReaderConfig {
    /// Configuration for a country and version with every other setting at its default
    #[must_use]
    pub fn new(country: &str, version: &str) -> Self {
        Self {
            country: country.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    /// Set an explicit data root
    #[must_use]
    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.fred_data = Some(root.into());
        self
    }

    /// Force a schema version instead of detecting it
    #[must_use]
    pub const fn with_format(mut self, format: SchemaVersion) -> Self {
        self.format = Some(format);
        self
    }

    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "population configuration")?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
