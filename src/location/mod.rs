//! Locations index access
//!
//! The index is parsed lazily on first use and, when caching is enabled,
//! kept until [`LocationCatalog::invalidate`] is called.

pub mod fips;
pub mod registry;
pub mod resolver;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::debug;

use crate::error::{PopReaderError, Result};

pub use fips::{CountyFips, IntoFipsCodes};
pub use registry::{LocationMap, LocationRegistry};
pub use resolver::locations_to_dirs;

/// Cached handle on the locations index of one population directory
#[derive(Debug)]
pub struct LocationCatalog {
    /// Locations index file
    index_path: PathBuf,
    /// Directory holding the per-county subdirectories
    population_dir: PathBuf,
    /// Keep the parsed index between calls
    cache_enabled: bool,
    /// Parsed index, if cached
    cached: RwLock<Option<Arc<LocationRegistry>>>,
}

impl LocationCatalog {
    /// Create a catalog; nothing is read until the first lookup
    #[must_use]
    pub fn new(index_path: PathBuf, population_dir: PathBuf, cache_enabled: bool) -> Self {
        Self {
            index_path,
            population_dir,
            cache_enabled,
            cached: RwLock::new(None),
        }
    }

    /// Path of the locations index
    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// The parsed index, reading it if it is not cached
    pub fn registry(&self) -> Result<Arc<LocationRegistry>> {
        {
            let cached = self.cached.read().map_err(|_| {
                PopReaderError::InvalidOperation(
                    "Failed to acquire read lock on locations cache".to_string(),
                )
            })?;
            if let Some(registry) = cached.as_ref() {
                return Ok(Arc::clone(registry));
            }
        }

        let registry = Arc::new(LocationRegistry::from_file(
            &self.index_path,
            &self.population_dir,
        )?);

        if self.cache_enabled {
            let mut cached = self.cached.write().map_err(|_| {
                PopReaderError::InvalidOperation(
                    "Failed to acquire write lock on locations cache".to_string(),
                )
            })?;
            *cached = Some(Arc::clone(&registry));
        }

        Ok(registry)
    }

    /// Drop the cached index so the next lookup reads it from disk again
    pub fn invalidate(&self) {
        match self.cached.write() {
            Ok(mut cached) => *cached = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        debug!("Locations cache for {} cleared", self.index_path.display());
    }
}
