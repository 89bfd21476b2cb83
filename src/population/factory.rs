//! Factory functions for opening a synthetic population
//!
//! The on-disk format is taken from the configuration when it names one and
//! detected from the population directory otherwise.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

use super::loader::LoadOptions;
use super::{CurrentPopulation, LegacyPopulation, SyntheticPopulation};
use crate::config::{PopReaderConfig, resolve_population_path};
use crate::error::Result;
use crate::error::util::validate_directory;
use crate::schema::SchemaVersion;
use crate::schema::current::METADATA_DIR;

/// Guess the format of a population directory
///
/// Only the current format keeps a `metadata/` directory next to the county
/// directories.
#[must_use]
pub fn detect_schema_version(population_dir: &Path) -> SchemaVersion {
    if population_dir.join(METADATA_DIR).is_dir() {
        SchemaVersion::Current
    } else {
        SchemaVersion::Legacy
    }
}

/// Open the population directory at `path` in the given format
pub fn population_from_path(
    path: PathBuf,
    version: SchemaVersion,
    config: &PopReaderConfig,
) -> Result<Arc<dyn SyntheticPopulation>> {
    validate_directory(&path, "population directory")?;
    let options = LoadOptions::from(config);

    let population: Arc<dyn SyntheticPopulation> = match version {
        SchemaVersion::Legacy => {
            Arc::new(LegacyPopulation::new(path, options, config.cache_locations))
        }
        SchemaVersion::Current => {
            Arc::new(CurrentPopulation::new(path, options, config.cache_locations))
        }
    };

    info!(
        "Opened {} population at {}",
        population.version(),
        population.root().display()
    );
    Ok(population)
}

/// Resolve the population directory named by `config` and open it
pub fn population_from_config(config: &PopReaderConfig) -> Result<Arc<dyn SyntheticPopulation>> {
    let path = resolve_population_path(config)?;
    let version = config
        .format
        .unwrap_or_else(|| detect_schema_version(&path));
    population_from_path(path, version, config)
}
