//! Dataset root discovery
//!
//! Resolves `(country, version)` plus optional overrides to the absolute path
//! of a population directory:
//! `<data root>/country/<country>/<version>`.

use std::path::{Path, PathBuf};

use log::warn;

use super::PopReaderConfig;
use crate::error::util::validate_directory;
use crate::error::{PopReaderError, Result};

/// Environment variable naming the data root
pub const FRED_DATA_ENV: &str = "FRED_DATA";
/// Environment variable naming the home directory whose `data` folder is the fallback root
pub const FRED_HOME_ENV: &str = "FRED_HOME";

/// Find the data root from the config, then `FRED_DATA`, then `FRED_HOME/data`
fn data_root(config: &PopReaderConfig) -> Result<PathBuf> {
    if let Some(root) = &config.fred_data {
        return Ok(root.clone());
    }

    if let Some(root) = std::env::var_os(FRED_DATA_ENV) {
        return Ok(PathBuf::from(root));
    }
    warn!("{FRED_DATA_ENV} is not set");

    let home = config
        .fred_home
        .clone()
        .or_else(|| std::env::var_os(FRED_HOME_ENV).map(PathBuf::from));

    match home {
        Some(home) => Ok(home.join("data")),
        None => {
            warn!("{FRED_HOME_ENV} is not set");
            Err(PopReaderError::ConfigurationError(format!(
                "no data root: set {FRED_DATA_ENV} or {FRED_HOME_ENV}, or pass one explicitly"
            )))
        }
    }
}

/// Return the absolute path to the requested population directory
///
/// # Errors
/// Returns a `ConfigurationError` naming the data root, country or version
/// directory that does not exist.
pub fn resolve_population_path(config: &PopReaderConfig) -> Result<PathBuf> {
    let root = data_root(config)?;
    validate_directory(&root, "data root")?;

    let country_dir = root.join("country").join(&config.country);
    validate_directory(&country_dir, &format!("country={}", config.country))?;

    let pop_dir = country_dir.join(&config.version);
    validate_directory(&pop_dir, &format!("version={}", config.version))?;

    absolute(&pop_dir)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.canonicalize()?)
}
