//! Logging helpers for multi-directory loads
//!
//! Keeps the start and finish lines of every entity load in one format so a
//! log of several loads reads as a table.

use std::path::Path;
use std::time::Duration;

/// Log the start of an entity load over `directories` county directories
pub fn log_operation_start(entity: &str, directories: usize, population_dir: &Path) {
    log::info!(
        "Loading {entity} from {directories} county directories of {}",
        population_dir.display()
    );
}

/// Log the end of an entity load
///
/// # Arguments
/// * `entity` - Entity kind, e.g. `households`
/// * `population_dir` - Population directory the rows came from
/// * `rows` - Rows in the assembled table
/// * `elapsed` - Time spent, if measured
pub fn log_operation_complete(
    entity: &str,
    population_dir: &Path,
    rows: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(elapsed) => log::info!(
            "Loaded {rows} {entity} rows from {} in {elapsed:?}",
            population_dir.display()
        ),
        None => log::info!("Loaded {rows} {entity} rows from {}", population_dir.display()),
    }
}

/// Log a warning, optionally tied to a file or directory
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
