//! Utility functions shared by the loaders

pub mod arrow;
pub mod logging;

use std::path::Path;

use itertools::Itertools;

use crate::error::util::validate_directory;
use crate::error::{PopReaderError, Result};

pub use logging::{log_operation_complete, log_operation_start, log_warning};

/// Default batch size for CSV parsing
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("POP_READER_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

/// Names of the immediate subdirectories of `dir`, sorted
///
/// # Errors
/// Returns an error if the directory is missing or cannot be listed
pub fn list_subdirectories(dir: &Path) -> Result<Vec<String>> {
    validate_directory(dir, "population directory")?;

    let names = std::fs::read_dir(dir)?
        .map(|entry| {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            Ok((is_dir, entry.file_name()))
        })
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(PopReaderError::from)?
        .into_iter()
        .filter(|(is_dir, _)| *is_dir)
        .filter_map(|(_, name)| name.into_string().ok())
        .sorted()
        .collect_vec();

    Ok(names)
}
