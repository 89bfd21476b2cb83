//! Utility functions for error handling
//!
//! This module provides utility functions to attach path and purpose context
//! to file system failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PopReaderError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file, or `MissingFileError` when it does not exist
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(PopReaderError::MissingFileError {
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
        });
    }

    fs::File::open(path).map_err(|e| match e.kind() {
        // Deleted between the check and the open
        io::ErrorKind::NotFound => PopReaderError::MissingFileError {
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
        },
        _ => PopReaderError::IoError(io::Error::new(
            e.kind(),
            format!("Failed to open {} for {purpose}: {e}", path.display()),
        )),
    })
}

/// Check that a directory exists and is readable
///
/// A missing directory is reported as a `ConfigurationError` naming it,
/// since every directory validated here comes from configuration.
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(PopReaderError::ConfigurationError(format!(
            "{purpose} not found: {}",
            path.display()
        )));
    }

    if !path.is_dir() {
        return Err(PopReaderError::ConfigurationError(format!(
            "{purpose} is not a directory: {}",
            path.display()
        )));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => Err(PopReaderError::IoError(io::Error::new(
            e.kind(),
            format!("Failed to access {purpose} {}: {e}", path.display()),
        ))),
    }
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for: {purpose}"),
            };

            Err(PopReaderError::IoError(io::Error::new(
                e.kind(),
                format!("{context} ({})", path.display()),
            )))
        }
    }
}
