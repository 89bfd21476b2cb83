//! Progress reporting for multi-directory loads, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Style for the per-directory progress bar
pub const DIRECTORY_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} directories {msg}";

/// Create a progress bar counting directories
///
/// Returns a hidden bar when `visible` is false so callers can tick it
/// unconditionally.
#[must_use]
pub fn create_directory_progress_bar(length: u64, description: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(length);
    if let Ok(style) = ProgressStyle::default_bar().template(DIRECTORY_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(description.to_string());
    pb
}

/// Finish a progress bar and clear it from display
pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
