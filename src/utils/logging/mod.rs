//! Log lines and progress bars for directory-by-directory loads

pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_directory_progress_bar, finish_and_clear};
