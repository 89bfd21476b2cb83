//! Arrow data handling utilities
//!
//! Helpers for reshaping record batches, de-duplicating rows and joining
//! linkage tables onto entity tables.

pub mod batch_ops;
pub mod join;

// Re-export commonly used functions for convenience
pub use batch_ops::{
    column_index, drop_duplicates, project_columns, rename_columns, with_constant_column,
};
pub use join::left_join;
