//! A Rust library for reading synthetic population datasets by location,
//! with cross-reference joins over two on-disk formats.

pub mod config;
pub mod error;
pub mod location;
pub mod population;
pub mod reader;
pub mod schema;
pub mod utils;
pub mod xref;

// Re-export the most common types for easier use
// Core types
pub use config::{PopReaderConfig, resolve_population_path};
pub use error::{PopReaderError, Result};
pub use location::{CountyFips, IntoFipsCodes, LocationMap};
pub use population::{
    CurrentPopulation, LegacyPopulation, SyntheticPopulation, population_from_config,
    population_from_path,
};
pub use schema::SchemaVersion;

// Arrow types
pub use arrow::datatypes::SchemaRef;
pub use arrow::record_batch::RecordBatch;

// Utility functions
pub use utils::DEFAULT_BATCH_SIZE;
