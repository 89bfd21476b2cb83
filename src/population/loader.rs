//! Per-directory read driver shared by both population formats

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use crate::config::PopReaderConfig;
use crate::error::Result;
use crate::schema::concat_tables;
use crate::utils::logging::{create_directory_progress_bar, finish_and_clear};
use crate::utils::{DEFAULT_BATCH_SIZE, log_operation_complete, log_operation_start};

/// How per-directory reads are carried out
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Read directories on the rayon pool
    pub parallel: bool,
    /// Draw a progress bar over directories
    pub show_progress: bool,
    /// Rows per parsed batch
    pub batch_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            show_progress: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl From<&PopReaderConfig> for LoadOptions {
    fn from(config: &PopReaderConfig) -> Self {
        Self {
            parallel: config.parallel,
            show_progress: config.show_progress,
            batch_size: config.batch_size,
        }
    }
}

/// Apply `read` to every directory, keeping the results in directory order
///
/// The first error aborts the whole call.
pub fn for_each_directory<T, F>(
    dirs: &[PathBuf],
    description: &str,
    options: &LoadOptions,
    read: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
{
    let pb = create_directory_progress_bar(dirs.len() as u64, description, options.show_progress);

    let read_one = |dir: &PathBuf| {
        let result = read(dir.as_path());
        pb.inc(1);
        result
    };

    let results = if options.parallel && dirs.len() > 1 {
        dirs.par_iter().map(read_one).collect::<Result<Vec<_>>>()
    } else {
        dirs.iter().map(read_one).collect::<Result<Vec<_>>>()
    };

    finish_and_clear(&pb);
    results
}

/// Read one table per directory and concatenate them
///
/// `empty_schema` is the shape returned when `dirs` is empty.
pub fn load_table<F>(
    population_dir: &Path,
    dirs: &[PathBuf],
    entity: &str,
    empty_schema: &SchemaRef,
    options: &LoadOptions,
    read: F,
) -> Result<RecordBatch>
where
    F: Fn(&Path) -> Result<RecordBatch> + Sync,
{
    let start = Instant::now();
    log_operation_start(entity, dirs.len(), population_dir);

    let tables = for_each_directory(dirs, entity, options, read)?;
    let table = concat_tables(&tables, empty_schema, population_dir)?;

    log_operation_complete(
        entity,
        population_dir,
        table.num_rows(),
        Some(start.elapsed()),
    );
    Ok(table)
}

/// Sum a per-directory record count
pub fn count_records<F>(
    dirs: &[PathBuf],
    entity: &str,
    options: &LoadOptions,
    count: F,
) -> Result<usize>
where
    F: Fn(&Path) -> Result<usize> + Sync,
{
    let counts = for_each_directory(dirs, entity, options, count)?;
    Ok(counts.into_iter().sum())
}
