//! Readers for delimited population files.
//!
//! Legacy files are tab-delimited with a single header line whose names are
//! ignored; columns are picked by declared position. Current files are
//! comma-separated with a header that names every column; key columns have
//! declared types and the rest are inferred.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::debug;
use regex::Regex;

use crate::error::util::safe_open_file;
use crate::error::{PopReaderError, Result};
use crate::schema::{ColumnType, TableLayout};
use crate::utils::DEFAULT_BATCH_SIZE;

/// Tokens the current CSV format treats as missing, besides the empty field
const CSV_NULL_TOKENS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Declared column types for a self-describing CSV file
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOptions<'a> {
    /// Types matched by header name
    pub by_name: &'a [(&'a str, ColumnType)],
    /// Types matched by field position; these win over `by_name`
    pub by_position: &'a [(usize, ColumnType)],
    /// Rows per parsed batch
    pub batch_size: usize,
}

impl<'a> CsvOptions<'a> {
    /// Options declaring types by header name
    #[must_use]
    pub fn named(by_name: &'a [(&'a str, ColumnType)], batch_size: usize) -> Self {
        Self {
            by_name,
            by_position: &[],
            batch_size,
        }
    }

    /// Options declaring types by field position
    #[must_use]
    pub fn positional(by_position: &'a [(usize, ColumnType)], batch_size: usize) -> Self {
        Self {
            by_name: &[],
            by_position,
            batch_size,
        }
    }
}

/// Regex matching an empty field or one of `tokens`
fn null_regex<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Regex> {
    let alternatives = tokens
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    let pattern = if alternatives.is_empty() {
        "^$".to_string()
    } else {
        format!("^(?:{alternatives})?$")
    };

    Regex::new(&pattern).map_err(|e| {
        PopReaderError::ConfigurationError(format!("invalid missing-value pattern {pattern}: {e}"))
    })
}

/// Map Arrow parse failures to schema errors tied to the file
fn parse_error(path: &Path, error: ArrowError) -> PopReaderError {
    match error {
        ArrowError::ParseError(msg) | ArrowError::CsvError(msg) => PopReaderError::schema(path, msg),
        ArrowError::IoError(msg, source) => PopReaderError::IoError(std::io::Error::new(
            source.kind(),
            format!("{msg} ({})", path.display()),
        )),
        other => PopReaderError::ArrowError(other),
    }
}

/// Read the first line of a file, without its line terminator
fn read_header_line(path: &Path, purpose: &str) -> Result<Option<String>> {
    let mut reader = BufReader::new(safe_open_file(path, purpose)?);
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Number of tab-separated fields on the header line of a legacy file
pub fn legacy_field_count(path: &Path, purpose: &str) -> Result<usize> {
    Ok(read_header_line(path, purpose)?.map_or(0, |header| header.split('\t').count()))
}

/// Collect every batch from a CSV reader into one table
fn collect_batches<I>(path: &Path, schema: SchemaRef, reader: I) -> Result<RecordBatch>
where
    I: Iterator<Item = std::result::Result<RecordBatch, ArrowError>>,
{
    let batches = reader
        .map(|batch| batch.map_err(|e| parse_error(path, e)))
        .collect::<Result<Vec<_>>>()?;

    Ok(arrow::compute::concat_batches(&schema, &batches)?)
}

/// Read a legacy tab-delimited file with a declared column layout
///
/// The header line is skipped; fields at undeclared positions are ignored.
/// Declared numeric columns must parse, except for empty fields and the
/// layout's missing-value token, which become nulls.
pub fn read_legacy_table(
    path: &Path,
    layout: &TableLayout,
    batch_size: usize,
    purpose: &str,
) -> Result<RecordBatch> {
    let width = legacy_field_count(path, purpose)?;
    if width == 0 {
        return Ok(RecordBatch::new_empty(layout.schema()));
    }

    if width < layout.min_width() {
        return Err(PopReaderError::schema(
            path,
            format!(
                "expected at least {} tab-separated fields, found {width}",
                layout.min_width()
            ),
        ));
    }

    // Full-width schema: declared columns at their positions, text elsewhere
    let fields = (0..width)
        .map(|position| {
            layout
                .columns
                .iter()
                .find(|c| c.position == position)
                .map_or_else(
                    || Field::new(format!("column_{position}"), DataType::Utf8, true),
                    |c| c.field(),
                )
        })
        .collect::<Vec<_>>();
    let file_schema = Arc::new(Schema::new(fields));

    let file = safe_open_file(path, purpose)?;
    let reader = ReaderBuilder::new(file_schema)
        .with_header(true)
        .with_delimiter(b'\t')
        .with_batch_size(batch_size.max(1))
        .with_null_regex(null_regex(layout.na_token)?)
        .with_projection(layout.positions())
        .build(file)
        .map_err(|e| parse_error(path, e))?;

    let table = collect_batches(path, layout.schema(), reader)?;
    debug!("Read {} rows from {}", table.num_rows(), path.display());
    Ok(table)
}

/// Infer the schema of a CSV file and apply declared types
fn csv_schema(path: &Path, options: &CsvOptions<'_>, purpose: &str) -> Result<SchemaRef> {
    let file = safe_open_file(path, purpose)?;
    let format = Format::default()
        .with_header(true)
        .with_delimiter(b',')
        .with_null_regex(null_regex(CSV_NULL_TOKENS.iter().copied())?);
    let (inferred, _) = format
        .infer_schema(file, None)
        .map_err(|e| parse_error(path, e))?;

    let fields = inferred
        .fields()
        .iter()
        .enumerate()
        .map(|(position, field)| {
            let declared = options
                .by_position
                .iter()
                .find(|(p, _)| *p == position)
                .map(|(_, ty)| *ty)
                .or_else(|| {
                    options
                        .by_name
                        .iter()
                        .find(|(name, _)| *name == field.name().as_str())
                        .map(|(_, ty)| *ty)
                });

            // A column with no values stays Null; concatenation settles its type
            let data_type =
                declared.map_or_else(|| field.data_type().clone(), ColumnType::data_type);
            Field::new(field.name(), data_type, true)
        })
        .collect::<Vec<_>>();

    Ok(Arc::new(Schema::new(fields)))
}

/// Read a comma-separated file with a header row
pub fn read_csv_table(path: &Path, options: &CsvOptions<'_>, purpose: &str) -> Result<RecordBatch> {
    let schema = csv_schema(path, options, purpose)?;
    if schema.fields().is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let batch_size = if options.batch_size == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        options.batch_size
    };

    let file = safe_open_file(path, purpose)?;
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_delimiter(b',')
        .with_batch_size(batch_size)
        .with_null_regex(null_regex(CSV_NULL_TOKENS.iter().copied())?)
        .build(file)
        .map_err(|e| parse_error(path, e))?;

    let table = collect_batches(path, schema, reader)?;
    debug!("Read {} rows from {}", table.num_rows(), path.display());
    Ok(table)
}

/// Count data records in a legacy file without parsing it
///
/// Counts non-blank lines and subtracts the header. Legacy files are
/// tab-delimited without quoting, so no field can contain a line break.
pub fn count_legacy_records(path: &Path, purpose: &str) -> Result<usize> {
    let mut reader = BufReader::new(safe_open_file(path, purpose)?);
    let mut lines = 0usize;
    let mut line_has_content = false;

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        for &byte in buf {
            match byte {
                b'\n' => {
                    if line_has_content {
                        lines += 1;
                    }
                    line_has_content = false;
                }
                b'\r' => {}
                _ => line_has_content = true,
            }
        }
        let consumed = buf.len();
        reader.consume(consumed);
    }
    if line_has_content {
        lines += 1;
    }

    Ok(lines.saturating_sub(1))
}

/// Count data records in a CSV file by parsing it
///
/// Quoted fields may span lines, so a line count is not a record count.
pub fn count_csv_records(path: &Path, purpose: &str) -> Result<usize> {
    // Only the header is parsed here, so quoted names containing commas count once
    let (header, _) = Format::default()
        .with_header(true)
        .with_delimiter(b',')
        .infer_schema(safe_open_file(path, purpose)?, Some(0))
        .map_err(|e| parse_error(path, e))?;
    if header.fields().is_empty() {
        return Ok(0);
    }

    // Every field as text: only record boundaries matter here
    let fields = (0..header.fields().len())
        .map(|i| Field::new(format!("column_{i}"), DataType::Utf8, true))
        .collect::<Vec<_>>();
    let schema = Arc::new(Schema::new(fields));

    let file = safe_open_file(path, purpose)?;
    let reader = ReaderBuilder::new(schema)
        .with_header(true)
        .with_delimiter(b',')
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .with_projection(vec![0])
        .build(file)
        .map_err(|e| parse_error(path, e))?;

    reader.into_iter().try_fold(0usize, |n, batch| {
        batch
            .map(|b| n + b.num_rows())
            .map_err(|e| parse_error(path, e))
    })
}
