//! Column-level reshaping and row de-duplication for record batches.

use std::iter::repeat_n;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, StringArray};
use arrow::compute::filter_record_batch;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::row::{RowConverter, SortField};
use rustc_hash::FxHashSet;

use crate::error::{PopReaderError, Result};

/// Find a column index by name, reporting the file the batch came from
pub fn column_index(batch: &RecordBatch, name: &str, source: &Path) -> Result<usize> {
    batch.schema().index_of(name).map_err(|_| {
        let available = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect::<Vec<_>>()
            .join(", ");
        PopReaderError::schema(
            source,
            format!("column '{name}' not found (available: {available})"),
        )
    })
}

/// Rename the columns at the given positions
pub fn rename_columns(
    batch: &RecordBatch,
    renames: &[(usize, &str)],
    source: &Path,
) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();

    for (position, name) in renames {
        let field = fields.get_mut(*position).ok_or_else(|| {
            PopReaderError::schema(
                source,
                format!(
                    "expected a column at position {position}, found {} columns",
                    schema.fields().len()
                ),
            )
        })?;
        *field = field.clone().with_name(*name);
    }

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        batch.columns().to_vec(),
    )?)
}

/// Keep only the named columns, in the given order
pub fn project_columns(batch: &RecordBatch, names: &[&str], source: &Path) -> Result<RecordBatch> {
    let indices = names
        .iter()
        .map(|name| column_index(batch, name, source))
        .collect::<Result<Vec<_>>>()?;
    Ok(batch.project(&indices)?)
}

/// Append a text column holding the same value on every row
pub fn with_constant_column(batch: &RecordBatch, name: &str, value: &str) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    fields.push(Field::new(name, arrow::datatypes::DataType::Utf8, true));

    let mut columns = batch.columns().to_vec();
    columns.push(Arc::new(StringArray::from_iter_values(repeat_n(
        value,
        batch.num_rows(),
    ))) as ArrayRef);

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Drop rows that are exact duplicates of an earlier row
///
/// Nulls compare equal to nulls; the first occurrence of each row is kept
/// and row order is otherwise preserved.
pub fn drop_duplicates(batch: &RecordBatch) -> Result<RecordBatch> {
    if batch.num_rows() < 2 || batch.num_columns() == 0 {
        return Ok(batch.clone());
    }

    let converter = RowConverter::new(
        batch
            .schema()
            .fields()
            .iter()
            .map(|f| SortField::new(f.data_type().clone()))
            .collect(),
    )?;
    let rows = converter.convert_columns(batch.columns())?;

    let mut seen = FxHashSet::default();
    seen.reserve(rows.num_rows());
    let keep = (0..rows.num_rows())
        .map(|i| seen.insert(rows.row(i)))
        .collect::<Vec<bool>>();

    Ok(filter_record_batch(batch, &BooleanArray::from(keep))?)
}
