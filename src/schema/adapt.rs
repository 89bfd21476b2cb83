//! Schema reconciliation between tables read from different directories.
//!
//! Tables of the same entity kind can disagree on inferred column types
//! (a column that is empty in one county and numeric in another) or on the
//! column set itself (legacy people plus group-quarters people). They are
//! brought to one unified schema before concatenation.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, new_null_array};
use arrow::compute::kernels::cast::{CastOptions, cast_with_options};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::debug;

use super::ColumnType;
use crate::error::{PopReaderError, Result};

/// Identifies whether a data type is an integer type
const fn is_integer(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Identifies whether a data type is numeric
const fn is_numeric(data_type: &DataType) -> bool {
    is_integer(data_type)
        || matches!(
            data_type,
            DataType::Float16 | DataType::Float32 | DataType::Float64
        )
}

/// The narrowest type both inputs convert to without losing values
///
/// Null yields to anything, integers widen to `Int64`, mixed numerics to
/// `Float64`, and everything else falls back to `Utf8`.
#[must_use]
pub fn promote_types(a: &DataType, b: &DataType) -> DataType {
    if a == b {
        return a.clone();
    }

    match (a, b) {
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        (x, y) if is_integer(x) && is_integer(y) => DataType::Int64,
        (x, y) if is_numeric(x) && is_numeric(y) => DataType::Float64,
        _ => DataType::Utf8,
    }
}

/// Union of the schemas by column name, in order of first appearance
///
/// Every field of the result is nullable since a column absent from one
/// input is null-filled for that input's rows.
#[must_use]
pub fn unify_schemas<'a>(schemas: impl IntoIterator<Item = &'a SchemaRef>) -> SchemaRef {
    let mut fields: Vec<(String, DataType)> = Vec::new();

    for schema in schemas {
        for field in schema.fields() {
            match fields.iter_mut().find(|(name, _)| name == field.name()) {
                Some((_, data_type)) => {
                    *data_type = promote_types(data_type, field.data_type());
                }
                None => fields.push((field.name().clone(), field.data_type().clone())),
            }
        }
    }

    Arc::new(Schema::new(
        fields
            .into_iter()
            .map(|(name, data_type)| Field::new(name, data_type, true))
            .collect::<Vec<_>>(),
    ))
}

/// Cast without silently turning unparseable values into nulls
fn strict_cast(
    column: &ArrayRef,
    to: &DataType,
    column_name: &str,
    source: &Path,
) -> Result<ArrayRef> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(column, to, &options).map_err(|e| {
        PopReaderError::schema(
            source,
            format!(
                "column '{column_name}' cannot be converted from {} to {to}: {e}",
                column.data_type()
            ),
        )
    })
}

/// Reshape a batch to `target`: cast columns whose type differs and null-fill
/// columns the batch does not have
///
/// Columns of the batch that `target` does not name are dropped.
pub fn conform_batch(batch: &RecordBatch, target: &SchemaRef, source: &Path) -> Result<RecordBatch> {
    if batch.schema().as_ref() == target.as_ref() {
        return Ok(batch.clone());
    }

    let columns = target
        .fields()
        .iter()
        .map(|field| match batch.column_by_name(field.name()) {
            Some(column) if column.data_type() == field.data_type() => Ok(column.clone()),
            Some(column) => strict_cast(column, field.data_type(), field.name(), source),
            None => Ok(new_null_array(field.data_type(), batch.num_rows())),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordBatch::try_new(target.clone(), columns)?)
}

/// Keep the named columns in the given order; a missing column is null-filled
/// with its declared type while present columns keep the type they were read with
pub fn select_columns(batch: &RecordBatch, columns: &[(&str, ColumnType)]) -> Result<RecordBatch> {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns
        .iter()
        .map(|(name, column_type)| match batch.column_by_name(name) {
            Some(column) => (
                Field::new(*name, column.data_type().clone(), true),
                column.clone(),
            ),
            None => {
                let data_type = column_type.data_type();
                (
                    Field::new(*name, data_type.clone(), true),
                    new_null_array(&data_type, batch.num_rows()),
                )
            }
        })
        .unzip();

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Give every column still typed `Null` after unification a concrete type:
/// the one `declared` names for it, otherwise `Utf8`
fn settle_null_columns(unified: &SchemaRef, declared: &SchemaRef) -> SchemaRef {
    if !unified.fields().iter().any(|f| f.data_type() == &DataType::Null) {
        return unified.clone();
    }

    let fields = unified
        .fields()
        .iter()
        .map(|field| {
            if field.data_type() != &DataType::Null {
                return field.as_ref().clone();
            }
            let data_type = declared
                .field_with_name(field.name())
                .ok()
                .map(|f| f.data_type().clone())
                .filter(|t| t != &DataType::Null)
                .unwrap_or(DataType::Utf8);
            debug!("Column '{}' has no values; typed as {data_type}", field.name());
            Field::new(field.name(), data_type, true)
        })
        .collect::<Vec<_>>();
    Arc::new(Schema::new(fields))
}

/// Concatenate tables of one entity kind into a single table
///
/// The schemas are unified first, so a column without values in one table
/// takes the type it has in the others. A column without values in every
/// table takes its type from `empty_schema`, or `Utf8` when that does not
/// name it. `empty_schema` is also the result when there are no tables at all.
pub fn concat_tables(
    tables: &[RecordBatch],
    empty_schema: &SchemaRef,
    source: &Path,
) -> Result<RecordBatch> {
    let non_trivial: Vec<&RecordBatch> = tables
        .iter()
        .filter(|t| t.num_columns() > 0)
        .collect();

    if non_trivial.is_empty() {
        return Ok(RecordBatch::new_empty(empty_schema.clone()));
    }

    let schemas: Vec<SchemaRef> = non_trivial.iter().map(|t| t.schema()).collect();
    let unified = settle_null_columns(&unify_schemas(&schemas), empty_schema);

    let conformed = non_trivial
        .iter()
        .map(|t| conform_batch(t, &unified, source))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Concatenating {} tables into {} columns",
        conformed.len(),
        unified.fields().len()
    );
    Ok(concat_batches(&unified, &conformed)?)
}
