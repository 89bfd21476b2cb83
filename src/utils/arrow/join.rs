//! Hash left join between two record batches.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::compute::kernels::cast::{CastOptions, cast_with_options};
use arrow::compute::{concat, take};
use arrow::datatypes::{FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use arrow::row::{RowConverter, SortField};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::batch_ops::column_index;
use crate::error::{PopReaderError, Result};

/// Left join `right` onto `left` where `left[left_key] == right[right_key]`
///
/// Output columns are every column of `left` followed by every column of
/// `right` except `right_key`. Left rows without a match keep nulls in the
/// right-hand columns; a left row matching several right rows is repeated
/// once per match. Null keys never match.
pub fn left_join(
    left: &RecordBatch,
    left_key: &str,
    right: &RecordBatch,
    right_key: &str,
    source: &Path,
) -> Result<RecordBatch> {
    let left_schema = left.schema();
    let right_schema = right.schema();

    let right_key_idx = column_index(right, right_key, source)?;
    for (idx, field) in right_schema.fields().iter().enumerate() {
        if idx != right_key_idx && left_schema.column_with_name(field.name()).is_some() {
            return Err(PopReaderError::schema(
                source,
                format!("column '{}' exists on both sides of the join", field.name()),
            ));
        }
    }

    let left_keys = left.column(column_index(left, left_key, source)?);
    let right_keys = right.column(right_key_idx);

    // Keys must share a type to hash identically
    let right_keys: ArrayRef = if right_keys.data_type() == left_keys.data_type() {
        right_keys.clone()
    } else {
        let options = CastOptions {
            safe: false,
            ..Default::default()
        };
        cast_with_options(right_keys, left_keys.data_type(), &options).map_err(|e| {
            PopReaderError::schema(
                source,
                format!(
                    "join key '{right_key}' ({}) does not convert to '{left_key}' ({}): {e}",
                    right_keys.data_type(),
                    left_keys.data_type()
                ),
            )
        })?
    };

    // One row encoding for both sides: right rows first, then left rows
    let n_right = right_keys.len();
    let all_keys = concat(&[right_keys.as_ref(), left_keys.as_ref()])?;
    let converter = RowConverter::new(vec![SortField::new(left_keys.data_type().clone())])?;
    let rows = converter.convert_columns(&[all_keys])?;

    let mut index: FxHashMap<_, SmallVec<[u32; 1]>> = FxHashMap::default();
    index.reserve(n_right);
    for j in (0..n_right).filter(|&j| right_keys.is_valid(j)) {
        index.entry(rows.row(j)).or_default().push(j as u32);
    }

    let mut left_indices: Vec<u32> = Vec::with_capacity(left.num_rows());
    let mut right_indices: Vec<Option<u32>> = Vec::with_capacity(left.num_rows());
    for i in 0..left.num_rows() {
        let matches = if left_keys.is_valid(i) {
            index.get(&rows.row(n_right + i))
        } else {
            None
        };
        match matches {
            Some(matches) => {
                for &j in matches {
                    left_indices.push(i as u32);
                    right_indices.push(Some(j));
                }
            }
            None => {
                left_indices.push(i as u32);
                right_indices.push(None);
            }
        }
    }
    let left_indices = UInt32Array::from(left_indices);
    let right_indices = UInt32Array::from(right_indices);

    let mut fields: Vec<FieldRef> = left_schema.fields().iter().cloned().collect();
    let mut columns = left
        .columns()
        .iter()
        .map(|c| take(c.as_ref(), &left_indices, None))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (idx, (field, column)) in right_schema.fields().iter().zip(right.columns()).enumerate() {
        if idx == right_key_idx {
            continue;
        }
        fields.push(Arc::new(field.as_ref().clone().with_nullable(true)));
        columns.push(take(column.as_ref(), &right_indices, None)?);
    }

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        columns,
    )?)
}
