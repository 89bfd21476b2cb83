//! Column layouts for the two on-disk population formats and the
//! adaptation rules used to reconcile them.

pub mod adapt;
pub mod current;
pub mod legacy;

use std::fmt;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use serde::Deserialize;

pub use adapt::{concat_tables, conform_batch, promote_types, unify_schemas};

/// On-disk format of a population directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Tab-delimited files with out-of-band column layouts (RTI, `US_2010.v4`)
    Legacy,
    /// Comma-separated files with header rows and linkage side tables (`US_2010.v5`)
    Current,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Nullable 64-bit integer
    Int64,
    /// 64-bit float
    Float64,
    /// UTF-8 text
    Utf8,
}

impl ColumnType {
    /// Arrow type this column is parsed into
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self {
            Self::Int64 => DataType::Int64,
            Self::Float64 => DataType::Float64,
            Self::Utf8 => DataType::Utf8,
        }
    }
}

/// A column declared as (name, position, type)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Output column name
    pub name: &'static str,
    /// Zero-based field position in the file
    pub position: usize,
    /// Declared type
    pub column_type: ColumnType,
}

impl ColumnSpec {
    /// Declare a column
    #[must_use]
    pub const fn new(name: &'static str, position: usize, column_type: ColumnType) -> Self {
        Self {
            name,
            position,
            column_type,
        }
    }

    /// Nullable Arrow field for this column
    #[must_use]
    pub fn field(&self) -> Field {
        Field::new(self.name, self.column_type.data_type(), true)
    }
}

/// Fixed layout of a headerless-by-name, position-addressed file
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    /// Declared columns, in output order
    pub columns: &'static [ColumnSpec],
    /// Token that marks a missing value, in addition to an empty field
    pub na_token: Option<&'static str>,
}

impl TableLayout {
    /// Arrow schema of the columns this layout produces
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        Arc::new(Schema::new(
            self.columns.iter().map(ColumnSpec::field).collect::<Vec<_>>(),
        ))
    }

    /// Number of fields a file needs for every declared position to exist
    #[must_use]
    pub fn min_width(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.position + 1)
            .max()
            .unwrap_or(0)
    }

    /// Declared positions in output order
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.position).collect()
    }
}

/// Build an all-nullable schema from `(name, type)` pairs
#[must_use]
pub fn nullable_schema(columns: &[(&str, ColumnType)]) -> SchemaRef {
    Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, ty)| Field::new(*name, ty.data_type(), true))
            .collect::<Vec<_>>(),
    ))
}
