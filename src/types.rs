//! Column-oriented numeric tables.
//!
//! A [`DataSet`] is a [`Schema`] plus one [`Column`] per field. Missing float values are stored as
//! [`crate::na::NA_REAL`]; integer columns have no missing-value representation.

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit float, NA allowed.
    Float64,
    /// 32-bit signed integer, no NA.
    Int32,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the expected columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Typed storage for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Float64(Vec<f64>),
    Int32(Vec<i32>),
}

impl ColumnValues {
    /// Empty storage for `data_type`.
    pub fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::Float64 => Self::Float64(Vec::new()),
            DataType::Int32 => Self::Int32(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Float64(v) => v.len(),
            Self::Int32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::Float64(_) => DataType::Float64,
            Self::Int32(_) => DataType::Int32,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn float64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Float64(values),
        }
    }

    pub fn int32(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Int32(values),
        }
    }

    /// Float values, `None` for an integer column.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Float64(v) => Some(v),
            ColumnValues::Int32(_) => None,
        }
    }

    /// Integer values, `None` for a float column.
    pub fn as_i32(&self) -> Option<&[i32]> {
        match &self.values {
            ColumnValues::Int32(v) => Some(v),
            ColumnValues::Float64(_) => None,
        }
    }
}

/// In-memory numeric table.
///
/// Columns are stored in the same order as the [`Schema`] fields and all have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing the columns.
    pub schema: Schema,
    /// Column-major value storage.
    pub columns: Vec<Column>,
}

impl DataSet {
    /// Create a dataset from columns; the schema is derived from their names and types.
    ///
    /// # Panics
    ///
    /// Panics if the columns do not all have the same length.
    pub fn new(columns: Vec<Column>) -> Self {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for c in &columns {
                assert!(
                    c.values.len() == expected,
                    "column '{}' has length {} but expected {}",
                    c.name,
                    c.values.len(),
                    expected
                );
            }
        }
        let schema = Schema::new(
            columns
                .iter()
                .map(|c| Field::new(c.name.clone(), c.values.data_type()))
                .collect(),
        );
        Self { schema, columns }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Column by position.
    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    /// Column by name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.schema.index_of(name).and_then(|idx| self.columns.get(idx))
    }

    /// Float values of the named column.
    pub fn float_column(&self, name: &str) -> KernelResult<&[f64]> {
        let col = self
            .column_by_name(name)
            .ok_or_else(|| KernelError::UnknownColumn {
                name: name.to_string(),
            })?;
        col.as_f64().ok_or_else(|| KernelError::TypeMismatch {
            column: name.to_string(),
            expected: DataType::Float64,
        })
    }

    /// Integer values of the named column.
    pub fn int_column(&self, name: &str) -> KernelResult<&[i32]> {
        let col = self
            .column_by_name(name)
            .ok_or_else(|| KernelError::UnknownColumn {
                name: name.to_string(),
            })?;
        col.as_i32().ok_or_else(|| KernelError::TypeMismatch {
            column: name.to_string(),
            expected: DataType::Int32,
        })
    }

    /// Iterate `(name, values)` for every float column, in schema order.
    pub fn float_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .filter_map(|c| c.as_f64().map(|v| (c.name.as_str(), v)))
    }
}
