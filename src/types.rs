//! Core data model types.
//!
//! A loaded CSV becomes an in-memory [`DataSet`], shaped by a [`Schema`] (a list of typed
//! [`Field`]s). Every field is classified once as [`ColumnKind::Numeric`] or
//! [`ColumnKind::Categorical`] from its [`DataType`].

use serde::{Serialize, Serializer};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// Classification used by summaries and the missing-value resolver.
    pub fn kind(self) -> ColumnKind {
        match self {
            DataType::Int64 | DataType::Float64 => ColumnKind::Numeric,
            DataType::Bool | DataType::Utf8 => ColumnKind::Categorical,
        }
    }
}

/// Numeric columns get statistics; everything else is categorical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
    /// Classification fixed when the field is created.
    pub kind: ColumnKind,
}

impl Field {
    /// Create a new field. The [`ColumnKind`] is derived from `data_type`.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            kind: data_type.kind(),
        }
    }

    /// Whether this field was classified as numeric.
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

/// Ordered list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

    /// Names of numeric columns, in declared order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Numeric)
    }

    /// Names of categorical columns, in declared order.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Categorical)
    }

    fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| f.name.clone())
            .collect()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float. NaN counts as missing.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// `Null` and NaN floats are missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value; `None` for missing and non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) if v.is_nan() => f.write_str("NaN"),
            Value::Float64(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.1}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(v) if v.is_nan() => serializer.serialize_none(),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Each row
/// carries a label in `index`; labels start as `0..n` and are kept when rows are removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// One label per row.
    pub index: Vec<usize>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows, labelled `0..rows.len()`.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        let index = (0..rows.len()).collect();
        Self {
            schema,
            index,
            rows,
        }
    }

    /// Create a dataset with explicit row labels.
    ///
    /// # Panics
    ///
    /// Panics if `index` and `rows` differ in length.
    pub fn with_index(schema: Schema, index: Vec<usize>, rows: Vec<Vec<Value>>) -> Self {
        assert!(
            index.len() == rows.len(),
            "index length {} does not match row count {}",
            index.len(),
            rows.len()
        );
        Self {
            schema,
            index,
            rows,
        }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the schema.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Cells of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Total number of missing cells across all columns.
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| v.is_missing())
            .count()
    }

    /// Relabel rows `0..n`.
    pub fn reset_index(&self) -> Self {
        Self::new(self.schema.clone(), self.rows.clone())
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let end = n.min(self.row_count());
        self.slice(0, end)
    }

    /// Last `n` rows.
    pub fn tail(&self, n: usize) -> Self {
        let start = self.row_count().saturating_sub(n);
        self.slice(start, self.row_count())
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            index: self.index[start..end].to_vec(),
            rows: self.rows[start..end].to_vec(),
        }
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema and row labels.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let (index, rows) = self
            .index
            .iter()
            .zip(self.rows.iter())
            .filter(|(_, row)| predicate(row.as_slice()))
            .map(|(label, row)| (*label, row.clone()))
            .unzip();
        Self {
            schema: self.schema.clone(),
            index,
            rows,
        }
    }

    /// Reduce (fold) all rows into an accumulator value.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }
}
