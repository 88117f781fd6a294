//! In-memory column-oriented table with a tagged schema
//!
//! Every column carries one declared semantic type, so pipeline stages
//! select numeric vs categorical columns by schema rather than by
//! inspecting values.

use crate::{HoopsError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Raw, unparsed text
    Text,
    /// Calendar date
    Date,
    /// Floating-point number
    Float,
    /// Categorical string
    Category,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Date => write!(f, "date"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Category => write!(f, "category"),
        }
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Date(NaiveDate),
    Float(f64),
    Category(String),
    Missing,
}

impl Value {
    /// Numeric view of the value, if it has one
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Textual view for raw and categorical values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Category(s) => Some(s),
            _ => None,
        }
    }

    /// Date view of the value, if it has one
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Label used when the value participates in one-hot encoding
    pub fn category_label(&self) -> Option<String> {
        match self {
            Value::Text(s) | Value::Category(s) => Some(s.clone()),
            Value::Date(d) => Some(d.to_string()),
            Value::Float(_) | Value::Missing => None,
        }
    }

    /// Canonical key for distinct-value counting
    fn distinct_key(&self) -> String {
        match self {
            Value::Text(s) => format!("t:{}", s),
            Value::Category(s) => format!("c:{}", s),
            Value::Date(d) => format!("d:{}", d),
            Value::Float(x) => format!("f:{}", x.to_bits()),
            Value::Missing => "_".to_string(),
        }
    }
}

/// A named, typed sequence of values aligned by row index
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            ty,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct values in the column (missing counts as one value)
    pub fn distinct_count(&self) -> usize {
        let keys: HashSet<String> = self.values.iter().map(Value::distinct_key).collect();
        keys.len()
    }

    /// Numeric view of the whole column; non-numeric cells become NaN
    pub fn float_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| v.as_float().unwrap_or(f64::NAN))
            .collect()
    }
}

/// An ordered collection of row-aligned columns
///
/// Column order is load order and is preserved by every stage; it drives
/// the correlation-pair enumeration order and the output column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    /// Build a table from columns, checking that all are row-aligned
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let n = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != n) {
                return Err(HoopsError::Schema(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.len(),
                    n
                )));
            }
        }
        Ok(Table { columns })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column, failing with a schema error when it is absent
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| HoopsError::Schema(format!("expected column '{}' is absent", name)))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Append a column; it must match the current row count
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(HoopsError::Schema(format!(
                "column '{}' has {} rows, expected {}",
                column.name,
                column.len(),
                self.n_rows()
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column by name; absent names are ignored
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
    }

    /// Keep only the columns the predicate accepts, preserving order
    pub fn retain_columns<F: FnMut(&Column) -> bool>(&mut self, f: F) {
        self.columns.retain(f);
    }
}

/// Final model-ready output: ordered named numeric columns,
/// row-aligned with the target vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<(String, Vec<f64>)>,
}

impl FeatureMatrix {
    pub fn new() -> Self {
        FeatureMatrix::default()
    }

    pub fn push(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.push((name.into(), values));
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, v)| v.len())
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// One row of the matrix, in column order
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.columns.iter().map(|(_, v)| v[i]).collect()
    }
}
