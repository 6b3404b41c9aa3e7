//! Typed column storage.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Homogeneous, nullable values of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnValues {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    /// Number of values (including nulls).
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing values.
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_null(row)).count()
    }

    /// Whether the value at `row` is missing. Out-of-range rows count as missing.
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            ColumnValues::Integer(v) => v.get(row).is_none_or(|x| x.is_none()),
            // NaN produced by upstream arithmetic is treated as missing too
            ColumnValues::Float(v) => v.get(row).is_none_or(|x| x.is_none_or(f64::is_nan)),
            ColumnValues::Boolean(v) => v.get(row).is_none_or(|x| x.is_none()),
            ColumnValues::Text(v) => v.get(row).is_none_or(|x| x.is_none()),
        }
    }

    /// Numeric value at `row`, if the column is numeric and the value present.
    pub fn numeric(&self, row: usize) -> Option<f64> {
        match self {
            ColumnValues::Integer(v) => v.get(row).copied().flatten().map(|x| x as f64),
            ColumnValues::Float(v) => v.get(row).copied().flatten().filter(|x| !x.is_nan()),
            _ => None,
        }
    }

    /// Value at `row` rendered as a label, for grouping and category counts.
    pub fn label(&self, row: usize) -> Option<String> {
        if self.is_null(row) {
            return None;
        }
        match self {
            ColumnValues::Integer(v) => v[row].map(|x| x.to_string()),
            ColumnValues::Float(v) => v[row].map(format_float),
            ColumnValues::Boolean(v) => v[row].map(|x| x.to_string()),
            ColumnValues::Text(v) => v[row].clone(),
        }
    }

    /// Value at `row` for tabular display; missing values render as `NaN`.
    pub fn display(&self, row: usize) -> String {
        self.label(row).unwrap_or_else(|| "NaN".to_string())
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// A named, typed column of a [`Dataset`](super::Dataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    values: ColumnValues,
}

impl Column {
    /// Create a column whose type follows its storage.
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        let column_type = match &values {
            ColumnValues::Integer(_) => ColumnType::Integer,
            ColumnValues::Float(_) => ColumnType::Float,
            ColumnValues::Boolean(_) => ColumnType::Boolean,
            ColumnValues::Text(_) => ColumnType::Text,
        };
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Create a text column tagged as holding dates or datetimes.
    pub fn temporal(
        name: impl Into<String>,
        values: Vec<Option<String>>,
        column_type: ColumnType,
    ) -> Self {
        let column_type = if column_type.is_temporal() {
            column_type
        } else {
            ColumnType::Text
        };
        Self {
            name: name.into(),
            column_type,
            values: ColumnValues::Text(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing values.
    pub fn null_count(&self) -> usize {
        self.values.null_count()
    }

    /// Number of present values.
    pub fn non_null_count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// All present numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|row| self.values.numeric(row)).collect()
    }
}
