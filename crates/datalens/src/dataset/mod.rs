//! Typed, column-oriented datasets built from parsed tables.

mod column;
mod infer;
mod types;

pub use column::{Column, ColumnValues};
pub use infer::infer_type;
pub use types::ColumnType;

use serde::{Deserialize, Serialize};

use crate::error::{DatalensError, Result};
use crate::input::DataTable;

/// An ordered collection of equally long, named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

/// The first rows of a dataset, rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows (first N rows).
    pub rows: Vec<Vec<String>>,
    /// Total row count in the dataset.
    pub total_rows: usize,
    /// Whether rows were left out.
    pub truncated: bool,
}

impl Dataset {
    /// Assemble a dataset, checking that column names are unique and that
    /// all columns have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        for (index, column) in columns.iter().enumerate() {
            if column.len() != row_count {
                return Err(DatalensError::Schema(format!(
                    "column '{}' has {} values, expected {}",
                    column.name(),
                    column.len(),
                    row_count
                )));
            }
            if columns[..index].iter().any(|c| c.name() == column.name()) {
                return Err(DatalensError::Schema(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Infer column types from a parsed table.
    pub fn from_table(table: &DataTable) -> Result<Self> {
        let columns = table
            .headers
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let raw: Vec<&str> = table.column_values(index).collect();
                infer::build_column(name, &raw)
            })
            .collect();

        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Total number of missing cells across all columns.
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// Render the first `limit` rows.
    pub fn preview(&self, limit: usize) -> Preview {
        let shown = self.row_count.min(limit);
        let rows = (0..shown)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.values().display(row))
                    .collect()
            })
            .collect();

        Preview {
            headers: self.column_names().into_iter().map(String::from).collect(),
            rows,
            total_rows: self.row_count,
            truncated: self.row_count > shown,
        }
    }
}
