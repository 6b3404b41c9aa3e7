//! Per-column completeness and the missing-value report.

use serde::{Deserialize, Serialize};

use crate::dataset::{ColumnType, Dataset};
use crate::stats::{NumericSummary, StreamingStats};

/// One row of the column-type summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub column_type: ColumnType,
    pub non_null_count: usize,
    pub missing_count: usize,
    /// 100 × missing / rows, 0 for an empty dataset.
    pub missing_percentage: f64,
    /// Count, mean and range for numeric columns with values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
}

/// A column with at least one missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// Columns with missing values, most incomplete first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissingValueReport {
    pub entries: Vec<MissingEntry>,
}

impl MissingValueReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of missing cells over the reported columns.
    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|e| e.missing_count).sum()
    }
}

/// Completeness summary of a whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub row_count: usize,
    pub column_count: usize,
    /// One entry per column, in column order.
    pub columns: Vec<ColumnSummary>,
    pub missing: MissingValueReport,
}

/// Percentage of `part` in `total`, defined as 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

impl QualityReport {
    /// Summarize every column of a dataset.
    pub fn summarize(dataset: &Dataset) -> Self {
        let row_count = dataset.row_count();

        let columns: Vec<ColumnSummary> = dataset
            .columns()
            .iter()
            .map(|column| {
                let missing_count = column.null_count();
                let numeric = if column.column_type().is_numeric() {
                    column
                        .numeric_values()
                        .into_iter()
                        .collect::<StreamingStats>()
                        .summary()
                } else {
                    None
                };

                ColumnSummary {
                    name: column.name().to_string(),
                    column_type: column.column_type(),
                    non_null_count: column.non_null_count(),
                    missing_count,
                    missing_percentage: percentage(missing_count, row_count),
                    numeric,
                }
            })
            .collect();

        let mut entries: Vec<MissingEntry> = columns
            .iter()
            .filter(|c| c.missing_count > 0)
            .map(|c| MissingEntry {
                column: c.name.clone(),
                missing_count: c.missing_count,
                missing_percentage: c.missing_percentage,
            })
            .collect();

        // Stable sort keeps column order for ties
        entries.sort_by(|a, b| {
            b.missing_percentage
                .partial_cmp(&a.missing_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Self {
            row_count,
            column_count: dataset.column_count(),
            columns,
            missing: MissingValueReport { entries },
        }
    }

    /// Look up a column's summary row.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}
