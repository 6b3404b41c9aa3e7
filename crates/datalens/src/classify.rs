//! Partition dataset columns into numeric and categorical sets.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Numeric and categorical column names, each in dataset column order.
///
/// The two sets never share a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnClassification {
    pub numeric: IndexSet<String>,
    pub categorical: IndexSet<String>,
}

impl ColumnClassification {
    /// Classify every column of a dataset by its declared type.
    pub fn classify(dataset: &Dataset) -> Self {
        let mut classification = Self::default();

        for column in dataset.columns() {
            let ty = column.column_type();
            if ty.is_numeric() {
                classification.numeric.insert(column.name().to_string());
            } else if ty.is_categorical() {
                classification.categorical.insert(column.name().to_string());
            }
        }

        classification
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric.contains(name)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.categorical.contains(name)
    }

    /// Whether the column is known to this classification at all.
    pub fn contains(&self, name: &str) -> bool {
        self.is_numeric(name) || self.is_categorical(name)
    }
}
