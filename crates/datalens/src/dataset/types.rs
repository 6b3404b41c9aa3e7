//! Core type definitions for column representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared data type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Date only (no time component), stored as text.
    Date,
    /// Date and time, stored as text.
    DateTime,
    /// Free text or categorical labels.
    Text,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::DateTime | ColumnType::Date)
    }

    /// Returns true if the classifier treats this type as categorical.
    ///
    /// Booleans and dates count as categorical labels.
    pub fn is_categorical(&self) -> bool {
        !self.is_numeric()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_categorical_are_exclusive() {
        for ty in [
            ColumnType::Integer,
            ColumnType::Float,
            ColumnType::Boolean,
            ColumnType::Date,
            ColumnType::DateTime,
            ColumnType::Text,
        ] {
            assert_ne!(ty.is_numeric(), ty.is_categorical(), "{ty}");
        }
    }

    #[test]
    fn test_boolean_is_categorical() {
        assert!(ColumnType::Boolean.is_categorical());
        assert!(!ColumnType::Boolean.is_numeric());
    }
}
