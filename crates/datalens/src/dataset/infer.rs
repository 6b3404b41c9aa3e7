//! Column type inference over raw string cells.

use once_cell::sync::Lazy;
use regex::Regex;

use super::column::{Column, ColumnValues};
use super::types::ColumnType;
use crate::input::DataTable;

// Date patterns compiled once on first use.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(),  // ISO date
        Regex::new(r"^\d{2}/\d{2}/\d{4}").unwrap(),  // US date
        Regex::new(r"^\d{2}-\d{2}-\d{4}").unwrap(),  // European date
        Regex::new(r"^\d{4}/\d{2}/\d{2}").unwrap(),  // Alt ISO
    ]
});

/// Kind of a single non-null cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    Text,
}

/// Detect the kind of a single value.
fn detect_cell_kind(value: &str) -> CellKind {
    let trimmed = value.trim();

    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return CellKind::Boolean;
    }

    if trimmed.parse::<i64>().is_ok() {
        return CellKind::Integer;
    }

    // "inf" and "nan" parse as f64 but are not numeric data here
    if let Ok(number) = trimmed.parse::<f64>() {
        if number.is_finite() {
            return CellKind::Float;
        }
    }

    if DATE_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed)) {
        if trimmed.contains(':') || trimmed.contains('T') {
            return CellKind::DateTime;
        }
        return CellKind::Date;
    }

    CellKind::Text
}

/// Infer a column type from its non-null cells.
///
/// A column is only numeric, boolean or temporal when every present value
/// agrees; a single stray label makes the whole column text.
pub fn infer_type<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnType {
    let mut seen_any = false;
    let (mut ints, mut floats, mut bools, mut dates, mut datetimes, mut texts) =
        (false, false, false, false, false, false);

    for value in values {
        if DataTable::is_null_value(value) {
            continue;
        }
        seen_any = true;
        match detect_cell_kind(value) {
            CellKind::Integer => ints = true,
            CellKind::Float => floats = true,
            CellKind::Boolean => bools = true,
            CellKind::Date => dates = true,
            CellKind::DateTime => datetimes = true,
            CellKind::Text => texts = true,
        }
    }

    if !seen_any || texts {
        return ColumnType::Text;
    }

    let numeric = ints || floats;
    let temporal = dates || datetimes;

    match (numeric, bools, temporal) {
        (true, false, false) if floats => ColumnType::Float,
        (true, false, false) => ColumnType::Integer,
        (false, true, false) => ColumnType::Boolean,
        (false, false, true) if datetimes => ColumnType::DateTime,
        (false, false, true) => ColumnType::Date,
        _ => ColumnType::Text,
    }
}

/// Build a typed column from raw cells.
pub fn build_column(name: &str, raw: &[&str]) -> Column {
    let column_type = infer_type(raw.iter().copied());

    let present = |value: &str| -> Option<String> {
        if DataTable::is_null_value(value) {
            None
        } else {
            Some(value.trim().to_string())
        }
    };

    match column_type {
        ColumnType::Integer => Column::new(
            name,
            ColumnValues::Integer(
                raw.iter()
                    .map(|v| present(v).and_then(|s| s.parse::<i64>().ok()))
                    .collect(),
            ),
        ),
        ColumnType::Float => Column::new(
            name,
            ColumnValues::Float(
                raw.iter()
                    .map(|v| present(v).and_then(|s| s.parse::<f64>().ok()))
                    .collect(),
            ),
        ),
        ColumnType::Boolean => Column::new(
            name,
            ColumnValues::Boolean(
                raw.iter()
                    .map(|v| present(v).map(|s| s.eq_ignore_ascii_case("true")))
                    .collect(),
            ),
        ),
        ColumnType::Date | ColumnType::DateTime => Column::temporal(
            name,
            raw.iter().map(|v| present(v)).collect(),
            column_type,
        ),
        ColumnType::Text => Column::new(
            name,
            ColumnValues::Text(raw.iter().map(|v| present(v)).collect()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_integer_type() {
        assert_eq!(infer_type(["1", "2", "3", "100"]), ColumnType::Integer);
    }

    #[test]
    fn test_infer_float_type() {
        assert_eq!(infer_type(["1.5", "2.7", "3.14", "0.5"]), ColumnType::Float);
    }

    #[test]
    fn test_mixed_integer_float_promotes_to_float() {
        assert_eq!(infer_type(["1", "2.5", "3"]), ColumnType::Float);
    }

    #[test]
    fn test_one_label_makes_text() {
        assert_eq!(infer_type(["1", "2", "three"]), ColumnType::Text);
    }

    #[test]
    fn test_nulls_are_ignored() {
        assert_eq!(infer_type(["1", "NA", "", "4"]), ColumnType::Integer);
    }

    #[test]
    fn test_all_null_is_text() {
        assert_eq!(infer_type(["", "NA"]), ColumnType::Text);
        assert_eq!(infer_type(Vec::<&str>::new()), ColumnType::Text);
    }

    #[test]
    fn test_infer_boolean() {
        assert_eq!(infer_type(["True", "false", "TRUE"]), ColumnType::Boolean);
        // 0/1 stays numeric
        assert_eq!(infer_type(["0", "1"]), ColumnType::Integer);
    }

    #[test]
    fn test_infer_dates() {
        assert_eq!(infer_type(["2024-01-15", "2024-02-20"]), ColumnType::Date);
        assert_eq!(
            infer_type(["2024-01-15T10:00:00", "2024-02-20 08:30"]),
            ColumnType::DateTime
        );
    }

    #[test]
    fn test_infinity_is_not_numeric() {
        assert_eq!(infer_type(["inf", "1"]), ColumnType::Text);
    }

    #[test]
    fn test_build_column_parses_values() {
        let col = build_column("age", &["30", "", "25"]);
        assert_eq!(col.column_type(), ColumnType::Integer);
        assert_eq!(
            col.values(),
            &ColumnValues::Integer(vec![Some(30), None, Some(25)])
        );
    }

    #[test]
    fn test_build_boolean_column() {
        let col = build_column("active", &["true", "False", "null"]);
        assert_eq!(
            col.values(),
            &ColumnValues::Boolean(vec![Some(true), Some(false), None])
        );
    }
}
