//! Property-based tests for classification, completeness and risk ranking.
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p datalens --test property_tests
//! ```

use proptest::prelude::*;

use datalens::hr::{generate_employees, top_risk};
use datalens::{ColumnClassification, DataTable, Dataset, QualityReport};

// =============================================================================
// Test Strategies
// =============================================================================

/// A cell that may be an integer, a float, a word, a boolean or a null token.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "-?[0-9]{1,5}",
        "-?[0-9]{1,3}\\.[0-9]{1,3}",
        "[a-zA-Z]{1,8}",
        Just("true".to_string()),
        Just("False".to_string()),
        Just(String::new()),
        Just("NA".to_string()),
        Just("null".to_string()),
    ]
}

/// A rectangular table with 0-6 columns and 0-30 rows.
fn table() -> impl Strategy<Value = DataTable> {
    (0usize..6, 0usize..30).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(prop::collection::vec(cell(), cols), rows).prop_map(move |rows| {
            let headers = (0..cols).map(|i| format!("c{}", i)).collect();
            DataTable::new(headers, rows)
        })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn classification_is_disjoint_and_complete(table in table()) {
        let dataset = Dataset::from_table(&table).unwrap();
        let classes = ColumnClassification::classify(&dataset);

        for name in &classes.numeric {
            prop_assert!(!classes.categorical.contains(name));
        }
        prop_assert_eq!(
            classes.numeric.len() + classes.categorical.len(),
            dataset.column_count()
        );
    }

    #[test]
    fn missing_counts_add_up(table in table()) {
        let dataset = Dataset::from_table(&table).unwrap();
        let report = QualityReport::summarize(&dataset);

        let total: usize = report.columns.iter().map(|c| c.missing_count).sum();
        prop_assert_eq!(total, dataset.null_count());
        prop_assert_eq!(report.missing.total_missing(), dataset.null_count());

        let rows = dataset.row_count();
        for column in &report.columns {
            let expected = if rows == 0 {
                0.0
            } else {
                100.0 * column.missing_count as f64 / rows as f64
            };
            prop_assert!((column.missing_percentage - expected).abs() < 1e-9);
            prop_assert!((0.0..=100.0).contains(&column.missing_percentage));
            prop_assert_eq!(column.missing_count + column.non_null_count, dataset.row_count());
        }
    }

    #[test]
    fn missing_report_is_sorted_and_nonzero(table in table()) {
        let dataset = Dataset::from_table(&table).unwrap();
        let report = QualityReport::summarize(&dataset);

        prop_assert!(report.missing.entries.iter().all(|e| e.missing_count > 0));
        prop_assert!(report
            .missing
            .entries
            .windows(2)
            .all(|w| w[0].missing_percentage >= w[1].missing_percentage));
    }

    #[test]
    fn top_risk_is_bounded_and_descending(
        seed in any::<u64>(),
        count in 0usize..80,
        n in 0usize..15,
    ) {
        let employees = generate_employees(count, seed);
        let top = top_risk(&employees, n);

        prop_assert_eq!(top.len(), n.min(count));
        prop_assert!(top.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
    }
}
