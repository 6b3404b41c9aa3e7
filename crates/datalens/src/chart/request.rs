//! Chart selection: validate caller choices against the column classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::ColumnClassification;

/// Sentinel that disables color grouping.
pub const NO_GROUPING: &str = "none";

/// Which chart the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Correlation heatmap over numeric columns.
    #[default]
    Correlation,
    /// Histogram (numeric) or bar chart (categorical) of one column.
    Distribution,
    /// Scatter plot of two numeric columns.
    Relationship,
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correlation" | "heatmap" | "corr" => Ok(AnalysisType::Correlation),
            "distribution" | "histogram" | "hist" => Ok(AnalysisType::Distribution),
            "relationship" | "scatter" => Ok(AnalysisType::Relationship),
            _ => Err(format!(
                "Unknown analysis type: {}. Use correlation, distribution, or relationship.",
                s
            )),
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisType::Correlation => write!(f, "correlation"),
            AnalysisType::Distribution => write!(f, "distribution"),
            AnalysisType::Relationship => write!(f, "relationship"),
        }
    }
}

/// Why a chart request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The dataset lacks enough columns of the required kind.
    #[error("insufficient columns: {chart} needs {required} {kind} column(s), found {found}")]
    InsufficientColumns {
        chart: AnalysisType,
        kind: &'static str,
        required: usize,
        found: usize,
    },

    /// A referenced column is not in the dataset.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A numeric slot was given a non-numeric column.
    #[error("column '{column}' is not numeric and cannot be used for {chart}")]
    NotNumeric { column: String, chart: AnalysisType },

    /// A grouping slot was given a non-categorical column.
    #[error("column '{column}' is not categorical and cannot be used for grouping")]
    NotCategorical { column: String },
}

/// Column choices made by the caller; unused fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartChoices {
    /// Explicit correlation subset (None = every numeric column).
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    /// Distribution column (None = first column).
    #[serde(default)]
    pub column: Option<String>,
    /// Distribution grouping column.
    #[serde(default)]
    pub group_by: Option<String>,
    /// Scatter x axis (None = first numeric column).
    #[serde(default)]
    pub x: Option<String>,
    /// Scatter y axis (None = second numeric column).
    #[serde(default)]
    pub y: Option<String>,
    /// Scatter color column; `"none"` disables grouping.
    #[serde(default)]
    pub color_by: Option<String>,
}

impl ChartChoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }

    pub fn with_axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x = Some(x.into());
        self.y = Some(y.into());
        self
    }

    pub fn with_color_by(mut self, column: impl Into<String>) -> Self {
        self.color_by = Some(column.into());
        self
    }
}

/// A validated description of one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartRequest {
    Correlation {
        columns: Vec<String>,
    },
    Distribution {
        column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_by: Option<String>,
    },
    Relationship {
        x: String,
        y: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color_by: Option<String>,
    },
}

impl ChartRequest {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            ChartRequest::Correlation { .. } => AnalysisType::Correlation,
            ChartRequest::Distribution { .. } => AnalysisType::Distribution,
            ChartRequest::Relationship { .. } => AnalysisType::Relationship,
        }
    }

    /// A correlation over fewer than two columns carries no information.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, ChartRequest::Correlation { columns } if columns.len() < 2)
    }
}

/// Build a chart request for `analysis`, or explain why it cannot be drawn.
///
/// `all_columns` is the dataset's full column order, used for the default
/// distribution column and for telling unknown columns from wrongly typed ones.
pub fn select_chart(
    analysis: AnalysisType,
    classification: &ColumnClassification,
    all_columns: &[&str],
    choices: &ChartChoices,
) -> Result<ChartRequest, ChartError> {
    let require_known = |name: &str| -> Result<(), ChartError> {
        if all_columns.iter().any(|c| *c == name) {
            Ok(())
        } else {
            Err(ChartError::UnknownColumn(name.to_string()))
        }
    };

    let require_numeric = |name: &str| -> Result<String, ChartError> {
        require_known(name)?;
        if classification.is_numeric(name) {
            Ok(name.to_string())
        } else {
            Err(ChartError::NotNumeric {
                column: name.to_string(),
                chart: analysis,
            })
        }
    };

    let require_categorical = |name: &str| -> Result<String, ChartError> {
        require_known(name)?;
        if classification.is_categorical(name) {
            Ok(name.to_string())
        } else {
            Err(ChartError::NotCategorical {
                column: name.to_string(),
            })
        }
    };

    let numeric_count = classification.numeric.len();

    match analysis {
        AnalysisType::Correlation => {
            if numeric_count == 0 {
                return Err(ChartError::InsufficientColumns {
                    chart: analysis,
                    kind: "numeric",
                    required: 1,
                    found: 0,
                });
            }

            let columns = match &choices.columns {
                Some(explicit) => explicit
                    .iter()
                    .map(|name| require_numeric(name.as_str()))
                    .collect::<Result<Vec<_>, _>>()?,
                None => classification.numeric.iter().cloned().collect(),
            };

            Ok(ChartRequest::Correlation { columns })
        }

        AnalysisType::Distribution => {
            let column = match choices.column.as_deref() {
                Some(name) => {
                    require_known(name)?;
                    name.to_string()
                }
                None => match all_columns.first() {
                    Some(first) => first.to_string(),
                    None => {
                        return Err(ChartError::InsufficientColumns {
                            chart: analysis,
                            kind: "data",
                            required: 1,
                            found: 0,
                        });
                    }
                },
            };

            let group_by = grouping_choice(choices.group_by.as_deref())
                .map(require_categorical)
                .transpose()?;

            Ok(ChartRequest::Distribution { column, group_by })
        }

        AnalysisType::Relationship => {
            if numeric_count < 2 {
                return Err(ChartError::InsufficientColumns {
                    chart: analysis,
                    kind: "numeric",
                    required: 2,
                    found: numeric_count,
                });
            }

            let x = match choices.x.as_deref() {
                Some(name) => require_numeric(name)?,
                None => classification.numeric[0].clone(),
            };
            let y = match choices.y.as_deref() {
                Some(name) => require_numeric(name)?,
                None => classification.numeric[1].clone(),
            };
            let color_by = grouping_choice(choices.color_by.as_deref())
                .map(require_categorical)
                .transpose()?;

            Ok(ChartRequest::Relationship { x, y, color_by })
        }
    }
}

/// Treat blank values and the `none` sentinel as "no grouping".
fn grouping_choice(choice: Option<&str>) -> Option<&str> {
    choice
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(NO_GROUPING))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(numeric: &[&str], categorical: &[&str]) -> ColumnClassification {
        ColumnClassification {
            numeric: numeric.iter().map(|s| s.to_string()).collect(),
            categorical: categorical.iter().map(|s| s.to_string()).collect(),
        }
    }

    const COLUMNS: &[&str] = &["age", "salary", "dept", "tenure"];

    fn hr_classes() -> ColumnClassification {
        classes(&["age", "salary", "tenure"], &["dept"])
    }

    #[test]
    fn test_correlation_defaults_to_all_numeric() {
        let request = select_chart(
            AnalysisType::Correlation,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new(),
        )
        .unwrap();

        assert_eq!(
            request,
            ChartRequest::Correlation {
                columns: vec!["age".into(), "salary".into(), "tenure".into()]
            }
        );
        assert!(!request.is_degenerate());
    }

    #[test]
    fn test_correlation_rejects_categorical_column() {
        let err = select_chart(
            AnalysisType::Correlation,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_columns(["age", "dept"]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ChartError::NotNumeric {
                column: "dept".into(),
                chart: AnalysisType::Correlation
            }
        );
    }

    #[test]
    fn test_correlation_requires_a_numeric_column() {
        let err = select_chart(
            AnalysisType::Correlation,
            &classes(&[], &["dept"]),
            &["dept"],
            &ChartChoices::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::InsufficientColumns { required: 1, found: 0, .. }));
    }

    #[test]
    fn test_correlation_single_column_is_degenerate() {
        let request = select_chart(
            AnalysisType::Correlation,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_columns(["age"]),
        )
        .unwrap();
        assert!(request.is_degenerate());

        let empty = select_chart(
            AnalysisType::Correlation,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_columns(Vec::<String>::new()),
        )
        .unwrap();
        assert!(empty.is_degenerate());
    }

    #[test]
    fn test_unknown_column() {
        let err = select_chart(
            AnalysisType::Distribution,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_column("bonus"),
        )
        .unwrap_err();
        assert_eq!(err, ChartError::UnknownColumn("bonus".into()));
    }

    #[test]
    fn test_distribution_defaults_to_first_column() {
        let request = select_chart(
            AnalysisType::Distribution,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new(),
        )
        .unwrap();
        assert_eq!(
            request,
            ChartRequest::Distribution {
                column: "age".into(),
                group_by: None
            }
        );
    }

    #[test]
    fn test_distribution_accepts_categorical_column_and_group() {
        let request = select_chart(
            AnalysisType::Distribution,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_column("dept").with_group_by("dept"),
        )
        .unwrap();
        assert_eq!(
            request,
            ChartRequest::Distribution {
                column: "dept".into(),
                group_by: Some("dept".into())
            }
        );
    }

    #[test]
    fn test_distribution_group_must_be_categorical() {
        let err = select_chart(
            AnalysisType::Distribution,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_column("age").with_group_by("salary"),
        )
        .unwrap_err();
        assert_eq!(err, ChartError::NotCategorical { column: "salary".into() });
    }

    #[test]
    fn test_distribution_on_empty_dataset() {
        let err = select_chart(
            AnalysisType::Distribution,
            &ColumnClassification::default(),
            &[],
            &ChartChoices::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::InsufficientColumns { .. }));
    }

    #[test]
    fn test_relationship_requires_two_numeric_columns() {
        let err = select_chart(
            AnalysisType::Relationship,
            &classes(&["age"], &["dept"]),
            &["age", "dept"],
            &ChartChoices::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ChartError::InsufficientColumns {
                chart: AnalysisType::Relationship,
                kind: "numeric",
                required: 2,
                found: 1
            }
        );
        assert!(err.to_string().starts_with("insufficient columns"));
    }

    #[test]
    fn test_relationship_defaults_and_none_sentinel() {
        let request = select_chart(
            AnalysisType::Relationship,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_color_by("None"),
        )
        .unwrap();
        assert_eq!(
            request,
            ChartRequest::Relationship {
                x: "age".into(),
                y: "salary".into(),
                color_by: None
            }
        );
    }

    #[test]
    fn test_relationship_with_color() {
        let request = select_chart(
            AnalysisType::Relationship,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new()
                .with_axes("salary", "tenure")
                .with_color_by("dept"),
        )
        .unwrap();
        assert_eq!(
            request,
            ChartRequest::Relationship {
                x: "salary".into(),
                y: "tenure".into(),
                color_by: Some("dept".into())
            }
        );
    }

    #[test]
    fn test_relationship_axis_must_be_numeric() {
        let err = select_chart(
            AnalysisType::Relationship,
            &hr_classes(),
            COLUMNS,
            &ChartChoices::new().with_axes("dept", "age"),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::NotNumeric { .. }));
    }

    #[test]
    fn test_analysis_type_parsing() {
        assert_eq!("Scatter".parse::<AnalysisType>().unwrap(), AnalysisType::Relationship);
        assert_eq!("heatmap".parse::<AnalysisType>().unwrap(), AnalysisType::Correlation);
        assert!("pie".parse::<AnalysisType>().is_err());
        assert_eq!(AnalysisType::Distribution.to_string(), "distribution");
    }
}
