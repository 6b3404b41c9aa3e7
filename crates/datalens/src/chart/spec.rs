//! Resolve validated chart requests into renderer-ready chart descriptions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::request::{ChartError, ChartRequest};
use crate::dataset::{Column, Dataset};
use crate::stats::{bin_edges, histogram_counts, pearson, round_to, BoxSummary};

/// Diverging scale used for correlation heatmaps.
pub const HEATMAP_COLOR_SCALE: &str = "RdBu_r";

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// Counts of one histogram group over the shared bin edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// One count per bin.
    pub counts: Vec<usize>,
    /// Marginal box plot of the same values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_summary: Option<BoxSummary>,
}

/// Category counts of one bar group, aligned with the chart's categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A chart with its axis bindings and computed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartSpec {
    Heatmap {
        title: String,
        columns: Vec<String>,
        /// Pearson coefficients rounded to 2 decimals; null where undefined.
        matrix: Vec<Vec<Option<f64>>>,
        color_scale: String,
    },
    Histogram {
        title: String,
        column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_by: Option<String>,
        /// Bin boundaries; `counts[i]` covers `edges[i]..edges[i + 1]`.
        edges: Vec<f64>,
        series: Vec<HistogramSeries>,
    },
    Bar {
        title: String,
        column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_by: Option<String>,
        categories: Vec<String>,
        series: Vec<BarSeries>,
    },
    Scatter {
        title: String,
        x: String,
        y: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color_by: Option<String>,
        points: Vec<ScatterPoint>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Heatmap { title, .. }
            | ChartSpec::Histogram { title, .. }
            | ChartSpec::Bar { title, .. }
            | ChartSpec::Scatter { title, .. } => title,
        }
    }

    /// Short name of the chart kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::Heatmap { .. } => "heatmap",
            ChartSpec::Histogram { .. } => "histogram",
            ChartSpec::Bar { .. } => "bar",
            ChartSpec::Scatter { .. } => "scatter",
        }
    }
}

/// Compute the data behind a chart request.
pub fn resolve_chart(
    dataset: &Dataset,
    request: &ChartRequest,
    bins: usize,
) -> Result<ChartSpec, ChartError> {
    match request {
        ChartRequest::Correlation { columns } => {
            let series: Vec<Vec<Option<f64>>> = columns
                .iter()
                .map(|name| lookup(dataset, name).map(numeric_series))
                .collect::<Result<_, _>>()?;

            let matrix = series
                .iter()
                .map(|a| {
                    series
                        .iter()
                        .map(|b| pearson(a, b).map(|r| round_to(r, 2)))
                        .collect()
                })
                .collect();

            Ok(ChartSpec::Heatmap {
                title: "Correlation matrix".to_string(),
                columns: columns.clone(),
                matrix,
                color_scale: HEATMAP_COLOR_SCALE.to_string(),
            })
        }

        ChartRequest::Distribution { column, group_by } => {
            let target = lookup(dataset, column)?;
            let groups = group_by.as_deref().map(|g| lookup(dataset, g)).transpose()?;
            let title = format!("Distribution of {}", column);

            if target.column_type().is_numeric() {
                let values = target.numeric_values();
                let edges = bin_edges(&values, bins);

                let grouped = group_rows(target.len(), groups, |row| target.values().numeric(row));
                let series = grouped
                    .into_iter()
                    .map(|(group, values)| HistogramSeries {
                        counts: histogram_counts(&values, &edges),
                        box_summary: BoxSummary::from_values(&values),
                        group,
                    })
                    .collect();

                Ok(ChartSpec::Histogram {
                    title,
                    column: column.clone(),
                    group_by: group_by.clone(),
                    edges,
                    series,
                })
            } else {
                let mut categories: IndexMap<String, usize> = IndexMap::new();
                for row in 0..target.len() {
                    if let Some(label) = target.values().label(row) {
                        let next = categories.len();
                        categories.entry(label).or_insert(next);
                    }
                }

                let grouped = group_rows(target.len(), groups, |row| target.values().label(row));
                let series = grouped
                    .into_iter()
                    .map(|(group, labels)| {
                        let mut counts = vec![0; categories.len()];
                        for label in labels {
                            if let Some(&index) = categories.get(&label) {
                                counts[index] += 1;
                            }
                        }
                        BarSeries { group, counts }
                    })
                    .collect();

                Ok(ChartSpec::Bar {
                    title,
                    column: column.clone(),
                    group_by: group_by.clone(),
                    categories: categories.into_keys().collect(),
                    series,
                })
            }
        }

        ChartRequest::Relationship { x, y, color_by } => {
            let x_col = lookup(dataset, x)?;
            let y_col = lookup(dataset, y)?;
            let color = color_by.as_deref().map(|c| lookup(dataset, c)).transpose()?;

            let points = (0..dataset.row_count())
                .filter_map(|row| {
                    let px = x_col.values().numeric(row)?;
                    let py = y_col.values().numeric(row)?;
                    let group = match color {
                        Some(c) => Some(c.values().label(row)?),
                        None => None,
                    };
                    Some(ScatterPoint { x: px, y: py, group })
                })
                .collect();

            Ok(ChartSpec::Scatter {
                title: format!("{} vs {}", y, x),
                x: x.clone(),
                y: y.clone(),
                color_by: color_by.clone(),
                points,
            })
        }
    }
}

fn lookup<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column, ChartError> {
    dataset
        .column(name)
        .ok_or_else(|| ChartError::UnknownColumn(name.to_string()))
}

fn numeric_series(column: &Column) -> Vec<Option<f64>> {
    (0..column.len()).map(|row| column.values().numeric(row)).collect()
}

/// Collect per-row values into groups in first-appearance order.
///
/// Without a grouping column everything lands in a single unnamed group, which
/// is returned even when empty. Rows whose group label is missing are skipped.
fn group_rows<T>(
    rows: usize,
    groups: Option<&Column>,
    value: impl Fn(usize) -> Option<T>,
) -> Vec<(Option<String>, Vec<T>)> {
    let Some(groups) = groups else {
        let values = (0..rows).filter_map(&value).collect();
        return vec![(None, values)];
    };

    let mut grouped: IndexMap<String, Vec<T>> = IndexMap::new();
    for row in 0..rows {
        let Some(label) = groups.values().label(row) else {
            continue;
        };
        let bucket = grouped.entry(label).or_default();
        if let Some(v) = value(row) {
            bucket.push(v);
        }
    }

    grouped.into_iter().map(|(g, v)| (Some(g), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ColumnValues;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::new("a", ColumnValues::Float(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)])),
            Column::new("b", ColumnValues::Float(vec![Some(2.0), Some(4.0), Some(6.0), None])),
            Column::new("c", ColumnValues::Float(vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)])),
            Column::new("k", ColumnValues::Integer(vec![Some(5), Some(5), Some(5), Some(5)])),
            Column::new(
                "g",
                ColumnValues::Text(vec![
                    Some("x".into()),
                    Some("y".into()),
                    Some("x".into()),
                    None,
                ]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_heatmap_matrix() {
        let request = ChartRequest::Correlation {
            columns: vec!["a".into(), "b".into(), "c".into(), "k".into()],
        };
        let spec = resolve_chart(&dataset(), &request, DEFAULT_BINS).unwrap();

        let ChartSpec::Heatmap { matrix, color_scale, .. } = spec else {
            panic!("expected heatmap");
        };
        assert_eq!(color_scale, "RdBu_r");
        assert_eq!(matrix[0][0], Some(1.0));
        assert_eq!(matrix[0][1], Some(1.0));
        assert_eq!(matrix[0][2], Some(-1.0));
        // constant column has no defined correlation
        assert_eq!(matrix[0][3], None);
        assert_eq!(matrix[3][3], None);
    }

    #[test]
    fn test_empty_heatmap() {
        let request = ChartRequest::Correlation { columns: Vec::new() };
        let spec = resolve_chart(&dataset(), &request, DEFAULT_BINS).unwrap();
        assert!(matches!(spec, ChartSpec::Heatmap { ref matrix, .. } if matrix.is_empty()));
    }

    #[test]
    fn test_numeric_distribution_has_box_summary() {
        let request = ChartRequest::Distribution {
            column: "a".into(),
            group_by: None,
        };
        let spec = resolve_chart(&dataset(), &request, 3).unwrap();

        let ChartSpec::Histogram { edges, series, .. } = spec else {
            panic!("expected histogram");
        };
        assert_eq!(edges.len(), 4);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].counts.iter().sum::<usize>(), 4);
        assert_eq!(series[0].box_summary.as_ref().unwrap().median, 2.5);
    }

    #[test]
    fn test_grouped_histogram_skips_missing_groups() {
        let request = ChartRequest::Distribution {
            column: "a".into(),
            group_by: Some("g".into()),
        };
        let spec = resolve_chart(&dataset(), &request, 2).unwrap();

        let ChartSpec::Histogram { series, .. } = spec else {
            panic!("expected histogram");
        };
        let groups: Vec<Option<&str>> = series.iter().map(|s| s.group.as_deref()).collect();
        assert_eq!(groups, vec![Some("x"), Some("y")]);
        assert_eq!(series[0].counts.iter().sum::<usize>(), 2);
        assert_eq!(series[1].counts.iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_categorical_distribution_is_bar() {
        let request = ChartRequest::Distribution {
            column: "g".into(),
            group_by: None,
        };
        let spec = resolve_chart(&dataset(), &request, DEFAULT_BINS).unwrap();

        let ChartSpec::Bar { categories, series, .. } = spec else {
            panic!("expected bar chart");
        };
        assert_eq!(categories, vec!["x", "y"]);
        assert_eq!(series[0].counts, vec![2, 1]);
    }

    #[test]
    fn test_scatter_drops_incomplete_points() {
        let request = ChartRequest::Relationship {
            x: "a".into(),
            y: "b".into(),
            color_by: Some("g".into()),
        };
        let spec = resolve_chart(&dataset(), &request, DEFAULT_BINS).unwrap();
        assert_eq!(spec.kind(), "scatter");
        assert_eq!(spec.title(), "b vs a");

        let ChartSpec::Scatter { points, .. } = spec else {
            panic!("expected scatter");
        };
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], ScatterPoint { x: 2.0, y: 4.0, group: Some("y".into()) });
    }

    #[test]
    fn test_unknown_column_is_reported() {
        let request = ChartRequest::Distribution {
            column: "zzz".into(),
            group_by: None,
        };
        let err = resolve_chart(&dataset(), &request, DEFAULT_BINS).unwrap_err();
        assert_eq!(err, ChartError::UnknownColumn("zzz".into()));
    }
}
