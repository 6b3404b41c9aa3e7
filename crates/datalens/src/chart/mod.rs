//! Chart selection and resolution.
//!
//! Selection ([`select_chart`]) checks caller choices against a
//! [`ColumnClassification`](crate::classify::ColumnClassification) and yields a
//! [`ChartRequest`]. Resolution ([`resolve_chart`]) computes the series a
//! renderer needs and yields a [`ChartSpec`].

mod request;
mod spec;

pub use request::{select_chart, AnalysisType, ChartChoices, ChartError, ChartRequest, NO_GROUPING};
pub use spec::{
    resolve_chart, BarSeries, ChartSpec, HistogramSeries, ScatterPoint, DEFAULT_BINS,
    HEATMAP_COLOR_SCALE,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::ColumnClassification;
use crate::dataset::Dataset;

/// Result of trying to draw a chart: either the chart or why it was left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome {
    Rendered {
        request: ChartRequest,
        chart: ChartSpec,
    },
    Skipped {
        analysis: AnalysisType,
        reason: String,
    },
}

impl ChartOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, ChartOutcome::Rendered { .. })
    }

    pub fn chart(&self) -> Option<&ChartSpec> {
        match self {
            ChartOutcome::Rendered { chart, .. } => Some(chart),
            ChartOutcome::Skipped { .. } => None,
        }
    }

    /// Reason the chart was skipped, if it was.
    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            ChartOutcome::Rendered { .. } => None,
            ChartOutcome::Skipped { reason, .. } => Some(reason),
        }
    }
}

/// Select and resolve a chart in one step, turning precondition failures into
/// a skipped outcome.
pub fn build_chart(
    dataset: &Dataset,
    classification: &ColumnClassification,
    analysis: AnalysisType,
    choices: &ChartChoices,
    bins: usize,
) -> ChartOutcome {
    let all_columns = dataset.column_names();

    let resolved = select_chart(analysis, classification, &all_columns, choices)
        .and_then(|request| {
            let chart = resolve_chart(dataset, &request, bins)?;
            Ok((request, chart))
        });

    match resolved {
        Ok((request, chart)) => {
            debug!(analysis = %analysis, chart = chart.kind(), "chart resolved");
            ChartOutcome::Rendered { request, chart }
        }
        Err(err) => {
            warn!(analysis = %analysis, "chart skipped: {}", err);
            ChartOutcome::Skipped {
                analysis,
                reason: err.to_string(),
            }
        }
    }
}
