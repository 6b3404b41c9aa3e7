//! Upload analysis handler and the chart query shared with sample views.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use datalens::{AnalysisType, ChartChoices, GeneralReport};
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// File name assumed for uploads that do not name themselves.
const DEFAULT_UPLOAD_NAME: &str = "upload.csv";

/// Chart parameters accepted as query string.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// correlation, distribution or relationship.
    pub chart: Option<String>,
    /// Comma-separated correlation columns.
    pub columns: Option<String>,
    pub column: Option<String>,
    pub group_by: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub color: Option<String>,
}

impl ChartQuery {
    pub fn analysis(&self) -> Result<AnalysisType, ApiError> {
        match self.chart.as_deref() {
            Some(chart) => chart.parse().map_err(ApiError::BadRequest),
            None => Ok(AnalysisType::default()),
        }
    }

    pub fn choices(&self) -> ChartChoices {
        ChartChoices {
            columns: self.columns.as_deref().map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect()
            }),
            column: self.column.clone(),
            group_by: self.group_by.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
            color_by: self.color.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    /// Original file name; its extension selects the parser.
    pub name: Option<String>,
    #[serde(flatten)]
    pub chart: ChartQuery,
}

/// Analyze an uploaded file sent as the raw request body.
pub async fn analyze_upload(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    body: Bytes,
) -> Result<Json<GeneralReport>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Request body is empty".to_string()));
    }

    let analysis = query.chart.analysis()?;
    let name = query.name.as_deref().unwrap_or(DEFAULT_UPLOAD_NAME);
    let report = state
        .dashboard
        .analyze_bytes(name, &body, analysis, &query.chart.choices())?;

    Ok(Json(report))
}
