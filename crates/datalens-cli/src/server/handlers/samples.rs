//! Built-in sample handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use datalens::{GeneralReport, Sample};
use serde::Serialize;

use super::analyze::ChartQuery;
use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Serialize)]
pub struct SampleInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// List the built-in samples.
pub async fn list_samples() -> Json<Vec<SampleInfo>> {
    Json(
        Sample::ALL
            .into_iter()
            .map(|sample| SampleInfo {
                name: sample.name(),
                description: sample.description(),
            })
            .collect(),
    )
}

/// Analyze a built-in sample.
pub async fn analyze_sample(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<GeneralReport>, ApiError> {
    let sample: Sample = name.parse()?;
    let report = state
        .dashboard
        .analyze_sample(sample, query.analysis()?, &query.choices())?;
    Ok(Json(report))
}
