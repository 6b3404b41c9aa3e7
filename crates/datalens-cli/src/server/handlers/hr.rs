//! Workforce report handler.

use axum::{
    extract::{Query, State},
    Json,
};
use datalens::{DepartmentFilter, EmployeeSource, HrReport};
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HrQuery {
    /// Comma-separated departments (default: all).
    pub departments: Option<String>,
    pub seed: Option<u64>,
    pub top: Option<usize>,
}

/// Build the workforce report over synthetic employees.
pub async fn hr_report(
    State(state): State<AppState>,
    Query(query): Query<HrQuery>,
) -> Result<Json<HrReport>, ApiError> {
    let filter: DepartmentFilter = match query.departments.as_deref() {
        Some(list) => list.parse().map_err(ApiError::BadRequest)?,
        None => DepartmentFilter::All,
    };

    let employees = state
        .dashboard
        .load_employees(&EmployeeSource::Generated { seed: query.seed })?;

    let config = state.config();
    let report = HrReport::build(
        &employees,
        &filter,
        query.top.unwrap_or(config.top_risk),
        config.histogram_bins,
    )?;

    Ok(Json(report))
}
