//! Datalens: a tabular data explorer and workforce analytics engine.
//!
//! Datalens loads a CSV or Excel table, infers column types, and produces the
//! pieces of an exploration dashboard: a preview, per-column completeness, a
//! missing-value report and a chart chosen from the column classification.
//! A second mode computes workforce KPIs and turnover-risk rankings over
//! employee records.
//!
//! # Example
//!
//! ```no_run
//! use datalens::{AnalysisType, ChartChoices, Dashboard};
//!
//! let dashboard = Dashboard::new();
//! let report = dashboard
//!     .analyze_file("orders.csv", AnalysisType::Correlation, &ChartChoices::new())
//!     .unwrap();
//!
//! println!("Numeric columns: {}", report.classification.numeric.len());
//! println!("Columns with gaps: {}", report.quality.missing.len());
//! ```

pub mod chart;
pub mod classify;
pub mod dataset;
pub mod error;
pub mod hr;
pub mod input;
pub mod quality;
pub mod samples;
pub mod stats;

mod dashboard;

pub use crate::dashboard::{
    Dashboard, DashboardConfig, DataSource, EmployeeSource, GeneralReport, Mode, ViewReport,
    ViewRequest, DEFAULT_PREVIEW_ROWS,
};
pub use chart::{AnalysisType, ChartChoices, ChartError, ChartOutcome, ChartRequest, ChartSpec};
pub use classify::ColumnClassification;
pub use dataset::{Column, ColumnType, Dataset};
pub use error::{DatalensError, Result};
pub use hr::{DepartmentFilter, EmployeeRecord, HrKpis, HrReport};
pub use input::{DataTable, SourceMetadata};
pub use quality::{MissingValueReport, QualityReport};
pub use samples::Sample;
