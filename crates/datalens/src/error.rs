//! Error types for the datalens library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loading and analyzing data.
///
/// Every variant here halts processing of the request that produced it.
/// Chart precondition failures are reported separately through
/// [`ChartError`](crate::chart::ChartError) and never abort an analysis pass.
#[derive(Debug, Error)]
pub enum DatalensError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading an Excel workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no header to build columns from.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns could not be assembled into a dataset.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Requested built-in sample does not exist.
    #[error("Unknown sample dataset: {0}")]
    UnknownSample(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for datalens operations.
pub type Result<T> = std::result::Result<T, DatalensError>;
