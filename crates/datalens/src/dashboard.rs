//! The dashboard: one entry point for both the general explorer and the
//! workforce view.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chart::{build_chart, AnalysisType, ChartChoices, ChartOutcome, DEFAULT_BINS};
use crate::classify::ColumnClassification;
use crate::dataset::{Dataset, Preview};
use crate::error::Result;
use crate::hr::{
    employees_for_seed, load_employees, read_employees, DepartmentFilter, EmployeeRecord,
    HrReport, DEFAULT_TOP_RISK,
};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::quality::QualityReport;
use crate::samples::Sample;

/// Rows shown in the data preview by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Configuration for dashboard rendering.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Rows included in the preview.
    pub preview_rows: usize,
    /// Bin count for histograms.
    pub histogram_bins: usize,
    /// Length of the top-risk table.
    pub top_risk: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            histogram_bins: DEFAULT_BINS,
            top_risk: DEFAULT_TOP_RISK,
        }
    }
}

impl DashboardConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Set the histogram bin count (at least one bin is always drawn).
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins.max(1);
        self
    }

    pub fn with_top_risk(mut self, n: usize) -> Self {
        self.top_risk = n;
        self
    }
}

// =============================================================================
// REQUESTS AND REPORTS
// =============================================================================

/// Which page of the dashboard is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Explore an arbitrary table.
    #[default]
    General,
    /// Workforce analytics.
    Hr,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" | "explore" => Ok(Mode::General),
            "hr" | "workforce" => Ok(Mode::Hr),
            _ => Err(format!("Unknown mode: {}. Use 'general' or 'hr'", s)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::General => write!(f, "general"),
            Mode::Hr => write!(f, "hr"),
        }
    }
}

/// Where a general analysis reads its table from.
#[derive(Debug, Clone)]
pub enum DataSource {
    File(PathBuf),
    /// In-memory contents; the name's extension selects the parser.
    Bytes { name: String, contents: Vec<u8> },
    Sample(Sample),
}

/// Where the workforce view reads employees from.
#[derive(Debug, Clone)]
pub enum EmployeeSource {
    /// Synthetic records; `None` uses the built-in seed.
    Generated { seed: Option<u64> },
    File(PathBuf),
    Bytes(Vec<u8>),
}

impl Default for EmployeeSource {
    fn default() -> Self {
        EmployeeSource::Generated { seed: None }
    }
}

/// A request for one dashboard page.
#[derive(Debug, Clone)]
pub enum ViewRequest {
    General {
        source: DataSource,
        analysis: AnalysisType,
        choices: ChartChoices,
    },
    Hr {
        employees: EmployeeSource,
        filter: DepartmentFilter,
    },
}

impl ViewRequest {
    pub fn mode(&self) -> Mode {
        match self {
            ViewRequest::General { .. } => Mode::General,
            ViewRequest::Hr { .. } => Mode::Hr,
        }
    }
}

/// The general explorer page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralReport {
    pub source: SourceMetadata,
    pub preview: Preview,
    /// Per-column summary and the missing-value report.
    pub quality: QualityReport,
    pub classification: ColumnClassification,
    pub chart: ChartOutcome,
    pub warnings: Vec<String>,
}

/// A rendered dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewReport {
    General(GeneralReport),
    Hr(HrReport),
}

impl ViewReport {
    pub fn mode(&self) -> Mode {
        match self {
            ViewReport::General(_) => Mode::General,
            ViewReport::Hr(_) => Mode::Hr,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            ViewReport::General(report) => &report.warnings,
            ViewReport::Hr(report) => &report.warnings,
        }
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Loads data and produces dashboard reports.
pub struct Dashboard {
    config: DashboardConfig,
    parser: Parser,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Create a dashboard with default configuration.
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Render any page.
    pub fn render(&self, request: ViewRequest) -> Result<ViewReport> {
        info!(mode = %request.mode(), "rendering view");

        match request {
            ViewRequest::General {
                source,
                analysis,
                choices,
            } => {
                let report = match source {
                    DataSource::File(path) => self.analyze_file(path, analysis, &choices)?,
                    DataSource::Bytes { name, contents } => {
                        self.analyze_bytes(&name, &contents, analysis, &choices)?
                    }
                    DataSource::Sample(sample) => self.analyze_sample(sample, analysis, &choices)?,
                };
                Ok(ViewReport::General(report))
            }
            ViewRequest::Hr { employees, filter } => {
                let records = self.load_employees(&employees)?;
                Ok(ViewReport::Hr(self.hr_report(&records, &filter)?))
            }
        }
    }

    /// Analyze a file on disk.
    pub fn analyze_file(
        &self,
        path: impl AsRef<Path>,
        analysis: AnalysisType,
        choices: &ChartChoices,
    ) -> Result<GeneralReport> {
        let (table, source) = self.parser.parse_file(path)?;
        let dataset = Dataset::from_table(&table)?;
        Ok(self.analyze_dataset(source, &dataset, analysis, choices))
    }

    /// Analyze uploaded contents; `name` decides how they are parsed.
    pub fn analyze_bytes(
        &self,
        name: &str,
        contents: &[u8],
        analysis: AnalysisType,
        choices: &ChartChoices,
    ) -> Result<GeneralReport> {
        let (table, source) = self.parser.parse_named_bytes(name, contents)?;
        let dataset = Dataset::from_table(&table)?;
        Ok(self.analyze_dataset(source, &dataset, analysis, choices))
    }

    pub fn analyze_sample(
        &self,
        sample: Sample,
        analysis: AnalysisType,
        choices: &ChartChoices,
    ) -> Result<GeneralReport> {
        let contents = sample.bytes()?;
        self.analyze_bytes(&sample.file_name(), &contents, analysis, choices)
    }

    /// Summarize an already built dataset and draw the requested chart.
    pub fn analyze_dataset(
        &self,
        source: SourceMetadata,
        dataset: &Dataset,
        analysis: AnalysisType,
        choices: &ChartChoices,
    ) -> GeneralReport {
        let classification = ColumnClassification::classify(dataset);
        let quality = QualityReport::summarize(dataset);
        let mut warnings = Vec::new();

        if dataset.row_count() == 0 {
            warnings.push(format!("'{}' has no data rows", source.file));
        }

        if !quality.missing.is_empty() {
            warnings.push(format!(
                "Missing values found in {} column(s)",
                quality.missing.len()
            ));
        }

        let chart = build_chart(
            dataset,
            &classification,
            analysis,
            choices,
            self.config.histogram_bins,
        );
        match &chart {
            ChartOutcome::Skipped { reason, .. } => warnings.push(reason.clone()),
            ChartOutcome::Rendered { request, .. } if request.is_degenerate() => {
                warnings.push(
                    "Correlation needs at least two numeric columns to be informative".to_string(),
                );
            }
            ChartOutcome::Rendered { .. } => {}
        }

        info!(
            file = %source.file,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            numeric = classification.numeric.len(),
            categorical = classification.categorical.len(),
            "analysis complete"
        );

        GeneralReport {
            preview: dataset.preview(self.config.preview_rows),
            source,
            quality,
            classification,
            chart,
            warnings,
        }
    }

    /// Load employee records for the workforce view.
    pub fn load_employees(
        &self,
        source: &EmployeeSource,
    ) -> Result<Cow<'static, [EmployeeRecord]>> {
        let records = match source {
            EmployeeSource::Generated { seed } => employees_for_seed(*seed),
            EmployeeSource::File(path) => Cow::Owned(load_employees(path)?),
            EmployeeSource::Bytes(contents) => Cow::Owned(read_employees(contents.as_slice())?),
        };

        if records.is_empty() {
            warn!("employee source contains no records");
        }
        Ok(records)
    }

    /// Build the workforce report for a department filter.
    pub fn hr_report(
        &self,
        employees: &[EmployeeRecord],
        filter: &DepartmentFilter,
    ) -> Result<HrReport> {
        HrReport::build(
            employees,
            filter,
            self.config.top_risk,
            self.config.histogram_bins,
        )
    }
}
