//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use datalens::AnalysisType;

use crate::logging::LogFormat;

/// Datalens: explore tabular data and workforce metrics
#[derive(Parser)]
#[command(name = "datalens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Include timestamps in log output
    #[arg(long, global = true)]
    pub log_timestamps: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a table and draw one chart
    Analyze {
        /// Path to the data file (CSV/TSV/XLSX/XLS)
        #[arg(
            value_name = "FILE",
            required_unless_present = "sample",
            conflicts_with = "sample"
        )]
        file: Option<PathBuf>,

        /// Use a built-in sample instead of a file (see `datalens samples`)
        #[arg(long)]
        sample: Option<String>,

        /// Field delimiter for delimited text (default: auto-detect)
        #[arg(short = 'd', long)]
        delimiter: Option<char>,

        #[command(flatten)]
        chart: ChartArgs,

        /// Number of rows in the preview
        #[arg(long, default_value = "5")]
        preview: usize,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Workforce KPIs and turnover-risk ranking
    Hr {
        /// Employee CSV file (default: built-in synthetic data)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Comma-separated departments to include (default: all)
        #[arg(short, long, value_delimiter = ',')]
        departments: Option<Vec<String>>,

        /// Seed for the synthetic employee data
        #[arg(long, conflicts_with = "file")]
        seed: Option<u64>,

        /// Length of the top-risk table
        #[arg(long, default_value = "10")]
        top: usize,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in sample datasets
    Samples,

    /// Serve the dashboard API over HTTP
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,
    },
}

/// Chart selection flags shared by the analyze command.
#[derive(clap::Args, Debug, Clone)]
pub struct ChartArgs {
    /// Chart type (correlation, distribution, relationship)
    #[arg(long = "chart", default_value = "correlation")]
    pub analysis: AnalysisType,

    /// Columns for the correlation matrix (default: all numeric)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Column for the distribution chart (default: first column)
    #[arg(long)]
    pub column: Option<String>,

    /// Categorical column to split the distribution by
    #[arg(long)]
    pub group_by: Option<String>,

    /// X axis of the relationship chart
    #[arg(short = 'x', long)]
    pub x: Option<String>,

    /// Y axis of the relationship chart
    #[arg(short = 'y', long)]
    pub y: Option<String>,

    /// Categorical column to color points by ("none" to disable)
    #[arg(long)]
    pub color: Option<String>,

    /// Number of histogram bins
    #[arg(long, default_value = "20")]
    pub bins: usize,
}
