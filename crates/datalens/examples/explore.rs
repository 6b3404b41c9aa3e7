//! Example: explore a table and print the dashboard summary.
//!
//! Usage:
//!   cargo run --example explore -- <file_path|sample_name> [correlation|distribution|relationship]
//!
//! Example:
//!   cargo run --example explore -- sales distribution

use std::env;
use std::path::Path;

use datalens::{AnalysisType, ChartChoices, ChartOutcome, Dashboard, Sample};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example explore -- <file_path|sample_name> [chart]");
        eprintln!("\nSamples: employees, sales");
        std::process::exit(1);
    }

    let analysis: AnalysisType = match args.get(2) {
        Some(chart) => chart.parse()?,
        None => AnalysisType::default(),
    };

    let dashboard = Dashboard::new();
    let target = &args[1];
    let report = if Path::new(target).exists() {
        dashboard.analyze_file(target, analysis, &ChartChoices::new())?
    } else {
        let sample: Sample = target.parse()?;
        dashboard.analyze_sample(sample, analysis, &ChartChoices::new())?
    };

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!(
        "{} ({} rows x {} columns)",
        report.source.file, report.source.row_count, report.source.column_count
    );
    println!("{}", separator);

    println!("\nNumeric:     {:?}", report.classification.numeric);
    println!("Categorical: {:?}", report.classification.categorical);

    println!("\nMissing values:");
    if report.quality.missing.is_empty() {
        println!("  none");
    }
    for entry in &report.quality.missing.entries {
        println!(
            "  {:<20} {:>5} ({:.1}%)",
            entry.column, entry.missing_count, entry.missing_percentage
        );
    }

    match &report.chart {
        ChartOutcome::Rendered { chart, .. } => {
            println!("\nChart: {} '{}'", chart.kind(), chart.title())
        }
        ChartOutcome::Skipped { reason, .. } => println!("\nChart skipped: {}", reason),
    }

    Ok(())
}
