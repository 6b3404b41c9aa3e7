//! Analyze command - summarize a table and draw one chart.

use std::path::PathBuf;

use colored::Colorize;
use datalens::chart::{ChartOutcome, ChartSpec};
use datalens::input::ParserConfig;
use datalens::{ChartChoices, Dashboard, DashboardConfig, GeneralReport, Sample};

use super::{format_optional, print_warnings};
use crate::cli::ChartArgs;

pub fn run(
    file: Option<PathBuf>,
    sample: Option<String>,
    delimiter: Option<char>,
    chart: ChartArgs,
    preview: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::with_config(
        DashboardConfig::default()
            .with_parser(parser_config(delimiter)?)
            .with_preview_rows(preview)
            .with_histogram_bins(chart.bins),
    );
    let choices = chart_choices(&chart);

    let report = match (file, sample) {
        (Some(file), _) => {
            if !file.exists() {
                return Err(format!("File not found: {}", file.display()).into());
            }
            dashboard.analyze_file(&file, chart.analysis, &choices)?
        }
        (None, Some(name)) => {
            let sample: Sample = name.parse()?;
            dashboard.analyze_sample(sample, chart.analysis, &choices)?
        }
        (None, None) => return Err("Provide a FILE or --sample NAME".into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Parser settings for an optional forced delimiter.
pub fn parser_config(delimiter: Option<char>) -> Result<ParserConfig, String> {
    match delimiter {
        None => Ok(ParserConfig::default()),
        Some(d) if d.is_ascii() => Ok(ParserConfig::default().with_delimiter(d as u8)),
        Some(d) => Err(format!("Delimiter must be a single ASCII character, got '{}'", d)),
    }
}

/// Translate command-line chart flags into chart choices.
pub fn chart_choices(args: &ChartArgs) -> ChartChoices {
    let mut choices = ChartChoices::new();
    if let Some(columns) = &args.columns {
        choices = choices.with_columns(columns.iter().cloned());
    }
    if let Some(column) = &args.column {
        choices = choices.with_column(column.clone());
    }
    if let Some(group_by) = &args.group_by {
        choices = choices.with_group_by(group_by.clone());
    }
    if let Some(x) = &args.x {
        choices.x = Some(x.clone());
    }
    if let Some(y) = &args.y {
        choices.y = Some(y.clone());
    }
    if let Some(color) = &args.color {
        choices = choices.with_color_by(color.clone());
    }
    choices
}

fn print_report(report: &GeneralReport) {
    let source = &report.source;
    println!(
        "{} {} ({} rows x {} columns, {})",
        "Analyzed".cyan().bold(),
        source.file.white(),
        source.row_count,
        source.column_count,
        source.format
    );

    // Preview
    println!();
    println!("{}", "Preview:".yellow().bold());
    println!("  {}", report.preview.headers.join(" | "));
    for row in &report.preview.rows {
        println!("  {}", row.join(" | "));
    }
    if report.preview.truncated {
        println!(
            "  {}",
            format!(
                "... {} more rows",
                report.preview.total_rows - report.preview.rows.len()
            )
            .dimmed()
        );
    }

    // Column summary
    println!();
    println!("{}", "Columns:".yellow().bold());
    for column in &report.quality.columns {
        let class = if report.classification.is_numeric(&column.name) {
            "numeric".blue()
        } else {
            "categorical".magenta()
        };
        let mean = column.numeric.as_ref().map(|n| n.mean);
        let std_dev = column.numeric.as_ref().and_then(|n| n.std_dev);
        println!(
            "  {:20} {:10} {:12} {:>6} present  mean {}  sd {}",
            column.name,
            column.column_type.to_string(),
            class,
            column.non_null_count,
            format_optional(mean, 2),
            format_optional(std_dev, 2)
        );
    }

    // Missing values
    println!();
    if report.quality.missing.is_empty() {
        println!("{}", "No missing values found".green());
    } else {
        println!("{}", "Missing values:".yellow().bold());
        for entry in &report.quality.missing.entries {
            println!(
                "  {:20} {:>6} {:>7.2}%",
                entry.column,
                entry.missing_count.to_string().red(),
                entry.missing_percentage
            );
        }
    }

    // Chart
    println!();
    match &report.chart {
        ChartOutcome::Rendered { chart, .. } => print_chart(chart),
        ChartOutcome::Skipped { analysis, reason } => {
            println!("{} {} chart: {}", "Skipped".red().bold(), analysis, reason);
        }
    }

    print_warnings(&report.warnings);
}

fn print_chart(chart: &ChartSpec) {
    println!("{} {}", "Chart:".yellow().bold(), chart.title().white().bold());

    match chart {
        ChartSpec::Heatmap { columns, matrix, .. } => {
            let header: String = columns.iter().map(|c| format!("{:>12}", c)).collect();
            println!("  {:12} {}", "", header);
            for (name, row) in columns.iter().zip(matrix) {
                let cells: String = row
                    .iter()
                    .map(|v| format!("{:>12}", format_optional(*v, 2)))
                    .collect();
                println!("  {:12} {}", name, cells);
            }
        }
        ChartSpec::Histogram { edges, series, .. } => {
            if let (Some(low), Some(high)) = (edges.first(), edges.last()) {
                println!("  {} bins over [{:.2}, {:.2}]", edges.len() - 1, low, high);
            }
            for s in series {
                let label = s.group.as_deref().unwrap_or("all");
                let median = s.box_summary.as_ref().map(|b| b.median);
                let iqr = s.box_summary.as_ref().map(|b| b.iqr());
                println!(
                    "  {:12} n={:<6} median {}  iqr {}",
                    label,
                    s.counts.iter().sum::<usize>(),
                    format_optional(median, 2),
                    format_optional(iqr, 2)
                );
            }
        }
        ChartSpec::Bar { categories, series, .. } => {
            for s in series {
                if let Some(group) = &s.group {
                    println!("  {}", group.bold());
                }
                for (category, count) in categories.iter().zip(&s.counts) {
                    println!("    {:20} {}", category, count);
                }
            }
        }
        ChartSpec::Scatter { x, y, points, .. } => {
            println!("  {} points ({} on x, {} on y)", points.len(), x, y);
        }
    }
}
