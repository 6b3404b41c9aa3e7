//! CLI command implementations.

pub mod analyze;
pub mod hr;
pub mod samples;
pub mod serve;

use colored::Colorize;

/// Print warnings collected while building a report.
fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    for warning in warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
}

/// Format an optional number, showing a dash when it is undefined.
fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}
