//! HR command - workforce KPIs and turnover-risk ranking.

use std::path::PathBuf;

use colored::Colorize;
use datalens::hr::DEFAULT_SEED;
use datalens::{Dashboard, DashboardConfig, DepartmentFilter, EmployeeSource, HrReport};

use super::{format_optional, print_warnings};

pub fn run(
    file: Option<PathBuf>,
    departments: Option<Vec<String>>,
    seed: Option<u64>,
    top: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::with_config(DashboardConfig::default().with_top_risk(top));

    let source = match file {
        Some(path) => {
            if !path.exists() {
                return Err(format!("File not found: {}", path.display()).into());
            }
            EmployeeSource::File(path)
        }
        None => EmployeeSource::Generated { seed },
    };
    let filter = department_filter(departments);

    let employees = dashboard.load_employees(&source)?;
    let report = dashboard.hr_report(&employees, &filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let origin = match &source {
        EmployeeSource::File(path) => path.display().to_string(),
        _ => format!("synthetic data (seed {})", seed.unwrap_or(DEFAULT_SEED)),
    };
    print_report(&report, &origin, employees.len());
    Ok(())
}

/// No `--departments` flag selects everything.
fn department_filter(departments: Option<Vec<String>>) -> DepartmentFilter {
    match departments {
        None => DepartmentFilter::All,
        Some(list) => DepartmentFilter::only(
            list.into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        ),
    }
}

fn print_report(report: &HrReport, origin: &str, total: usize) {
    println!(
        "{} {} ({} employees, departments: {})",
        "Workforce".cyan().bold(),
        origin.white(),
        total,
        report.filter
    );

    let kpis = &report.kpis;
    println!();
    println!("{}", "KPIs:".yellow().bold());
    println!("  {:24} {}", "Headcount", kpis.headcount.to_string().white().bold());
    println!("  {:24} {}", "Mean monthly salary", format_optional(kpis.mean_salary, 0));
    println!("  {:24} {} years", "Mean tenure", format_optional(kpis.mean_tenure, 1));
    println!(
        "  {:24} {}",
        "Company attrition",
        format!("{:.1}%", kpis.attrition_rate).red()
    );

    if !report.department_counts.is_empty() {
        println!();
        println!("{}", "Headcount by department:".yellow().bold());
        for count in &report.department_counts {
            println!("  {:16} {}", count.department, count.headcount);
        }
    }

    if !report.top_risk.is_empty() {
        println!();
        println!("{}", "Highest turnover risk:".yellow().bold());
        println!(
            "  {:>10} {:16} {:>11} {:>7} {:>6}",
            "EmployeeID", "Department", "Performance", "Tenure", "Risk"
        );
        for entry in &report.top_risk {
            println!(
                "  {:>10} {:16} {:>11} {:>7} {:>6}",
                entry.employee_id,
                entry.department,
                entry.performance_rating,
                entry.tenure_years,
                format!("{:.2}", entry.risk_score).red()
            );
        }
    }

    print_warnings(&report.warnings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_filter_from_flags() {
        assert_eq!(department_filter(None), DepartmentFilter::All);
        assert_eq!(
            department_filter(Some(vec![" Sales ".into(), "".into()])),
            DepartmentFilter::only(["Sales"])
        );
    }
}
