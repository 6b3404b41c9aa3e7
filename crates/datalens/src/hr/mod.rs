//! Workforce analytics over employee records.

mod generator;
mod metrics;
mod records;

pub use generator::{
    employees_for_seed, generate_employees, sample_employees, DEFAULT_EMPLOYEE_COUNT,
    DEFAULT_SEED, DEPARTMENTS, FIRST_EMPLOYEE_ID,
};
pub use metrics::{
    department_counts, departments, top_risk, DepartmentCount, DepartmentFilter, HrKpis,
    RiskEntry, DEFAULT_TOP_RISK,
};
pub use records::{
    employees_to_csv, employees_to_dataset, load_employees, read_employees, EmployeeRecord, AGE,
    DEPARTMENT, EMPLOYEE_ID, IS_ACTIVE, MONTHLY_SALARY, PERFORMANCE_RATING, TENURE_YEARS,
    TURNOVER_RISK_SCORE,
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chart::{build_chart, AnalysisType, ChartChoices, ChartOutcome};
use crate::classify::ColumnClassification;
use crate::error::Result;

/// Everything shown on the workforce page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrReport {
    /// Departments present in the full dataset.
    pub departments: Vec<String>,
    pub filter: DepartmentFilter,
    pub kpis: HrKpis,
    pub top_risk: Vec<RiskEntry>,
    pub department_counts: Vec<DepartmentCount>,
    /// Monthly salary against performance rating, colored by department.
    pub salary_performance: ChartOutcome,
    /// Risk score histogram grouped by department.
    pub risk_distribution: ChartOutcome,
    pub warnings: Vec<String>,
}

impl HrReport {
    /// Build the report for `filter` applied to `all`.
    ///
    /// KPIs, rankings and charts describe the filtered subset; the attrition
    /// rate always describes `all`.
    pub fn build(
        all: &[EmployeeRecord],
        filter: &DepartmentFilter,
        top_n: usize,
        bins: usize,
    ) -> Result<Self> {
        let filtered = filter.apply(all);
        let mut warnings = Vec::new();

        if filtered.is_empty() {
            warn!(filter = %filter, "no employees match the department filter");
            warnings.push("No employees match the selected departments".to_string());
        }

        let dataset = employees_to_dataset(&filtered)?;
        let classification = ColumnClassification::classify(&dataset);

        let salary_performance = build_chart(
            &dataset,
            &classification,
            AnalysisType::Relationship,
            &ChartChoices::new()
                .with_axes(MONTHLY_SALARY, PERFORMANCE_RATING)
                .with_color_by(DEPARTMENT),
            bins,
        );
        let risk_distribution = build_chart(
            &dataset,
            &classification,
            AnalysisType::Distribution,
            &ChartChoices::new()
                .with_column(TURNOVER_RISK_SCORE)
                .with_group_by(DEPARTMENT),
            bins,
        );
        for outcome in [&salary_performance, &risk_distribution] {
            if let Some(reason) = outcome.skip_reason() {
                warnings.push(reason.to_string());
            }
        }

        let report = Self {
            departments: departments(all),
            filter: filter.clone(),
            kpis: HrKpis::compute(&filtered, all),
            top_risk: top_risk(&filtered, top_n),
            department_counts: department_counts(&filtered),
            salary_performance,
            risk_distribution,
            warnings,
        };

        info!(
            headcount = report.kpis.headcount,
            total = all.len(),
            "workforce report built"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartSpec, DEFAULT_BINS};

    #[test]
    fn test_report_on_sample() {
        let report = HrReport::build(
            sample_employees(),
            &DepartmentFilter::All,
            DEFAULT_TOP_RISK,
            DEFAULT_BINS,
        )
        .unwrap();

        assert_eq!(report.kpis.headcount, 49);
        assert_eq!(report.top_risk.len(), 10);
        assert!(report.warnings.is_empty());
        assert_eq!(
            report.department_counts.iter().map(|c| c.headcount).sum::<usize>(),
            49
        );

        match report.salary_performance.chart() {
            Some(ChartSpec::Scatter { x, y, points, .. }) => {
                assert_eq!(x, MONTHLY_SALARY);
                assert_eq!(y, PERFORMANCE_RATING);
                assert_eq!(points.len(), 49);
            }
            other => panic!("unexpected chart: {:?}", other),
        }
        assert_eq!(report.risk_distribution.chart().map(ChartSpec::kind), Some("histogram"));
    }

    #[test]
    fn test_empty_filter_warns() {
        let report = HrReport::build(
            sample_employees(),
            &DepartmentFilter::only(Vec::<String>::new()),
            DEFAULT_TOP_RISK,
            DEFAULT_BINS,
        )
        .unwrap();

        assert_eq!(report.kpis.headcount, 0);
        assert!(report.top_risk.is_empty());
        assert!(report.department_counts.is_empty());
        assert_eq!(report.departments.len(), 5);
        assert!(!report.warnings.is_empty());
    }
}
