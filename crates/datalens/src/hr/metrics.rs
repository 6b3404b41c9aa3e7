//! Workforce KPIs, department filtering and turnover-risk ranking.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::records::EmployeeRecord;
use crate::quality::percentage;
use crate::stats::mean;

/// Default length of the top-risk table.
pub const DEFAULT_TOP_RISK: usize = 10;

/// Which departments to include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(IndexSet<String>),
}

impl DepartmentFilter {
    pub fn only<I, S>(departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DepartmentFilter::Only(departments.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, department: &str) -> bool {
        match self {
            DepartmentFilter::All => true,
            DepartmentFilter::Only(set) => set.contains(department),
        }
    }

    /// Records whose department passes the filter, in their original order.
    pub fn apply(&self, records: &[EmployeeRecord]) -> Vec<EmployeeRecord> {
        records
            .iter()
            .filter(|r| self.matches(&r.department))
            .cloned()
            .collect()
    }
}

impl FromStr for DepartmentFilter {
    type Err = String;

    /// Parse a comma-separated list; `all` selects every department.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DepartmentFilter::All);
        }
        Ok(DepartmentFilter::only(
            s.split(',').map(str::trim).filter(|d| !d.is_empty()),
        ))
    }
}

impl fmt::Display for DepartmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentFilter::All => write!(f, "all"),
            DepartmentFilter::Only(set) => {
                let names: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", names.join(","))
            }
        }
    }
}

/// Headline workforce numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrKpis {
    /// Employees in the filtered subset.
    pub headcount: usize,
    pub mean_salary: Option<f64>,
    pub mean_tenure: Option<f64>,
    /// Company-wide share of inactive employees, in percent. Ignores the filter.
    pub attrition_rate: f64,
}

impl HrKpis {
    pub fn compute(filtered: &[EmployeeRecord], all: &[EmployeeRecord]) -> Self {
        let salaries: Vec<f64> = filtered.iter().map(|r| r.monthly_salary).collect();
        let tenures: Vec<f64> = filtered.iter().map(|r| r.tenure_years).collect();
        let inactive = all.iter().filter(|r| !r.is_active).count();

        Self {
            headcount: filtered.len(),
            mean_salary: mean(&salaries),
            mean_tenure: mean(&tenures),
            attrition_rate: percentage(inactive, all.len()),
        }
    }
}

/// A row of the top-risk table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    #[serde(rename = "EmployeeID")]
    pub employee_id: u32,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Performance_Rating")]
    pub performance_rating: u8,
    #[serde(rename = "Tenure_Years")]
    pub tenure_years: f64,
    #[serde(rename = "Turnover_Risk_Score")]
    pub risk_score: f64,
}

/// The `n` highest risk scores, descending. Equal scores keep record order;
/// records without a score are left out.
pub fn top_risk(records: &[EmployeeRecord], n: usize) -> Vec<RiskEntry> {
    let mut scored: Vec<RiskEntry> = records
        .iter()
        .filter_map(|r| {
            Some(RiskEntry {
                risk_score: r.turnover_risk_score()?,
                employee_id: r.employee_id,
                department: r.department.clone(),
                performance_rating: r.performance_rating,
                tenure_years: r.tenure_years,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(n);
    scored
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub headcount: usize,
}

/// Headcount per department, sorted by department name.
pub fn department_counts(records: &[EmployeeRecord]) -> Vec<DepartmentCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.department.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(department, headcount)| DepartmentCount {
            department: department.to_string(),
            headcount,
        })
        .collect()
}

/// Distinct departments in first-appearance order.
pub fn departments(records: &[EmployeeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.department.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
