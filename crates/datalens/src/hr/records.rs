//! Employee records and their on-disk CSV layout.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dataset::{Column, ColumnValues, Dataset};
use crate::error::{DatalensError, Result};

pub const EMPLOYEE_ID: &str = "EmployeeID";
pub const DEPARTMENT: &str = "Department";
pub const AGE: &str = "Age";
pub const TENURE_YEARS: &str = "Tenure_Years";
pub const MONTHLY_SALARY: &str = "Monthly_Salary";
pub const PERFORMANCE_RATING: &str = "Performance_Rating";
pub const IS_ACTIVE: &str = "Is_Active";
pub const TURNOVER_RISK_SCORE: &str = "Turnover_Risk_Score";

/// Highest performance rating; the risk score measures the distance from it.
const RATING_CEILING: f64 = 6.0;

/// One employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "EmployeeID")]
    pub employee_id: u32,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Tenure_Years")]
    pub tenure_years: f64,
    #[serde(rename = "Monthly_Salary")]
    pub monthly_salary: f64,
    /// Rating from 1 (lowest) to 5.
    #[serde(rename = "Performance_Rating")]
    pub performance_rating: u8,
    #[serde(rename = "Is_Active", deserialize_with = "deserialize_flag")]
    pub is_active: bool,
}

impl EmployeeRecord {
    /// `(6 - performance) / tenure`, undefined for zero tenure.
    pub fn turnover_risk_score(&self) -> Option<f64> {
        if self.tenure_years > 0.0 {
            Some((RATING_CEILING - f64::from(self.performance_rating)) * (1.0 / self.tenure_years))
        } else {
            None
        }
    }

    fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.performance_rating) {
            return Err(DatalensError::Schema(format!(
                "employee {}: performance rating {} outside 1-5",
                self.employee_id, self.performance_rating
            )));
        }
        if !self.tenure_years.is_finite() || self.tenure_years < 0.0 {
            return Err(DatalensError::Schema(format!(
                "employee {}: invalid tenure {}",
                self.employee_id, self.tenure_years
            )));
        }
        Ok(())
    }
}

/// Accept the boolean spellings spreadsheet tools write.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid Is_Active value '{}'", other))),
    }
}

/// Read employee records from CSV data with the standard column names.
///
/// Extra columns (such as a previously exported risk score) are ignored.
pub fn read_employees<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: EmployeeRecord = row?;
        record.validate()?;
        records.push(record);
    }
    Ok(records)
}

/// Load employee records from a CSV file.
pub fn load_employees(path: impl AsRef<Path>) -> Result<Vec<EmployeeRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatalensError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_employees(file)
}

/// Serialize records as CSV, appending the derived risk score column.
pub fn employees_to_csv(records: &[EmployeeRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        EMPLOYEE_ID,
        DEPARTMENT,
        AGE,
        TENURE_YEARS,
        MONTHLY_SALARY,
        PERFORMANCE_RATING,
        IS_ACTIVE,
        TURNOVER_RISK_SCORE,
    ])?;

    for r in records {
        writer.write_record([
            r.employee_id.to_string(),
            r.department.clone(),
            r.age.to_string(),
            r.tenure_years.to_string(),
            r.monthly_salary.to_string(),
            r.performance_rating.to_string(),
            r.is_active.to_string(),
            r.turnover_risk_score().map(|s| s.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.into_inner().map_err(|e| DatalensError::Io {
        path: "<memory>".into(),
        source: e.into_error(),
    })
}

/// Build a typed dataset from records, including the risk score column.
pub fn employees_to_dataset(records: &[EmployeeRecord]) -> Result<Dataset> {
    Dataset::new(vec![
        Column::new(
            EMPLOYEE_ID,
            ColumnValues::Integer(records.iter().map(|r| Some(i64::from(r.employee_id))).collect()),
        ),
        Column::new(
            DEPARTMENT,
            ColumnValues::Text(records.iter().map(|r| Some(r.department.clone())).collect()),
        ),
        Column::new(
            AGE,
            ColumnValues::Integer(records.iter().map(|r| Some(i64::from(r.age))).collect()),
        ),
        Column::new(
            TENURE_YEARS,
            ColumnValues::Float(records.iter().map(|r| Some(r.tenure_years)).collect()),
        ),
        Column::new(
            MONTHLY_SALARY,
            ColumnValues::Float(records.iter().map(|r| Some(r.monthly_salary)).collect()),
        ),
        Column::new(
            PERFORMANCE_RATING,
            ColumnValues::Integer(
                records
                    .iter()
                    .map(|r| Some(i64::from(r.performance_rating)))
                    .collect(),
            ),
        ),
        Column::new(
            IS_ACTIVE,
            ColumnValues::Boolean(records.iter().map(|r| Some(r.is_active)).collect()),
        ),
        Column::new(
            TURNOVER_RISK_SCORE,
            ColumnValues::Float(records.iter().map(EmployeeRecord::turnover_risk_score).collect()),
        ),
    ])
}
