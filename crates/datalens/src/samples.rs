//! Built-in datasets that can be explored without a file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DatalensError, Result};
use crate::hr::{employees_to_csv, sample_employees};

const SALES_CSV: &str = include_str!("../data/sales.csv");

/// A named built-in dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sample {
    /// The synthetic workforce dataset.
    Employees,
    /// Small order ledger with gaps in several columns.
    Sales,
}

impl Sample {
    pub const ALL: [Sample; 2] = [Sample::Employees, Sample::Sales];

    pub fn name(self) -> &'static str {
        match self {
            Sample::Employees => "employees",
            Sample::Sales => "sales",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Sample::Employees => "Synthetic workforce records (49 employees, seeded)",
            Sample::Sales => "Order ledger with missing values in several columns",
        }
    }

    /// File name the sample is presented under; its extension selects the parser.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.name())
    }

    /// Raw CSV contents.
    pub fn bytes(self) -> Result<Vec<u8>> {
        match self {
            Sample::Employees => employees_to_csv(sample_employees()),
            Sample::Sales => Ok(SALES_CSV.as_bytes().to_vec()),
        }
    }
}

impl FromStr for Sample {
    type Err = DatalensError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Sample::ALL
            .into_iter()
            .find(|sample| sample.name() == wanted)
            .ok_or_else(|| DatalensError::UnknownSample(s.to_string()))
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!("Sales".parse::<Sample>().unwrap(), Sample::Sales);
        assert_eq!(" employees ".parse::<Sample>().unwrap(), Sample::Employees);
        assert!(matches!(
            "weather".parse::<Sample>(),
            Err(DatalensError::UnknownSample(name)) if name == "weather"
        ));
    }

    #[test]
    fn test_sample_bytes() {
        let sales = Sample::Sales.bytes().unwrap();
        assert!(sales.starts_with(b"OrderID,Region"));

        let employees = Sample::Employees.bytes().unwrap();
        let text = String::from_utf8(employees).unwrap();
        assert_eq!(text.lines().count(), 50);
        assert_eq!(Sample::Employees.file_name(), "employees.csv");
    }
}
