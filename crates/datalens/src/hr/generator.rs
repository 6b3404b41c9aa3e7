//! Seeded synthetic employee data.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use super::records::EmployeeRecord;

/// Seed of the built-in employee dataset.
pub const DEFAULT_SEED: u64 = 42;

/// Size of the built-in employee dataset.
pub const DEFAULT_EMPLOYEE_COUNT: usize = 49;

/// First employee id handed out by the generator.
pub const FIRST_EMPLOYEE_ID: u32 = 101;

pub const DEPARTMENTS: [&str; 5] = ["Sales", "Marketing", "Tech", "Finance", "HR"];

const ACTIVE_PROBABILITY: f64 = 0.85;

static SAMPLE_EMPLOYEES: Lazy<Vec<EmployeeRecord>> =
    Lazy::new(|| generate_employees(DEFAULT_EMPLOYEE_COUNT, DEFAULT_SEED));

/// Generate `count` employees. The same seed always yields the same records.
pub fn generate_employees(count: usize, seed: u64) -> Vec<EmployeeRecord> {
    let mut rng = fastrand::Rng::with_seed(seed);

    (0..count)
        .map(|i| EmployeeRecord {
            employee_id: FIRST_EMPLOYEE_ID + i as u32,
            department: DEPARTMENTS[rng.usize(..DEPARTMENTS.len())].to_string(),
            age: rng.u32(22..58),
            tenure_years: f64::from(rng.u32(1..18)),
            monthly_salary: f64::from(rng.u32(6000..25000)),
            performance_rating: rng.u8(1..=5),
            is_active: rng.f64() < ACTIVE_PROBABILITY,
        })
        .collect()
}

/// The built-in dataset, generated once per process.
pub fn sample_employees() -> &'static [EmployeeRecord] {
    &SAMPLE_EMPLOYEES
}

/// Employees for an optional seed, reusing the built-in dataset for the default.
pub fn employees_for_seed(seed: Option<u64>) -> Cow<'static, [EmployeeRecord]> {
    match seed {
        None | Some(DEFAULT_SEED) => Cow::Borrowed(sample_employees()),
        Some(seed) => Cow::Owned(generate_employees(DEFAULT_EMPLOYEE_COUNT, seed)),
    }
}
