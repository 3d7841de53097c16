mod budget;
mod headcount;
mod payroll;

pub use budget::BudgetStrategy;
pub use headcount::HeadcountStrategy;
pub use payroll::PayrollStrategy;

use super::strategy::ReportComputationError;
use crate::departments::{Department, DepartmentId};

/// A record returned for the wrong department is a data fault.
fn ensure_belongs(
    department: &Department,
    owner: DepartmentId,
    record: impl std::fmt::Display,
) -> Result<(), ReportComputationError> {
    if owner == department.id {
        Ok(())
    } else {
        Err(ReportComputationError::Inconsistent(format!(
            "{record} belongs to department {owner}, not {}",
            department.id
        )))
    }
}

fn checked_total(
    metric: &str,
    values: impl IntoIterator<Item = u64>,
) -> Result<u64, ReportComputationError> {
    values
        .into_iter()
        .try_fold(0u64, |total, value| total.checked_add(value))
        .ok_or_else(|| {
            ReportComputationError::Inconsistent(format!("{metric} exceeds the supported range"))
        })
}

fn checked_difference(
    metric: &str,
    minuend: u64,
    subtrahend: u64,
) -> Result<i64, ReportComputationError> {
    i64::try_from(i128::from(minuend) - i128::from(subtrahend)).map_err(|_| {
        ReportComputationError::Inconsistent(format!("{metric} exceeds the supported range"))
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
