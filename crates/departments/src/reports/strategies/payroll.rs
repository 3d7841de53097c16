use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{checked_total, ensure_belongs, round_to};
use crate::departments::Department;
use crate::reports::report_type::ReportType;
use crate::reports::sources::{EmployeeDirectory, EmployeeId};
use crate::reports::strategy::{
    ReportComputationError, ReportData, ReportRow, ReportStrategy, ReportSummary,
};

/// One row per employee, ordered by employee id, with salary aggregates.
pub struct PayrollStrategy {
    employees: Arc<dyn EmployeeDirectory>,
}

#[derive(Serialize)]
struct PayrollRow<'a> {
    employee_id: EmployeeId,
    name: &'a str,
    position: &'a str,
    salary: u64,
}

impl PayrollStrategy {
    pub fn new(employees: Arc<dyn EmployeeDirectory>) -> Self {
        Self { employees }
    }
}

impl ReportStrategy for PayrollStrategy {
    fn report_type(&self) -> ReportType {
        ReportType::Payroll
    }

    fn compute(&self, department: &Department) -> Result<ReportData, ReportComputationError> {
        let mut employees = self.employees.employees_of(department.id)?;
        employees.sort_by_key(|employee| employee.id);

        let mut rows = Vec::with_capacity(employees.len());
        for employee in &employees {
            let label = format!("employee {}", employee.id);
            ensure_belongs(department, employee.department_id, label)?;
            rows.push(ReportRow::from_record(&PayrollRow {
                employee_id: employee.id,
                name: &employee.name,
                position: &employee.position,
                salary: employee.salary,
            })?);
        }

        let total = checked_total(
            "total_salary",
            employees.iter().map(|employee| employee.salary),
        )?;
        let highest = employees.iter().map(|employee| employee.salary).max();
        let lowest = employees.iter().map(|employee| employee.salary).min();
        let average = if employees.is_empty() {
            Value::from(0u64)
        } else {
            Value::from(round_to(total as f64 / employees.len() as f64, 2))
        };

        let summary = ReportSummary::default()
            .with("employees", employees.len())
            .with("total_salary", total)
            .with("average_salary", average)
            .with("highest_salary", highest.unwrap_or_default())
            .with("lowest_salary", lowest.unwrap_or_default());

        Ok(ReportData { rows, summary })
    }
}
