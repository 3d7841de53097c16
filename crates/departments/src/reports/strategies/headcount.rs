use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::ensure_belongs;
use crate::departments::Department;
use crate::reports::report_type::ReportType;
use crate::reports::sources::EmployeeDirectory;
use crate::reports::strategy::{
    ReportComputationError, ReportData, ReportRow, ReportStrategy, ReportSummary,
};

/// Employees grouped by position, alphabetically.
pub struct HeadcountStrategy {
    employees: Arc<dyn EmployeeDirectory>,
}

#[derive(Serialize)]
struct PositionRow<'a> {
    position: &'a str,
    employees: usize,
}

impl HeadcountStrategy {
    pub fn new(employees: Arc<dyn EmployeeDirectory>) -> Self {
        Self { employees }
    }
}

impl ReportStrategy for HeadcountStrategy {
    fn report_type(&self) -> ReportType {
        ReportType::Headcount
    }

    fn compute(&self, department: &Department) -> Result<ReportData, ReportComputationError> {
        let employees = self.employees.employees_of(department.id)?;

        let mut by_position: BTreeMap<&str, usize> = BTreeMap::new();
        for employee in &employees {
            let label = format!("employee {}", employee.id);
            ensure_belongs(department, employee.department_id, label)?;
            *by_position.entry(employee.position.as_str()).or_default() += 1;
        }

        let rows = by_position
            .iter()
            .map(|(position, employees)| {
                ReportRow::from_record(&PositionRow {
                    position,
                    employees: *employees,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let summary = ReportSummary::default()
            .with("total_employees", employees.len())
            .with("distinct_positions", by_position.len());

        Ok(ReportData { rows, summary })
    }
}
