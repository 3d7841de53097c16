use std::sync::Arc;

use serde::Serialize;

use super::{checked_difference, checked_total, ensure_belongs, round_to};
use crate::departments::Department;
use crate::reports::report_type::ReportType;
use crate::reports::sources::{BudgetLedger, BudgetLine, EmployeeDirectory};
use crate::reports::strategy::{
    ReportComputationError, ReportData, ReportRow, ReportStrategy, ReportSummary,
};

/// Budget lines with spend against allocation. Line owners are resolved
/// through the employee directory and must belong to the same department.
pub struct BudgetStrategy {
    ledger: Arc<dyn BudgetLedger>,
    employees: Arc<dyn EmployeeDirectory>,
}

#[derive(Serialize)]
struct BudgetRow<'a> {
    line_id: u64,
    category: &'a str,
    allocated: u64,
    spent: u64,
    remaining: i64,
    owner: Option<String>,
}

impl BudgetStrategy {
    pub fn new(ledger: Arc<dyn BudgetLedger>, employees: Arc<dyn EmployeeDirectory>) -> Self {
        Self { ledger, employees }
    }

    fn owner_name(
        &self,
        department: &Department,
        line: &BudgetLine,
    ) -> Result<Option<String>, ReportComputationError> {
        let Some(owner_id) = line.owner_employee_id else {
            return Ok(None);
        };

        let owner = self.employees.employee(owner_id)?.ok_or_else(|| {
            ReportComputationError::Inconsistent(format!(
                "budget line {} references missing employee {owner_id}",
                line.id
            ))
        })?;
        ensure_belongs(department, owner.department_id, format!("employee {owner_id}"))?;

        Ok(Some(owner.name))
    }
}

impl ReportStrategy for BudgetStrategy {
    fn report_type(&self) -> ReportType {
        ReportType::Budget
    }

    fn compute(&self, department: &Department) -> Result<ReportData, ReportComputationError> {
        let mut lines = self.ledger.lines_for(department.id)?;
        lines.sort_by_key(|line| line.id);

        let mut rows = Vec::with_capacity(lines.len());
        for line in &lines {
            let label = format!("budget line {}", line.id);
            ensure_belongs(department, line.department_id, &label)?;
            rows.push(ReportRow::from_record(&BudgetRow {
                line_id: line.id,
                category: &line.category,
                allocated: line.allocated,
                spent: line.spent,
                remaining: checked_difference(&label, line.allocated, line.spent)?,
                owner: self.owner_name(department, line)?,
            })?);
        }

        let allocated = checked_total("total_allocated", lines.iter().map(|line| line.allocated))?;
        let spent = checked_total("total_spent", lines.iter().map(|line| line.spent))?;
        let remaining = checked_difference("total_remaining", allocated, spent)?;
        let utilisation = if allocated == 0 {
            0.0
        } else {
            round_to(spent as f64 * 100.0 / allocated as f64, 1)
        };

        let summary = ReportSummary::default()
            .with("lines", lines.len())
            .with("total_allocated", allocated)
            .with("total_spent", spent)
            .with("total_remaining", remaining)
            .with("utilisation_pct", utilisation);

        Ok(ReportData { rows, summary })
    }
}
