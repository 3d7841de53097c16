use serde::{Deserialize, Serialize};
use std::fmt;

use crate::departments::DepartmentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub department_id: DepartmentId,
    pub name: String,
    pub position: String,
    pub salary: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: u64,
    pub department_id: DepartmentId,
    pub category: String,
    pub allocated: u64,
    pub spent: u64,
    #[serde(default)]
    pub owner_employee_id: Option<EmployeeId>,
}

/// Read-only view over employee records.
pub trait EmployeeDirectory: Send + Sync {
    fn employees_of(&self, department: DepartmentId) -> Result<Vec<Employee>, SourceError>;
    fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, SourceError>;
}

/// Read-only view over budget allocations.
pub trait BudgetLedger: Send + Sync {
    fn lines_for(&self, department: DepartmentId) -> Result<Vec<BudgetLine>, SourceError>;
}

/// Failure reaching a report data source.
#[derive(Debug, thiserror::Error)]
#[error("{source_name} unavailable: {reason}")]
pub struct SourceError {
    pub source_name: &'static str,
    pub reason: String,
}

impl SourceError {
    pub fn unavailable(source_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            source_name,
            reason: reason.into(),
        }
    }
}
