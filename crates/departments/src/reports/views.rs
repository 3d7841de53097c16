use serde::Serialize;

use super::strategy::{ReportRow, ReportSummary};
use crate::departments::{Department, DepartmentId};

/// Department snapshot carried in a report envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub id: DepartmentId,
    pub name: String,
}

impl From<&Department> for DepartmentSummary {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
        }
    }
}

/// Complete response of one report request. Rows and summary are always
/// serialized, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEnvelope {
    pub department: DepartmentSummary,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}
