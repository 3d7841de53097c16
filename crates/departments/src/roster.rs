//! CSV import for seeding departments, employees and budget lines.
//!
//! Department rows carry only `name,address`; stores assign ids in file
//! order, so the first row becomes department 1. Employee and budget rows
//! reference those ids.

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::departments::{validate, DepartmentDraft, DepartmentFields, DepartmentId, ValidationErrors};
use crate::reports::{BudgetLine, Employee, EmployeeId};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDepartment { row: usize, errors: ValidationErrors },
    DuplicateId { kind: &'static str, id: u64 },
}

impl fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {err}"),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {err}"),
            RosterImportError::InvalidDepartment { row, errors } => {
                write!(f, "department on row {row} is invalid: {errors}")
            }
            RosterImportError::DuplicateId { kind, id } => {
                write!(f, "{kind} id {id} appears more than once")
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidDepartment { errors, .. } => Some(errors),
            RosterImportError::DuplicateId { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn departments_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<DepartmentFields>, RosterImportError> {
        Self::departments_from_reader(File::open(path)?)
    }

    pub fn departments_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<DepartmentFields>, RosterImportError> {
        let mut fields = Vec::new();
        for (index, row) in csv_reader(reader).deserialize::<DepartmentRow>().enumerate() {
            let row = row?;
            let draft = DepartmentDraft {
                name: row.name,
                address: row.address,
            };
            let valid = validate(&draft).map_err(|errors| RosterImportError::InvalidDepartment {
                row: index + 1,
                errors,
            })?;
            fields.push(valid);
        }
        Ok(fields)
    }

    pub fn employees_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Employee>, RosterImportError> {
        Self::employees_from_reader(File::open(path)?)
    }

    pub fn employees_from_reader<R: Read>(reader: R) -> Result<Vec<Employee>, RosterImportError> {
        let mut seen = HashSet::new();
        let mut employees = Vec::new();
        for row in csv_reader(reader).deserialize::<EmployeeRow>() {
            let row = row?;
            if !seen.insert(row.id) {
                return Err(RosterImportError::DuplicateId {
                    kind: "employee",
                    id: row.id,
                });
            }
            employees.push(Employee {
                id: EmployeeId(row.id),
                department_id: DepartmentId(row.department_id),
                name: row.name,
                position: row.position,
                salary: row.salary,
            });
        }
        Ok(employees)
    }

    pub fn budget_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<BudgetLine>, RosterImportError> {
        Self::budget_from_reader(File::open(path)?)
    }

    pub fn budget_from_reader<R: Read>(reader: R) -> Result<Vec<BudgetLine>, RosterImportError> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for row in csv_reader(reader).deserialize::<BudgetRow>() {
            let row = row?;
            if !seen.insert(row.id) {
                return Err(RosterImportError::DuplicateId {
                    kind: "budget line",
                    id: row.id,
                });
            }
            lines.push(BudgetLine {
                id: row.id,
                department_id: DepartmentId(row.department_id),
                category: row.category,
                allocated: row.allocated,
                spent: row.spent,
                owner_employee_id: row.owner_employee_id.map(EmployeeId),
            });
        }
        Ok(lines)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

#[derive(Debug, Deserialize)]
struct DepartmentRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    id: u64,
    department_id: u64,
    name: String,
    position: String,
    salary: u64,
}

#[derive(Debug, Deserialize)]
struct BudgetRow {
    id: u64,
    department_id: u64,
    category: String,
    allocated: u64,
    spent: u64,
    #[serde(default, deserialize_with = "empty_u64_as_none")]
    owner_employee_id: Option<u64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_u64_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
