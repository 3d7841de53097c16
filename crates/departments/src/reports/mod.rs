//! On-demand department reports.
//!
//! Callers go through [`ReportDispatcher`]; the selector is checked against
//! [`ReportType`] before the department is looked up, and the matching
//! [`ReportStrategy`] is taken from an immutable [`ReportRegistry`].

mod dispatcher;
mod registry;
mod report_type;
pub mod sources;
pub mod strategies;
mod strategy;
pub mod views;

pub use dispatcher::{ReportDispatcher, ReportError};
pub use registry::{RegistryError, ReportRegistry, ReportRegistryBuilder};
pub use report_type::{ReportType, UnknownReportType};
pub use sources::{BudgetLedger, BudgetLine, Employee, EmployeeDirectory, EmployeeId, SourceError};
pub use strategy::{ReportComputationError, ReportData, ReportRow, ReportStrategy, ReportSummary};
pub use views::{DepartmentSummary, ReportEnvelope};
