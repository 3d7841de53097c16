//! Department records: validation, storage seam, CRUD service, and the HTTP
//! routes for both CRUD and report generation.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Department, DepartmentDraft, DepartmentFields, DepartmentId, DepartmentResource};
pub use router::{department_router, DepartmentApi};
pub use service::{DepartmentService, DepartmentServiceError};
pub use store::{DepartmentStore, StoreError};
pub use validation::{validate, ValidationErrors};
