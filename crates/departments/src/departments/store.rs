use super::domain::{Department, DepartmentFields, DepartmentId};

/// Storage abstraction for department records. The report core only ever
/// calls `find`; the CRUD service uses the rest.
pub trait DepartmentStore: Send + Sync {
    fn all(&self) -> Result<Vec<Department>, StoreError>;
    fn find(&self, id: DepartmentId) -> Result<Option<Department>, StoreError>;
    fn create(&self, fields: DepartmentFields) -> Result<Department, StoreError>;
    fn update(&self, id: DepartmentId, fields: DepartmentFields) -> Result<Department, StoreError>;
    fn delete(&self, id: DepartmentId) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("department {0} not found")]
    NotFound(DepartmentId),
    #[error("department store unavailable: {0}")]
    Unavailable(String),
}
