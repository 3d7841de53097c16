use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Department, DepartmentDraft, DepartmentId};
use super::store::{DepartmentStore, StoreError};
use super::validation::{validate, ValidationErrors};

/// CRUD facade validating drafts before they reach the store.
pub struct DepartmentService<S> {
    store: Arc<S>,
}

impl<S> DepartmentService<S>
where
    S: DepartmentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Department>, DepartmentServiceError> {
        let mut departments = self.store.all()?;
        departments.sort_by_key(|department| department.id);
        Ok(departments)
    }

    pub fn get(&self, id: DepartmentId) -> Result<Department, DepartmentServiceError> {
        let department = self.store.find(id)?.ok_or(StoreError::NotFound(id))?;
        Ok(department)
    }

    pub fn create(&self, draft: DepartmentDraft) -> Result<Department, DepartmentServiceError> {
        let fields = validate(&draft)?;
        let department = self.store.create(fields)?;
        info!(department_id = %department.id, "department created");
        Ok(department)
    }

    /// Validation runs before the existence check, so a bad payload against a
    /// missing id reports the field errors.
    pub fn update(
        &self,
        id: DepartmentId,
        draft: DepartmentDraft,
    ) -> Result<Department, DepartmentServiceError> {
        let fields = validate(&draft)?;
        let department = self.store.update(id, fields)?;
        debug!(department_id = %id, "department updated");
        Ok(department)
    }

    pub fn delete(&self, id: DepartmentId) -> Result<(), DepartmentServiceError> {
        self.store.delete(id)?;
        info!(department_id = %id, "department deleted");
        Ok(())
    }
}

/// Error raised by the department service.
#[derive(Debug, thiserror::Error)]
pub enum DepartmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}
