use std::sync::Arc;

use tracing::{debug, warn};

use super::registry::{RegistryError, ReportRegistry};
use super::report_type::{ReportType, UnknownReportType};
use super::strategy::ReportComputationError;
use super::views::{DepartmentSummary, ReportEnvelope};
use crate::departments::{DepartmentId, DepartmentStore, StoreError};

/// Stateless entry point for report generation. Holds only shared read-only
/// collaborators, so one instance serves concurrent requests.
pub struct ReportDispatcher<S> {
    store: Arc<S>,
    registry: Arc<ReportRegistry>,
}

impl<S> ReportDispatcher<S>
where
    S: DepartmentStore + 'static,
{
    pub fn new(store: Arc<S>, registry: Arc<ReportRegistry>) -> Self {
        Self { store, registry }
    }

    pub fn report_types(&self) -> [ReportType; 3] {
        ReportType::values()
    }

    /// Resolves the selector first; an unknown selector is reported even
    /// when the department does not exist.
    pub fn generate(
        &self,
        department_id: DepartmentId,
        raw_report_type: &str,
    ) -> Result<ReportEnvelope, ReportError> {
        let report_type = ReportType::parse(raw_report_type)?;
        let strategy = self
            .registry
            .strategy(report_type)
            .ok_or(RegistryError::MissingStrategy(report_type))?;

        let department = match self.store.find(department_id) {
            Ok(Some(department)) => department,
            Ok(None) | Err(StoreError::NotFound(_)) => {
                return Err(ReportError::DepartmentNotFound(department_id))
            }
            Err(err) => return Err(err.into()),
        };

        let data = strategy.compute(&department).map_err(|source| {
            warn!(%department_id, %report_type, error = %source, "report computation failed");
            ReportError::Computation {
                report_type,
                source,
            }
        })?;

        debug!(
            %department_id,
            %report_type,
            rows = data.rows.len(),
            "report generated"
        );

        Ok(ReportEnvelope {
            department: DepartmentSummary::from(&department),
            rows: data.rows,
            summary: data.summary,
        })
    }
}

/// Error raised by the report dispatcher. Each failure class has its own
/// variant so callers never need to inspect messages.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    UnknownReportType(#[from] UnknownReportType),
    #[error("department {0} not found")]
    DepartmentNotFound(DepartmentId),
    #[error("failed to compute {report_type} report: {source}")]
    Computation {
        report_type: ReportType,
        #[source]
        source: ReportComputationError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
