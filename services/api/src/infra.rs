use chrono::Utc;
use departments::config::SeedConfig;
use departments::departments::{
    Department, DepartmentApi, DepartmentFields, DepartmentId, DepartmentService, DepartmentStore,
    StoreError,
};
use departments::error::AppError;
use departments::reports::{
    BudgetLedger, BudgetLine, Employee, EmployeeDirectory, EmployeeId, ReportDispatcher,
    ReportRegistry, SourceError,
};
use departments::roster::RosterImporter;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct StoreState {
    records: BTreeMap<DepartmentId, Department>,
    last_id: u64,
}

#[derive(Default)]
pub(crate) struct InMemoryDepartmentStore {
    state: RwLock<StoreState>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("department store lock poisoned".to_string())
}

impl DepartmentStore for InMemoryDepartmentStore {
    fn all(&self) -> Result<Vec<Department>, StoreError> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.records.values().cloned().collect())
    }

    fn find(&self, id: DepartmentId) -> Result<Option<Department>, StoreError> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.records.get(&id).cloned())
    }

    fn create(&self, fields: DepartmentFields) -> Result<Department, StoreError> {
        let mut guard = self.state.write().map_err(poisoned)?;
        guard.last_id += 1;
        let now = Utc::now();
        let department = Department {
            id: DepartmentId(guard.last_id),
            name: fields.name,
            address: fields.address,
            created_at: now,
            updated_at: now,
        };
        guard.records.insert(department.id, department.clone());
        Ok(department)
    }

    fn update(&self, id: DepartmentId, fields: DepartmentFields) -> Result<Department, StoreError> {
        let mut guard = self.state.write().map_err(poisoned)?;
        let department = guard.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        department.name = fields.name;
        department.address = fields.address;
        department.updated_at = Utc::now();
        Ok(department.clone())
    }

    fn delete(&self, id: DepartmentId) -> Result<(), StoreError> {
        let mut guard = self.state.write().map_err(poisoned)?;
        guard
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

/// Employees and budget lines loaded once at startup; never mutated.
pub(crate) struct InMemoryRoster {
    employees: BTreeMap<EmployeeId, Employee>,
    lines: Vec<BudgetLine>,
}

impl InMemoryRoster {
    pub(crate) fn new(employees: Vec<Employee>, lines: Vec<BudgetLine>) -> Self {
        Self {
            employees: employees
                .into_iter()
                .map(|employee| (employee.id, employee))
                .collect(),
            lines,
        }
    }
}

impl EmployeeDirectory for InMemoryRoster {
    fn employees_of(&self, department: DepartmentId) -> Result<Vec<Employee>, SourceError> {
        Ok(self
            .employees
            .values()
            .filter(|employee| employee.department_id == department)
            .cloned()
            .collect())
    }

    fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, SourceError> {
        Ok(self.employees.get(&id).cloned())
    }
}

impl BudgetLedger for InMemoryRoster {
    fn lines_for(&self, department: DepartmentId) -> Result<Vec<BudgetLine>, SourceError> {
        Ok(self
            .lines
            .iter()
            .filter(|line| line.department_id == department)
            .cloned()
            .collect())
    }
}

/// Loads the configured CSV exports into fresh in-memory collaborators.
pub(crate) fn seed(
    config: &SeedConfig,
) -> Result<(Arc<InMemoryDepartmentStore>, Arc<InMemoryRoster>), AppError> {
    let store = Arc::new(InMemoryDepartmentStore::default());
    if let Some(path) = &config.departments_csv {
        for fields in RosterImporter::departments_from_path(path)? {
            store.create(fields)?;
        }
    }

    let employees = match &config.employees_csv {
        Some(path) => RosterImporter::employees_from_path(path)?,
        None => Vec::new(),
    };
    let lines = match &config.budget_csv {
        Some(path) => RosterImporter::budget_from_path(path)?,
        None => Vec::new(),
    };

    info!(
        departments = store.all()?.len(),
        employees = employees.len(),
        budget_lines = lines.len(),
        "seed data loaded"
    );

    Ok((store, Arc::new(InMemoryRoster::new(employees, lines))))
}

pub(crate) fn build_api(
    store: Arc<InMemoryDepartmentStore>,
    roster: Arc<InMemoryRoster>,
) -> Result<Arc<DepartmentApi<InMemoryDepartmentStore>>, AppError> {
    let registry = ReportRegistry::standard(roster.clone(), roster)?;
    Ok(Arc::new(DepartmentApi::new(
        DepartmentService::new(store.clone()),
        ReportDispatcher::new(store, Arc::new(registry)),
    )))
}
