use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::departments::{
    department_router, Department, DepartmentApi, DepartmentFields, DepartmentId,
    DepartmentService, DepartmentStore, StoreError,
};
use crate::reports::{
    BudgetLedger, BudgetLine, Employee, EmployeeDirectory, EmployeeId, ReportDispatcher,
    ReportRegistry, SourceError,
};

pub(super) const ADDRESS: &str = "Suite 246 81515 Osinski Manor, East Luke, TX 59690-4605";

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<BTreeMap<DepartmentId, Department>>,
    next_id: Mutex<u64>,
}

impl MemoryStore {
    pub(super) fn seeded(names: &[&str]) -> Arc<Self> {
        let store = Arc::new(Self::default());
        for name in names {
            store
                .create(DepartmentFields {
                    name: name.to_string(),
                    address: ADDRESS.to_string(),
                })
                .expect("seed department");
        }
        store
    }
}

impl DepartmentStore for MemoryStore {
    fn all(&self) -> Result<Vec<Department>, StoreError> {
        Ok(self.records.lock().expect("lock").values().cloned().collect())
    }

    fn find(&self, id: DepartmentId) -> Result<Option<Department>, StoreError> {
        Ok(self.records.lock().expect("lock").get(&id).cloned())
    }

    fn create(&self, fields: DepartmentFields) -> Result<Department, StoreError> {
        let mut next_id = self.next_id.lock().expect("lock");
        *next_id += 1;
        let now = Utc::now();
        let department = Department {
            id: DepartmentId(*next_id),
            name: fields.name,
            address: fields.address,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .expect("lock")
            .insert(department.id, department.clone());
        Ok(department)
    }

    fn update(&self, id: DepartmentId, fields: DepartmentFields) -> Result<Department, StoreError> {
        let mut records = self.records.lock().expect("lock");
        let department = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        department.name = fields.name;
        department.address = fields.address;
        department.updated_at = Utc::now();
        Ok(department.clone())
    }

    fn delete(&self, id: DepartmentId) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("lock")
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

pub(super) struct UnavailableStore;

impl DepartmentStore for UnavailableStore {
    fn all(&self) -> Result<Vec<Department>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find(&self, _id: DepartmentId) -> Result<Option<Department>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn create(&self, _fields: DepartmentFields) -> Result<Department, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _id: DepartmentId, _: DepartmentFields) -> Result<Department, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: DepartmentId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryRoster {
    pub(super) employees: Vec<Employee>,
    pub(super) lines: Vec<BudgetLine>,
}

impl MemoryRoster {
    pub(super) fn for_department(id: DepartmentId) -> Self {
        Self {
            employees: vec![
                Employee {
                    id: EmployeeId(1),
                    department_id: id,
                    name: "Amara Okafor".to_string(),
                    position: "Manager".to_string(),
                    salary: 92_000,
                },
                Employee {
                    id: EmployeeId(2),
                    department_id: id,
                    name: "Jun Park".to_string(),
                    position: "Analyst".to_string(),
                    salary: 61_500,
                },
            ],
            lines: vec![BudgetLine {
                id: 1,
                department_id: id,
                category: "Training".to_string(),
                allocated: 8_000,
                spent: 2_000,
                owner_employee_id: Some(EmployeeId(1)),
            }],
        }
    }
}

impl EmployeeDirectory for MemoryRoster {
    fn employees_of(&self, department: DepartmentId) -> Result<Vec<Employee>, SourceError> {
        Ok(self
            .employees
            .iter()
            .filter(|employee| employee.department_id == department)
            .cloned()
            .collect())
    }

    fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, SourceError> {
        Ok(self.employees.iter().find(|employee| employee.id == id).cloned())
    }
}

impl BudgetLedger for MemoryRoster {
    fn lines_for(&self, department: DepartmentId) -> Result<Vec<BudgetLine>, SourceError> {
        Ok(self
            .lines
            .iter()
            .filter(|line| line.department_id == department)
            .cloned()
            .collect())
    }
}

pub(super) fn build_api<S: DepartmentStore + 'static>(
    store: Arc<S>,
    roster: MemoryRoster,
) -> Arc<DepartmentApi<S>> {
    let roster = Arc::new(roster);
    let registry = ReportRegistry::standard(roster.clone(), roster).expect("registry builds");
    Arc::new(DepartmentApi::new(
        DepartmentService::new(store.clone()),
        ReportDispatcher::new(store, Arc::new(registry)),
    ))
}

pub(super) fn router_with(store: Arc<MemoryStore>) -> axum::Router {
    department_router(build_api(store, MemoryRoster::for_department(DepartmentId(1))))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json body")
}
