//! End-to-end scenarios for department CRUD and report generation, driven
//! through the public service facade, the report dispatcher and the HTTP
//! router.

mod common {
    use std::collections::BTreeMap;
    use std::sync::{Arc, RwLock};

    use chrono::Utc;

    use departments::departments::{
        Department, DepartmentApi, DepartmentFields, DepartmentId, DepartmentService,
        DepartmentStore, StoreError,
    };
    use departments::reports::{
        BudgetLedger, BudgetLine, Employee, EmployeeDirectory, EmployeeId, ReportDispatcher,
        ReportRegistry, SourceError,
    };

    #[derive(Default)]
    pub(super) struct MemoryStore {
        records: RwLock<BTreeMap<DepartmentId, Department>>,
    }

    impl DepartmentStore for MemoryStore {
        fn all(&self) -> Result<Vec<Department>, StoreError> {
            Ok(self.records.read().expect("lock").values().cloned().collect())
        }

        fn find(&self, id: DepartmentId) -> Result<Option<Department>, StoreError> {
            Ok(self.records.read().expect("lock").get(&id).cloned())
        }

        fn create(&self, fields: DepartmentFields) -> Result<Department, StoreError> {
            let mut records = self.records.write().expect("lock");
            let id = DepartmentId(records.keys().last().map_or(1, |last| last.0 + 1));
            let department = Department {
                id,
                name: fields.name,
                address: fields.address,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            records.insert(id, department.clone());
            Ok(department)
        }

        fn update(
            &self,
            id: DepartmentId,
            fields: DepartmentFields,
        ) -> Result<Department, StoreError> {
            let mut records = self.records.write().expect("lock");
            let department = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            department.name = fields.name;
            department.address = fields.address;
            Ok(department.clone())
        }

        fn delete(&self, id: DepartmentId) -> Result<(), StoreError> {
            self.records
                .write()
                .expect("lock")
                .remove(&id)
                .map(|_| ())
                .ok_or(StoreError::NotFound(id))
        }
    }

    pub(super) struct Roster {
        pub(super) employees: Vec<Employee>,
        pub(super) lines: Vec<BudgetLine>,
    }

    impl EmployeeDirectory for Roster {
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

    impl BudgetLedger for Roster {
        fn lines_for(&self, department: DepartmentId) -> Result<Vec<BudgetLine>, SourceError> {
            Ok(self
                .lines
                .iter()
                .filter(|line| line.department_id == department)
                .cloned()
                .collect())
        }
    }

    pub(super) fn build_api(roster: Roster) -> Arc<DepartmentApi<MemoryStore>> {
        let store = Arc::new(MemoryStore::default());
        let roster = Arc::new(roster);
        let registry = ReportRegistry::standard(roster.clone(), roster).expect("registry");
        Arc::new(DepartmentApi::new(
            DepartmentService::new(store.clone()),
            ReportDispatcher::new(store, Arc::new(registry)),
        ))
    }
}

mod lifecycle {
    use super::common::*;
    use departments::departments::{DepartmentDraft, DepartmentServiceError, StoreError};
    use departments::reports::{ReportError, ReportType};

    const ADDRESS: &str = "Suite 246 81515 Osinski Manor, East Luke, TX 59690-4605";

    fn empty_roster() -> Roster {
        Roster {
            employees: Vec::new(),
            lines: Vec::new(),
        }
    }

    #[test]
    fn created_department_is_reportable_until_deleted() {
        let api = build_api(empty_roster());
        let department = api
            .departments
            .create(DepartmentDraft::new("Facilities", ADDRESS))
            .expect("department created");

        for report_type in ReportType::values() {
            let envelope = api
                .reports
                .generate(department.id, report_type.as_str())
                .expect("report generated");
            assert_eq!(envelope.department.id, department.id);
            assert_eq!(envelope.department.name, "Facilities");
        }

        api.departments.delete(department.id).expect("deleted");

        assert!(matches!(
            api.departments.get(department.id),
            Err(DepartmentServiceError::Store(StoreError::NotFound(_)))
        ));
        assert!(matches!(
            api.reports.generate(department.id, "headcount"),
            Err(ReportError::DepartmentNotFound(_))
        ));
        assert!(matches!(
            api.reports.generate(department.id, "invalidType"),
            Err(ReportError::UnknownReportType(_))
        ));
    }

    #[test]
    fn renamed_department_shows_up_in_reports() {
        let api = build_api(empty_roster());
        let department = api
            .departments
            .create(DepartmentDraft::new("Facilities", ADDRESS))
            .expect("department created");

        api.departments
            .update(department.id, DepartmentDraft::new("Estates", ADDRESS))
            .expect("department updated");

        let envelope = api
            .reports
            .generate(department.id, "payroll")
            .expect("report generated");
        assert_eq!(envelope.department.name, "Estates");
    }
}

mod registry {
    use departments::departments::Department;
    use departments::reports::{
        RegistryError, ReportComputationError, ReportData, ReportRegistry, ReportStrategy,
        ReportType,
    };

    struct Empty(ReportType);

    impl ReportStrategy for Empty {
        fn report_type(&self) -> ReportType {
            self.0
        }

        fn compute(&self, _department: &Department) -> Result<ReportData, ReportComputationError> {
            Ok(ReportData::default())
        }
    }

    #[test]
    fn every_report_type_needs_a_strategy() {
        let result = ReportRegistry::builder()
            .register(Empty(ReportType::Headcount))
            .register(Empty(ReportType::Budget))
            .build();

        assert!(matches!(
            result,
            Err(RegistryError::MissingStrategy(ReportType::Payroll))
        ));
    }

    #[test]
    fn a_report_type_cannot_be_registered_twice() {
        let result = ReportRegistry::builder()
            .register(Empty(ReportType::Headcount))
            .register(Empty(ReportType::Payroll))
            .register(Empty(ReportType::Budget))
            .register(Empty(ReportType::Payroll))
            .build();

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateStrategy(ReportType::Payroll))
        ));
    }

    #[test]
    fn complete_registration_resolves_every_type() {
        let registry = ReportRegistry::builder()
            .register(Empty(ReportType::Budget))
            .register(Empty(ReportType::Payroll))
            .register(Empty(ReportType::Headcount))
            .build()
            .expect("registry builds");

        for report_type in ReportType::values() {
            let strategy = registry.strategy(report_type).expect("strategy present");
            assert_eq!(strategy.report_type(), report_type);
        }
    }
}

mod imported {
    use super::common::*;
    use departments::departments::DepartmentId;
    use departments::reports::{ReportComputationError, ReportError};
    use departments::roster::RosterImporter;
    use serde_json::json;
    use std::io::Cursor;

    const DEPARTMENTS: &str = "name,address\n\
        Finance,12 Harbour Street\n\
        Legal,4 Chancery Lane West\n";

    const EMPLOYEES: &str = "id,department_id,name,position,salary\n\
        1,1,Amara Okafor,Controller,98000\n\
        2,1,Jun Park,Accountant,64000\n\
        3,1,Lea Novak,Accountant,66000\n\
        4,2,Tomas Reyes,Counsel,120000\n";

    const BUDGET: &str = "id,department_id,category,allocated,spent,owner_employee_id\n\
        1,1,Audit,20000,5000,1\n\
        2,1,Software,4000,4000,\n\
        3,2,Filing fees,1500,300,1\n";

    fn imported_api() -> std::sync::Arc<departments::departments::DepartmentApi<MemoryStore>> {
        let api = build_api(Roster {
            employees: RosterImporter::employees_from_reader(Cursor::new(EMPLOYEES))
                .expect("employees import"),
            lines: RosterImporter::budget_from_reader(Cursor::new(BUDGET)).expect("budget import"),
        });
        for fields in RosterImporter::departments_from_reader(Cursor::new(DEPARTMENTS))
            .expect("departments import")
        {
            api.departments
                .create(departments::departments::DepartmentDraft::new(
                    fields.name,
                    fields.address,
                ))
                .expect("department created");
        }
        api
    }

    #[test]
    fn headcount_over_imported_roster() {
        let api = imported_api();
        let envelope = api
            .reports
            .generate(DepartmentId(1), "headcount")
            .expect("report generated");

        let body = serde_json::to_value(&envelope).expect("serializes");
        assert_eq!(
            body,
            json!({
                "department": { "id": 1, "name": "Finance" },
                "rows": [
                    { "position": "Accountant", "employees": 2 },
                    { "position": "Controller", "employees": 1 },
                ],
                "summary": { "distinct_positions": 2, "total_employees": 3 },
            })
        );
    }

    #[test]
    fn budget_over_imported_roster() {
        let api = imported_api();
        let envelope = api
            .reports
            .generate(DepartmentId(1), "budget")
            .expect("report generated");

        assert_eq!(envelope.rows.len(), 2);
        assert_eq!(envelope.rows[0].get("owner"), Some(&json!("Amara Okafor")));
        assert_eq!(envelope.summary.get("total_spent"), Some(&json!(9000)));
        assert_eq!(envelope.summary.get("utilisation_pct"), Some(&json!(37.5)));
    }

    #[test]
    fn cross_department_budget_owner_fails_the_report() {
        let api = imported_api();

        match api.reports.generate(DepartmentId(2), "budget") {
            Err(ReportError::Computation {
                source: ReportComputationError::Inconsistent(message),
                ..
            }) => assert!(message.contains("employee 1")),
            other => panic!("expected inconsistent data, got {other:?}"),
        }

        // Reports that do not touch the ledger are unaffected.
        assert!(api.reports.generate(DepartmentId(2), "payroll").is_ok());
    }
}

mod http {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use departments::departments::department_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");
        let body = body.map_or_else(Body::empty, |body| Body::from(body.to_string()));
        builder.body(body).expect("request builds")
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn department_round_trip_over_http() {
        let app = department_router(build_api(Roster {
            employees: Vec::new(),
            lines: Vec::new(),
        }));

        let created = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/departments",
                Some(json!({ "name": "Archives", "address": "1 Record Office Row" })),
            ))
            .await
            .expect("response");
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = json_body(created).await;
        let id = created["data"]["id"].as_u64().expect("numeric id");

        let report = app
            .clone()
            .oneshot(request(
                Method::POST,
                &format!("/api/departments/report/{id}/headcount"),
                None,
            ))
            .await
            .expect("response");
        assert_eq!(report.status(), StatusCode::CREATED);
        assert_eq!(json_body(report).await["department"]["name"], json!("Archives"));

        let rejected = app
            .clone()
            .oneshot(request(
                Method::POST,
                &format!("/api/departments/report/{id}/invalidType"),
                None,
            ))
            .await
            .expect("response");
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(rejected).await,
            json!({ "message": "Report Type not found" })
        );

        let deleted = app
            .clone()
            .oneshot(request(Method::DELETE, &format!("/api/departments/{id}"), None))
            .await
            .expect("response");
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = app
            .oneshot(request(Method::GET, &format!("/api/departments/{id}"), None))
            .await
            .expect("response");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
