use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{DepartmentDraft, DepartmentId, DepartmentResource};
use super::service::{DepartmentService, DepartmentServiceError};
use super::store::{DepartmentStore, StoreError};
use crate::reports::{ReportDispatcher, ReportError, ReportType};

/// Shared state behind the department routes.
pub struct DepartmentApi<S> {
    pub departments: DepartmentService<S>,
    pub reports: ReportDispatcher<S>,
}

impl<S> DepartmentApi<S>
where
    S: DepartmentStore + 'static,
{
    pub fn new(departments: DepartmentService<S>, reports: ReportDispatcher<S>) -> Self {
        Self {
            departments,
            reports,
        }
    }
}

/// Router builder exposing department CRUD and report endpoints.
pub fn department_router<S>(api: Arc<DepartmentApi<S>>) -> Router
where
    S: DepartmentStore + 'static,
{
    Router::new()
        .route(
            "/api/departments",
            get(index_handler::<S>).post(store_handler::<S>),
        )
        .route(
            "/api/departments/:department_id",
            get(show_handler::<S>)
                .put(update_handler::<S>)
                .delete(destroy_handler::<S>),
        )
        .route(
            "/api/departments/report/:department_id/:report_type",
            post(report_handler::<S>),
        )
        .route("/api/report-types", get(report_types_handler::<S>))
        .with_state(api)
}

pub(crate) async fn index_handler<S>(State(api): State<Arc<DepartmentApi<S>>>) -> Response
where
    S: DepartmentStore + 'static,
{
    match api.departments.list() {
        Ok(departments) => {
            let data: Vec<DepartmentResource> =
                departments.iter().map(|department| department.resource()).collect();
            (StatusCode::OK, Json(json!({ "data": data }))).into_response()
        }
        Err(err) => department_error_response(err),
    }
}

pub(crate) async fn show_handler<S>(
    State(api): State<Arc<DepartmentApi<S>>>,
    path: Result<Path<u64>, PathRejection>,
) -> Response
where
    S: DepartmentStore + 'static,
{
    let Path(department_id) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection_response(rejection),
    };
    match api.departments.get(DepartmentId(department_id)) {
        Ok(department) => {
            (StatusCode::OK, Json(json!({ "data": department.resource() }))).into_response()
        }
        Err(err) => department_error_response(err),
    }
}

pub(crate) async fn store_handler<S>(
    State(api): State<Arc<DepartmentApi<S>>>,
    Json(draft): Json<DepartmentDraft>,
) -> Response
where
    S: DepartmentStore + 'static,
{
    match api.departments.create(draft) {
        Ok(department) => {
            (StatusCode::CREATED, Json(json!({ "data": department.resource() }))).into_response()
        }
        Err(err) => department_error_response(err),
    }
}

pub(crate) async fn update_handler<S>(
    State(api): State<Arc<DepartmentApi<S>>>,
    path: Result<Path<u64>, PathRejection>,
    Json(draft): Json<DepartmentDraft>,
) -> Response
where
    S: DepartmentStore + 'static,
{
    let Path(department_id) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection_response(rejection),
    };
    match api.departments.update(DepartmentId(department_id), draft) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => department_error_response(err),
    }
}

pub(crate) async fn destroy_handler<S>(
    State(api): State<Arc<DepartmentApi<S>>>,
    path: Result<Path<u64>, PathRejection>,
) -> Response
where
    S: DepartmentStore + 'static,
{
    let Path(department_id) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection_response(rejection),
    };
    match api.departments.delete(DepartmentId(department_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => department_error_response(err),
    }
}

pub(crate) async fn report_handler<S>(
    State(api): State<Arc<DepartmentApi<S>>>,
    path: Result<Path<(u64, String)>, PathRejection>,
) -> Response
where
    S: DepartmentStore + 'static,
{
    let Path((department_id, report_type)) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection_response(rejection),
    };
    match api
        .reports
        .generate(DepartmentId(department_id), &report_type)
    {
        Ok(envelope) => (StatusCode::CREATED, Json(envelope)).into_response(),
        Err(err) => report_error_response(err),
    }
}

pub(crate) async fn report_types_handler<S>(State(api): State<Arc<DepartmentApi<S>>>) -> Response
where
    S: DepartmentStore + 'static,
{
    let data: [ReportType; 3] = api.reports.report_types();
    (StatusCode::OK, Json(json!({ "data": data }))).into_response()
}

fn message(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn path_rejection_response(rejection: PathRejection) -> Response {
    message(rejection.status(), rejection.body_text())
}

fn department_error_response(err: DepartmentServiceError) -> Response {
    match err {
        DepartmentServiceError::Validation(errors) => {
            let payload = json!({
                "message": errors.message(),
                "errors": errors.errors(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        DepartmentServiceError::Store(err @ StoreError::NotFound(_)) => {
            message(StatusCode::NOT_FOUND, err.to_string())
        }
        DepartmentServiceError::Store(err) => {
            tracing::error!(error = %err, "department store failure");
            message(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn report_error_response(err: ReportError) -> Response {
    match err {
        ReportError::UnknownReportType(err) => message(StatusCode::BAD_REQUEST, err.to_string()),
        ReportError::DepartmentNotFound(_) => message(StatusCode::NOT_FOUND, err.to_string()),
        other => {
            tracing::error!(error = %other, "report generation failure");
            message(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
