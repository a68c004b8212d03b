use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::JobDescriptionId;
use super::repository::{
    JobAnalysisRecord, JobAnalysisRepository, JobAnalysisSummaryView, PortfolioCatalog,
    RepositoryError,
};
use super::service::{JobModeService, JobModeServiceError, JobSubmission};

/// Router builder exposing HTTP endpoints for job analysis runs.
pub fn job_mode_router<C, R>(service: Arc<JobModeService<C, R>>) -> Router
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/job-mode/analyses",
            get(history_handler::<C, R>).post(analyze_handler::<C, R>),
        )
        .route(
            "/api/v1/job-mode/analyses/:job_id",
            get(detail_handler::<C, R>).delete(deactivate_handler::<C, R>),
        )
        .route(
            "/api/v1/job-mode/analyses/:job_id/optimization",
            get(optimization_handler::<C, R>),
        )
        .with_state(service)
}

pub(crate) async fn analyze_handler<C, R>(
    State(service): State<Arc<JobModeService<C, R>>>,
    Json(submission): Json<JobSubmission>,
) -> Response
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    match service.analyze(submission, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<C, R>(
    State(service): State<Arc<JobModeService<C, R>>>,
) -> Response
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    match service.history() {
        Ok(records) => {
            let views: Vec<JobAnalysisSummaryView> =
                records.iter().map(JobAnalysisRecord::summary_view).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn detail_handler<C, R>(
    State(service): State<Arc<JobModeService<C, R>>>,
    Path(job_id): Path<u64>,
) -> Response
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    match service.get(JobDescriptionId(job_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn deactivate_handler<C, R>(
    State(service): State<Arc<JobModeService<C, R>>>,
    Path(job_id): Path<u64>,
) -> Response
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    match service.deactivate(JobDescriptionId(job_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn optimization_handler<C, R>(
    State(service): State<Arc<JobModeService<C, R>>>,
    Path(job_id): Path<u64>,
) -> Response
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    match service.optimize(JobDescriptionId(job_id)) {
        Ok(optimization) => (StatusCode::OK, Json(optimization)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: JobModeServiceError) -> Response {
    let status = match &err {
        JobModeServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        JobModeServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        JobModeServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        JobModeServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
