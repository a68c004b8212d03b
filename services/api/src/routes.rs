use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use portfolio_ai::workflows::feedback::feedback_router;
use portfolio_ai::workflows::job_mode::{
    job_mode_router, JobAnalysisRepository, JobModeService, PortfolioCatalog,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_portfolio_routes<C, R>(service: Arc<JobModeService<C, R>>) -> axum::Router
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    job_mode_router(service)
        .merge(feedback_router())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Acquire) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryJobAnalysisRepository, StaticCatalog};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::Utc;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use portfolio_ai::workflows::job_mode::RelevanceConfig;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(JobModeService::new(
            Arc::new(StaticCatalog::sample(Utc::now())),
            Arc::new(InMemoryJobAnalysisRepository::default()),
            RelevanceConfig::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_portfolio_routes(service).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["status"], "initializing");
    }

    #[tokio::test]
    async fn job_mode_and_feedback_routes_are_mounted() {
        let router = app(true);

        let analysis = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/job-mode/analyses")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "description": "Python developer with SQL skills" }).to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(analysis.status(), StatusCode::CREATED);

        let feedback = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/feedback/insights")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "feedback": "Great portfolio. Clear writing." }).to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(feedback.status(), StatusCode::OK);
        assert_eq!(body_json(feedback).await["sentiment"], "Positive");
    }
}
