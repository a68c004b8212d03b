use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryJobAnalysisRepository, StaticCatalog};
use crate::routes::with_portfolio_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use portfolio_ai::config::AppConfig;
use portfolio_ai::error::AppError;
use portfolio_ai::telemetry;
use portfolio_ai::workflows::job_mode::JobModeService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(StaticCatalog::load(
        config.catalog_path.as_deref(),
        Utc::now(),
    )?);
    let repository = Arc::new(InMemoryJobAnalysisRepository::default());
    let service = Arc::new(JobModeService::new(
        catalog,
        repository,
        config.relevance.clone(),
    ));

    let app = with_portfolio_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "portfolio job mode service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
