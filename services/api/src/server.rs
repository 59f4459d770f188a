use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::app_router;
use axum_prometheus::PrometheusMetricLayer;
use lrs_scoring::catalog::SchemaCatalog;
use lrs_scoring::config::AppConfig;
use lrs_scoring::error::AppError;
use lrs_scoring::profile::ProfileEngine;
use lrs_scoring::tables::ReferenceTables;
use lrs_scoring::telemetry;
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

    let ReferenceTables {
        weights,
        metadata,
        questions,
    } = ReferenceTables::load(&config.data);
    let engine = ProfileEngine::new(weights, SchemaCatalog::standard(), metadata);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(engine),
        questions: questions.map(Arc::new),
    };

    let app = app_router(app_state, &config.data.frontend_dir).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        frontend = %config.data.frontend_dir.display(),
        "LRS scoring engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
