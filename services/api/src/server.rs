use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, ConfiguredStore, SharedSession};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_swipe::config::AppConfig;
use job_swipe::error::AppError;
use job_swipe::telemetry;
use job_swipe::triage::TriageSession;
use std::sync::atomic::Ordering;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = load_catalog(config.triage.catalog_path.as_deref())?;
    let store = ConfiguredStore::from_path(config.triage.ledger_path.as_deref());
    info!(jobs = catalog.len(), ledger = %store.describe(), "catalog loaded");
    let session = TriageSession::new(catalog, store, &config.triage.settings)?;

    let app = with_service_routes(SharedSession::new(session))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job swipe triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
