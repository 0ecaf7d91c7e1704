use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState, InMemorySessionRepository};
use crate::routes::with_form_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use feedback_quality::config::AppConfig;
use feedback_quality::error::AppError;
use feedback_quality::sessions::FormSessionService;
use feedback_quality::telemetry;
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

    let engine = build_engine(&config)?;
    let repository = Arc::new(InMemorySessionRepository::default());
    let session_service = Arc::new(FormSessionService::new(repository, engine));

    let app = with_form_routes(session_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "feedback quality service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
