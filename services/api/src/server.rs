use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_insurance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use coverage_advisor::config::AppConfig;
use coverage_advisor::error::AppError;
use coverage_advisor::insurance::AssessmentEngine;
use coverage_advisor::telemetry;
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
    if let Some(year) = args.current_year.take() {
        config.assessment.current_year = Some(year);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = Arc::new(AssessmentEngine::new(config.assessment));

    let app = with_insurance_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        pinned_year = ?config.assessment.current_year,
        "coverage advisor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
