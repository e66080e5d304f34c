use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use boiler_kpi::config::AppConfig;
use boiler_kpi::error::AppError;
use boiler_kpi::review::{catalog, validate, ReviewService};
use boiler_kpi::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, StoreBackend};
use crate::routes::with_review_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // The rubric is static configuration; refuse to serve a defective one.
    let rubric = catalog::boiler_shift_manager();
    let defects = validate(&rubric);
    if !defects.is_empty() {
        return Err(AppError::Rubric(defects));
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(StoreBackend::open(args.store_path.take()));
    let review_service = Arc::new(ReviewService::new(store, rubric));

    let app = with_review_routes(review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "kpi review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
