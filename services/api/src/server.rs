use crate::cli::ServeArgs;
use crate::infra::{
    load_hotels, load_weights, AppState, InMemoryHotelRepository, InMemoryRuleRepository,
};
use crate::routes::with_rating_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pool_rating::config::AppConfig;
use pool_rating::error::AppError;
use pool_rating::rating::RatingService;
use pool_rating::telemetry;
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
    if let Some(path) = args.weights_csv.take() {
        config.rating.weights_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let weights = load_weights(config.rating.weights_csv.as_deref())?;
    let hotels = match args.hotels_csv.take() {
        Some(path) => load_hotels(&path)?,
        None => Vec::new(),
    };
    let seeded = !hotels.is_empty();

    let hotel_repository = Arc::new(InMemoryHotelRepository::with_hotels(hotels));
    let rule_repository = Arc::new(InMemoryRuleRepository::new(weights));
    let rating_service = Arc::new(RatingService::new(hotel_repository, rule_repository));

    if seeded {
        let summary = rating_service.recalculate_all()?;
        info!(hotels = summary.hotels, "initial score pass complete");
    }

    let app = with_rating_routes(rating_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pool rating service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
