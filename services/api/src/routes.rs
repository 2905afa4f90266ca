use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use pool_rating::rating::{rating_router, HotelRepository, RatingService, RuleRepository};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_rating_routes<H, R>(service: Arc<RatingService<H, R>>) -> axum::Router
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    rating_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
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
    use crate::infra::{InMemoryHotelRepository, InMemoryRuleRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pool_rating::rating::{Hotel, PoolCriteria, WeightTable};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let hotel = Hotel::new("h-1", "Casa Azul", "mallorca").with_pool(PoolCriteria {
            cleanliness_rating: Some(5),
            has_pool_bar: Some(true),
            ..PoolCriteria::default()
        });
        let service = Arc::new(RatingService::new(
            Arc::new(InMemoryHotelRepository::with_hotels(vec![hotel])),
            Arc::new(InMemoryRuleRepository::new(WeightTable::standard())),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        with_rating_routes(service).layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(
                Request::get(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_startup_flag() {
        let response = get(app(false), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get(app(true), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_are_rendered_as_text() {
        let response = get(app(true), "/metrics").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn rating_routes_are_mounted() {
        let router = app(true);

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/v1/hotels/h-1/scores")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(router, "/api/v1/criteria/public").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn readiness_flag_is_shared() {
        let flag = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: flag.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        flag.store(true, Ordering::Release);
        assert!(state.readiness.load(Ordering::Acquire));
    }
}
