use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::rating::criteria::Criterion;
use crate::rating::repository::RuleRepository;
use crate::rating::router::{recalculate_all_handler, scores_handler};
use crate::rating::weights::{ScoreType, WeightTable};
use crate::rating::RatingService;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn recalculate_route_returns_score_card() {
    let (service, _, _) = build_service();
    let router = rating_router_with_service(service);

    let response = router
        .oneshot(empty_request("POST", "/api/v1/hotels/h-quiet/scores"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["hotel_id"], "h-quiet");
    assert_eq!(payload["scores"]["quiet"].as_f64(), Some(9.7));
    assert!(payload["components"].as_array().is_some());
}

#[tokio::test]
async fn scores_route_returns_cached_view() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service.recalculate_all().expect("batch succeeds");

    let response = scores_handler::<MemoryHotels, MemoryRules>(
        State(service.clone()),
        Path("h-family".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["subscription"], "premium");
    assert!(payload["scores"]["family"].as_f64().is_some());
    assert!(payload.get("scores_calculated_at").is_some());
}

#[tokio::test]
async fn scores_route_returns_not_found_for_unknown_hotel() {
    let (service, _, _) = build_service();
    let router = rating_router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/hotels/nowhere/scores"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("nowhere")));
}

#[tokio::test]
async fn recalculate_all_returns_internal_error_on_repository_failure() {
    let rules = Arc::new(MemoryRules::with_weights(WeightTable::standard()));
    let service = Arc::new(RatingService::new(Arc::new(UnavailableHotels), rules));

    let response = recalculate_all_handler::<UnavailableHotels, MemoryRules>(State(service)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn weights_route_clamps_updates() {
    let (service, _, _) = build_service();
    let router = rating_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/weights",
            json!([{ "criterion": "cleanliness", "overall": 9.0, "family": 1.0 }]),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let cleanliness = payload
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["criterion"] == "cleanliness"))
        .cloned()
        .expect("cleanliness row present");
    assert_eq!(cleanliness["overall"].as_f64(), Some(5.0));
    assert_eq!(cleanliness["family"].as_f64(), Some(1.0));
    assert_eq!(cleanliness["quiet"].as_f64(), Some(2.0));
    assert_eq!(cleanliness["is_active"], true);
}

#[tokio::test]
async fn weights_route_toggles_flags_without_touching_weights() {
    let (service, _, rules) = build_service();
    let router = rating_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/weights",
            json!([{ "criterion": "cleanliness", "is_active": false }]),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let table = rules.weights().expect("weights readable");
    let row = table.get(Criterion::Cleanliness).expect("row kept");
    assert!(!row.is_active);
    assert_eq!(row.weight(ScoreType::Overall), 3.0);
    assert_eq!(row.weight(ScoreType::Party), 1.5);
}

#[tokio::test]
async fn public_criteria_route_hides_private_rows() {
    let (service, _, _) = build_service();
    let router = rating_router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/criteria/public"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let rows = payload.as_array().expect("array payload");
    assert!(rows.iter().all(|row| row["criterion"] != "pool_hoist"));
}

#[tokio::test]
async fn create_badge_route_validates_criteria() {
    let (service, _, _) = build_service();
    let router = rating_router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/badges",
            json!({
                "id": "slides",
                "name": "Slide Heaven",
                "criteria": [{ "field": "waterslide_count", "operator": ">", "value": 2 }]
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/badges",
            json!({
                "id": "slides",
                "name": "Slide Heaven",
                "criteria": [{ "field": "has_waterslides", "operator": "==", "value": true }]
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_badge_returns_conflict() {
    let (service, _, _) = build_service();
    service
        .create_badge(spotless_badge())
        .expect("badge stored");
    let router = rating_router_with_service(service);

    let body = serde_json::to_value(spotless_badge()).expect("badge serializes");
    let response = router
        .oneshot(json_request("POST", "/api/v1/badges", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn preview_route_lists_matching_hotels() {
    let (service, _, _) = build_service();
    let router = rating_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/badges/preview",
            json!({
                "criteria": [
                    { "field": "atmosphere", "operator": "==", "value": "tranquil" },
                    { "field": "crowd_level", "operator": "==", "value": "quiet" }
                ]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["matched"], 1);
    assert_eq!(payload["hotels"][0]["hotel_id"], "h-quiet");
}

#[tokio::test]
async fn apply_route_assigns_stored_badge() {
    let (service, hotels, _) = build_service();
    service
        .create_badge(spotless_badge())
        .expect("badge stored");
    let router = rating_router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request("POST", "/api/v1/badges/spotless/apply"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["assigned"], json!(["h-family"]));
    assert_eq!(hotels.stored("h-family").badges.len(), 1);

    let response = router
        .oneshot(empty_request("POST", "/api/v1/badges/unknown/preview"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
