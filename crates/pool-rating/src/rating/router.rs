use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::badges::{Badge, BadgeCriterion, BadgeId};
use super::domain::HotelId;
use super::repository::{HotelRepository, RepositoryError, RuleRepository};
use super::service::{RatingService, RatingServiceError};
use super::weights::WeightPatch;

/// Router builder exposing the admin rating endpoints.
pub fn rating_router<H, R>(service: Arc<RatingService<H, R>>) -> Router
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/hotels/:hotel_id/scores",
            get(scores_handler::<H, R>).post(recalculate_handler::<H, R>),
        )
        .route(
            "/api/v1/scores/recalculate",
            post(recalculate_all_handler::<H, R>),
        )
        .route(
            "/api/v1/weights",
            get(weights_handler::<H, R>).put(update_weights_handler::<H, R>),
        )
        .route(
            "/api/v1/criteria/public",
            get(public_criteria_handler::<H, R>),
        )
        .route("/api/v1/badges", post(create_badge_handler::<H, R>))
        .route(
            "/api/v1/badges/preview",
            post(preview_criteria_handler::<H, R>),
        )
        .route(
            "/api/v1/badges/:badge_id/preview",
            post(preview_badge_handler::<H, R>),
        )
        .route(
            "/api/v1/badges/:badge_id/apply",
            post(apply_badge_handler::<H, R>),
        )
        .with_state(service)
}

/// Body of an ad-hoc badge preview.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub criteria: Vec<BadgeCriterion>,
}

pub(crate) async fn scores_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
    Path(hotel_id): Path<String>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.scores(&HotelId(hotel_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recalculate_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
    Path(hotel_id): Path<String>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.recalculate(&HotelId(hotel_id)) {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recalculate_all_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.recalculate_all() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn weights_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.weights() {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_weights_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
    Json(patches): Json<Vec<WeightPatch>>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.update_weights(patches) {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn public_criteria_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.public_criteria() {
        Ok(criteria) => (StatusCode::OK, Json(criteria)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_badge_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
    Json(badge): Json<Badge>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.create_badge(badge) {
        Ok(badge) => (StatusCode::CREATED, Json(badge)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_criteria_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
    Json(request): Json<PreviewRequest>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.preview_criteria(&request.criteria) {
        Ok(preview) => (StatusCode::OK, Json(preview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_badge_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
    Path(badge_id): Path<String>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.preview_badge(&BadgeId(badge_id)) {
        Ok(preview) => (StatusCode::OK, Json(preview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_badge_handler<H, R>(
    State(service): State<Arc<RatingService<H, R>>>,
    Path(badge_id): Path<String>,
) -> Response
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    match service.apply_badge(&BadgeId(badge_id)) {
        Ok(assignment) => (StatusCode::OK, Json(assignment)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RatingServiceError) -> Response {
    let status = match &error {
        RatingServiceError::HotelNotFound(_)
        | RatingServiceError::BadgeNotFound(_)
        | RatingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RatingServiceError::BadgeRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RatingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RatingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
