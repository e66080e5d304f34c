use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::RatingLevel;
use super::service::{ReviewService, ReviewServiceError};
use super::store::SessionStore;

/// Router builder exposing the session-backed review endpoints.
pub fn review_router<S>(service: Arc<ReviewService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/review/session",
            post(login_handler::<S>).delete(logout_handler::<S>),
        )
        .route(
            "/api/v1/review/ratings/:item_id",
            post(rate_handler::<S>),
        )
        .route("/api/v1/review/summary", get(summary_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateRequest {
    pub(crate) level: RatingLevel,
    #[serde(default)]
    pub(crate) notes: Option<String>,
}

pub(crate) async fn login_handler<S>(
    State(service): State<Arc<ReviewService<S>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.login(&request.username, &request.password) {
        Ok(account) => (StatusCode::OK, axum::Json(account.public_view())).into_response(),
        Err(ReviewServiceError::InvalidCredentials) => {
            let payload = json!({ "error": "Sai thông tin tài khoản hoặc mật khẩu." });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn logout_handler<S>(
    State(service): State<Arc<ReviewService<S>>>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.logout() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn rate_handler<S>(
    State(service): State<Arc<ReviewService<S>>>,
    Path(item_id): Path<String>,
    axum::Json(request): axum::Json<RateRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    let summary = match service.rate(&item_id, request.level) {
        Ok(summary) => summary,
        Err(err) => return review_error(err),
    };

    if let Some(notes) = &request.notes {
        if let Err(err) = service.set_note(&item_id, notes) {
            return review_error(err);
        }
    }

    (StatusCode::OK, axum::Json(summary)).into_response()
}

pub(crate) async fn summary_handler<S>(
    State(service): State<Arc<ReviewService<S>>>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => review_error(err),
    }
}

fn review_error(err: ReviewServiceError) -> Response {
    let status = match &err {
        ReviewServiceError::UnknownItem(_) => StatusCode::NOT_FOUND,
        ReviewServiceError::NoActiveSession => StatusCode::CONFLICT,
        ReviewServiceError::ItemNotRated(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn internal_error(err: ReviewServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
