use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use boiler_kpi::error::AppError;
use boiler_kpi::review::{
    catalog, review_router, scoring, EmployeeInfo, EvaluationState, RatingLevel,
    RatingsCsvImporter, ReviewReport, ReviewReportView, ReviewService, ReviewServiceError,
    ScoringEngine, SessionStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::infra::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewReportRequest {
    #[serde(default)]
    pub(crate) employee: Option<EmployeeInfo>,
    #[serde(default)]
    pub(crate) period: Option<String>,
    /// Sparse item-id to rating-level map; items left out score 0.
    #[serde(default)]
    pub(crate) ratings: Option<BTreeMap<String, RatingLevel>>,
    /// Alternative to `ratings`: a CSV export with Item,Rating,Notes columns.
    #[serde(default)]
    pub(crate) ratings_csv: Option<String>,
    #[serde(default)]
    pub(crate) include_items: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewReportResponse {
    pub(crate) report: ReviewReportView,
    pub(crate) text: String,
}

pub(crate) fn with_review_routes<S>(service: Arc<ReviewService<S>>) -> axum::Router
where
    S: SessionStore + 'static,
{
    review_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/review/report",
            axum::routing::post(review_report_endpoint),
        )
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

/// Stateless scoring: the caller supplies the ratings, the rubric is the
/// built-in catalog, nothing touches the session store.
pub(crate) async fn review_report_endpoint(
    Json(payload): Json<ReviewReportRequest>,
) -> Result<Json<ReviewReportResponse>, AppError> {
    let ReviewReportRequest {
        employee,
        period,
        ratings,
        ratings_csv,
        include_items,
    } = payload;

    let rubric = catalog::boiler_shift_manager();

    let state = if let Some(csv) = ratings_csv {
        RatingsCsvImporter::from_reader(Cursor::new(csv.into_bytes()), &rubric)?
    } else if let Some(ratings) = ratings {
        let mut state = EvaluationState::new();
        for (item_id, level) in &ratings {
            let item = rubric
                .find_item(item_id)
                .ok_or_else(|| ReviewServiceError::UnknownItem(item_id.clone()))?;
            let score = scoring::item_score(item, *level).map_err(ReviewServiceError::from)?;
            state.rate(item_id, *level, score);
        }
        state
    } else {
        EvaluationState::new()
    };

    let engine = ScoringEngine::new(rubric);
    let report = ReviewReport::build(&engine, &state).map_err(ReviewServiceError::from)?;
    let text = report.text();
    let view = report.view(employee.as_ref(), period.as_deref(), include_items);

    Ok(Json(ReviewReportResponse { report: view, text }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn report_endpoint_scores_a_sparse_ratings_map() {
        let request = ReviewReportRequest {
            employee: None,
            period: Some("2026-07".to_string()),
            ratings: Some(BTreeMap::from([
                ("1.1".to_string(), RatingLevel::Good),
                ("1.4".to_string(), RatingLevel::Average),
            ])),
            ratings_csv: None,
            include_items: false,
        };

        let Json(body) = review_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.report.total_points, 15.6);
        assert_eq!(body.report.total_max, 100.0);
        assert_eq!(body.report.percent, 15.6);
        assert_eq!(body.report.ranking_label, "Không Đạt");
        assert!(body.report.items.is_empty());
        assert!(body.text.starts_with("Tổng điểm: 15.6/100 (15.6%)"));
    }

    #[tokio::test]
    async fn report_endpoint_accepts_a_ratings_csv_and_item_listing() {
        let request = ReviewReportRequest {
            employee: None,
            period: None,
            ratings: None,
            ratings_csv: Some("Item,Rating,Notes\n1.1,good,\n3.3,weak,lỗi 5S lặp lại\n".to_string()),
            include_items: true,
        };

        let Json(body) = review_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.report.total_points, 10.0);
        assert_eq!(body.report.items.len(), 12);
        let noted = body
            .report
            .items
            .iter()
            .find(|item| item.id == "3.3")
            .expect("item row present");
        assert_eq!(noted.notes, "lỗi 5S lặp lại");
    }

    #[tokio::test]
    async fn report_endpoint_rejects_unknown_items() {
        let request = ReviewReportRequest {
            employee: None,
            period: None,
            ratings: Some(BTreeMap::from([("9.9".to_string(), RatingLevel::Good)])),
            ratings_csv: None,
            include_items: false,
        };

        let err = review_report_endpoint(Json(request))
            .await
            .expect_err("unknown item rejected");
        assert!(matches!(
            err,
            AppError::Review(ReviewServiceError::UnknownItem(_))
        ));
    }

    #[tokio::test]
    async fn report_endpoint_scores_zero_when_nothing_is_rated() {
        let request = ReviewReportRequest {
            employee: None,
            period: None,
            ratings: None,
            ratings_csv: None,
            include_items: false,
        };

        let Json(body) = review_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.report.percent, 0.0);
        assert_eq!(body.report.ranking_label, "---");
    }
}
