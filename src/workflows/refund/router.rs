use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use super::domain::BillId;
use super::repository::BillRepository;
use super::service::{RefundService, RefundServiceError};
use crate::workflows::booking::repository::RepositoryError;

/// Router builder exposing HTTP endpoints for refund quoting and approval.
pub fn refund_router<B>(service: Arc<RefundService<B>>) -> Router
where
    B: BillRepository + 'static,
{
    Router::new()
        .route("/api/v1/refunds/quote", post(quote_handler::<B>))
        .route("/api/v1/bills/:bill_id/refund", post(approve_handler::<B>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequestBody {
    pub total_price: Decimal,
    pub departure: DateTime<Utc>,
    /// Optional evaluation instant for what-if quotes, defaulting to the
    /// current UTC time. Quoting is read-only, so the override is harmless.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

pub(crate) async fn quote_handler<B>(
    State(service): State<Arc<RefundService<B>>>,
    axum::Json(body): axum::Json<QuoteRequestBody>,
) -> Response
where
    B: BillRepository + 'static,
{
    let now = body.now.unwrap_or_else(Utc::now);
    match service.quote(body.total_price, body.departure, now) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Approval moves money, so the evaluation instant is always the server
/// clock; clients cannot pick the tier by shipping their own timestamp.
pub(crate) async fn approve_handler<B>(
    State(service): State<Arc<RefundService<B>>>,
    Path(bill_id): Path<String>,
) -> Response
where
    B: BillRepository + 'static,
{
    let id = BillId(bill_id);

    match service.approve(&id, Utc::now()) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RefundServiceError) -> Response {
    let status = match &error {
        RefundServiceError::Policy(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RefundServiceError::AlreadySettled | RefundServiceError::Unpaid => StatusCode::CONFLICT,
        RefundServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RefundServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RefundServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
