use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ReservationId, RoomId};
use super::repository::{BookingRepository, RepositoryError};
use super::service::{BookingRequest, BookingService, BookingServiceError};

/// Router builder exposing HTTP endpoints for availability and bookings.
pub fn booking_router<R>(service: Arc<BookingService<R>>) -> Router
where
    R: BookingRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/bookings/availability",
            post(availability_handler::<R>),
        )
        .route("/api/v1/bookings", post(create_handler::<R>))
        .route(
            "/api/v1/bookings/:reservation_id",
            get(status_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StayRequestBody {
    pub room_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

pub(crate) async fn availability_handler<R>(
    State(service): State<Arc<BookingService<R>>>,
    axum::Json(body): axum::Json<StayRequestBody>,
) -> Response
where
    R: BookingRepository + 'static,
{
    let room_id = RoomId(body.room_id);
    match service.check_availability(&room_id, body.check_in, body.check_out) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<BookingService<R>>>,
    axum::Json(body): axum::Json<StayRequestBody>,
) -> Response
where
    R: BookingRepository + 'static,
{
    let request = BookingRequest {
        room_id: RoomId(body.room_id),
        check_in: body.check_in,
        check_out: body.check_out,
    };

    match service.create_booking(request) {
        Ok(outcome) => {
            let payload = json!({
                "reservation": outcome.status_view(),
                "conflicts": outcome.conflicts,
                "total_price": outcome.total_price,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<BookingService<R>>>,
    Path(reservation_id): Path<String>,
) -> Response
where
    R: BookingRepository + 'static,
{
    let id = ReservationId(reservation_id);
    match service.get(&id) {
        Ok(reservation) => {
            let payload = json!({
                "reservation_id": reservation.id,
                "room_id": reservation.room_id,
                "status": reservation.status.label(),
                "check_in": reservation.stay.check_in(),
                "check_out": reservation.stay.check_out(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: BookingServiceError) -> Response {
    let status = match &error {
        BookingServiceError::Range(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BookingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        BookingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        BookingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
