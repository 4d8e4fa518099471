use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::booking::router::{availability_handler, booking_router};
use crate::workflows::booking::service::BookingService;

fn stay_payload(check_in_day: u32, check_out_day: u32) -> serde_json::Value {
    json!({
        "room_id": "room-101",
        "check_in": at(check_in_day, 10),
        "check_out": at(check_out_day, 10),
    })
}

fn post_json(uri: &str, payload: &serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn availability_route_reports_clear_calendars() {
    let (service, _) = build_service();
    let router = booking_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/api/v1/bookings/availability", &stay_payload(1, 3)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("available"), Some(&json!(true)));
    assert_eq!(payload.get("nights"), Some(&json!(2)));
}

#[tokio::test]
async fn availability_route_rejects_inverted_ranges() {
    let (service, _) = build_service();
    let router = booking_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/api/v1/bookings/availability", &stay_payload(5, 3)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn availability_route_returns_not_found_for_unknown_rooms() {
    let (service, _) = build_service();
    let router = booking_router(Arc::new(service));

    let payload = json!({
        "room_id": "missing",
        "check_in": at(1, 10),
        "check_out": at(3, 10),
    });
    let response = router
        .oneshot(post_json("/api/v1/bookings/availability", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_route_stores_and_confirms() {
    let (service, _) = build_service();
    let router = booking_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/api/v1/bookings", &stay_payload(1, 3)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    let reservation = payload.get("reservation").expect("reservation view");
    assert_eq!(reservation.get("status"), Some(&json!("confirmed")));
    assert!(reservation.get("reservation_id").is_some());
}

#[tokio::test]
async fn create_route_reports_conflicts_on_collisions() {
    let (service, _) = build_service();
    let router = booking_router(Arc::new(service));

    let first = router
        .clone()
        .oneshot(post_json("/api/v1/bookings", &stay_payload(1, 5)))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .oneshot(post_json("/api/v1/bookings", &stay_payload(3, 7)))
        .await
        .expect("route executes");

    assert_eq!(second.status(), StatusCode::CREATED);
    let payload = read_json_body(second).await;
    let reservation = payload.get("reservation").expect("reservation view");
    assert_eq!(reservation.get("status"), Some(&json!("pending")));
    assert_eq!(
        payload
            .get("conflicts")
            .and_then(serde_json::Value::as_array)
            .map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn status_route_returns_stored_reservations() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let router = booking_router(service.clone());

    let outcome = service
        .create_booking(crate::workflows::booking::service::BookingRequest {
            room_id: room().id,
            check_in: at(1, 10),
            check_out: at(3, 10),
        })
        .expect("books");

    let response = router
        .oneshot(
            axum::http::Request::get(format!(
                "/api/v1/bookings/{}",
                outcome.reservation.id.0
            ))
            .body(axum::body::Body::empty())
            .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("confirmed")));
}

#[tokio::test]
async fn handlers_surface_repository_outages_as_internal_errors() {
    let service = Arc::new(BookingService::new(
        Arc::new(UnavailableBookingRepository),
        true,
    ));

    let response = availability_handler::<UnavailableBookingRepository>(
        State(service),
        axum::Json(serde_json::from_value(stay_payload(1, 3)).expect("valid body")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
