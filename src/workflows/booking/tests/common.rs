use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::workflows::booking::domain::{
    Reservation, ReservationId, ReservationStatus, Room, RoomId, StayRange,
};
use crate::workflows::booking::repository::{
    BookingRepository, MemoryBookingRepository, RepositoryError,
};
use crate::workflows::booking::service::BookingService;

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn stay(check_in_day: u32, check_out_day: u32) -> StayRange {
    StayRange::new(at(check_in_day, 10), at(check_out_day, 10)).expect("valid stay")
}

pub(super) fn room() -> Room {
    Room {
        id: RoomId("room-101".to_string()),
        name: "Standard Double".to_string(),
        nightly_rate: Decimal::new(12_500, 2),
    }
}

pub(super) fn reservation(
    suffix: &str,
    check_in_day: u32,
    check_out_day: u32,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: ReservationId(format!("res-{suffix}")),
        room_id: room().id,
        stay: stay(check_in_day, check_out_day),
        status,
    }
}

pub(super) fn build_service() -> (
    BookingService<MemoryBookingRepository>,
    Arc<MemoryBookingRepository>,
) {
    let repository = Arc::new(MemoryBookingRepository::with_rooms(vec![room()]));
    let service = BookingService::new(repository.clone(), true);
    (service, repository)
}

pub(super) struct UnavailableBookingRepository;

impl BookingRepository for UnavailableBookingRepository {
    fn room(&self, _id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn reservations_for_room(
        &self,
        _room_id: &RoomId,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_reservation(
        &self,
        _reservation: Reservation,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_status(
        &self,
        _id: &ReservationId,
        _status: ReservationStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ReservationId) -> Result<Option<Reservation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
