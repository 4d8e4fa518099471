use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::availability::{self, AvailabilityReport, ConflictView};
use super::domain::{
    Reservation, ReservationId, ReservationStatus, RoomId, StayRange, StayRangeError,
};
use super::repository::{BookingRepository, RepositoryError};

/// Caller-facing request to place a stay on a room.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub room_id: RoomId,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

/// Stored reservation plus what the insert observed, for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub reservation: Reservation,
    pub conflicts: Vec<ConflictView>,
    pub total_price: Decimal,
}

impl BookingOutcome {
    pub fn status_view(&self) -> BookingStatusView {
        BookingStatusView {
            reservation_id: self.reservation.id.clone(),
            room_id: self.reservation.room_id.clone(),
            status: self.reservation.status.label(),
            check_in: self.reservation.stay.check_in(),
            check_out: self.reservation.stay.check_out(),
        }
    }
}

/// Sanitized representation of a reservation's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct BookingStatusView {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub status: &'static str,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

static RESERVATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_reservation_id() -> ReservationId {
    let id = RESERVATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReservationId(format!("res-{id:06}"))
}

/// Service composing the availability assessment with reservation storage.
///
/// The service never decides overlap itself; the repository's atomic insert
/// reports what it saw, so two racing requests cannot both confirm.
pub struct BookingService<R> {
    repository: Arc<R>,
    auto_confirm: bool,
}

impl<R> BookingService<R>
where
    R: BookingRepository + 'static,
{
    pub fn new(repository: Arc<R>, auto_confirm: bool) -> Self {
        Self {
            repository,
            auto_confirm,
        }
    }

    /// Read-only availability check: prices the stay and lists every
    /// reservation that still blocks the requested window.
    pub fn check_availability(
        &self,
        room_id: &RoomId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<AvailabilityReport, BookingServiceError> {
        let requested = StayRange::new(check_in, check_out)?;
        let room = self
            .repository
            .room(room_id)?
            .ok_or(RepositoryError::NotFound)?;
        let reservations = self.repository.reservations_for_room(room_id)?;

        Ok(availability::assess(&room, &reservations, &requested))
    }

    /// Store a new reservation, auto-confirming when the calendar was clear.
    ///
    /// The reservation is inserted as `Pending` first so that concurrent
    /// requests for the same window already see it as blocking, then promoted
    /// to `Confirmed` only when the insert observed no conflicts. A request
    /// that collides stays `Pending` for manual resolution.
    pub fn create_booking(
        &self,
        request: BookingRequest,
    ) -> Result<BookingOutcome, BookingServiceError> {
        let requested = StayRange::new(request.check_in, request.check_out)?;
        let room = self
            .repository
            .room(&request.room_id)?
            .ok_or(RepositoryError::NotFound)?;

        let mut reservation = Reservation {
            id: next_reservation_id(),
            room_id: request.room_id,
            stay: requested,
            status: ReservationStatus::Pending,
        };

        let overlapping = self.repository.insert_reservation(reservation.clone())?;

        if overlapping.is_empty() && self.auto_confirm {
            self.repository
                .set_status(&reservation.id, ReservationStatus::Confirmed)?;
            reservation.status = ReservationStatus::Confirmed;
        }

        let report = availability::assess(&room, &overlapping, &requested);

        Ok(BookingOutcome {
            reservation,
            conflicts: report.conflicts,
            total_price: report.total_price,
        })
    }

    /// Fetch a reservation for API responses.
    pub fn get(&self, reservation_id: &ReservationId) -> Result<Reservation, BookingServiceError> {
        let reservation = self
            .repository
            .fetch(reservation_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(reservation)
    }
}

/// Error raised by the booking service.
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error(transparent)]
    Range(#[from] StayRangeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
