use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{Reservation, ReservationId, Room, StayRange};
use chrono::{DateTime, Utc};

/// Snapshot of an existing reservation that collides with a requested stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictView {
    pub reservation_id: ReservationId,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: &'static str,
}

impl ConflictView {
    fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.id.clone(),
            check_in: reservation.stay.check_in(),
            check_out: reservation.stay.check_out(),
            status: reservation.status.label(),
        }
    }
}

/// Result of assessing a room against a requested stay window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityReport {
    pub available: bool,
    pub conflicts: Vec<ConflictView>,
    pub nightly_rate: Decimal,
    pub nights: i64,
    pub total_price: Decimal,
}

/// Assess a requested stay against every known reservation for the room.
///
/// A reservation conflicts iff it still blocks the room (not cancelled or
/// refunded) and its half-open window overlaps the requested one. Touching
/// boundaries are not conflicts, so back-to-back stays share a turnover day.
pub fn assess(
    room: &Room,
    reservations: &[Reservation],
    requested: &StayRange,
) -> AvailabilityReport {
    let conflicts: Vec<ConflictView> = reservations
        .iter()
        .filter(|reservation| reservation.blocks(requested))
        .map(ConflictView::from_reservation)
        .collect();

    let nights = requested.nights();
    let total_price = room.nightly_rate * Decimal::from(nights);

    AvailabilityReport {
        available: conflicts.is_empty(),
        conflicts,
        nightly_rate: room.nightly_rate,
        nights,
        total_price,
    }
}
