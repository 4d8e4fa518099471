use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for bookable rooms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub String);

/// Identifier wrapper for stored reservations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub String);

/// Catalog entry for a bookable room with its published nightly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub nightly_rate: Decimal,
}

/// Lifecycle states a reservation moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Refunded,
}

impl ReservationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Refunded => "refunded",
        }
    }

    /// Whether a reservation in this state keeps the room occupied.
    /// Cancelled and refunded reservations release their dates.
    pub const fn blocks_room(self) -> bool {
        !matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Refunded
        )
    }
}

/// Half-open `[check_in, check_out)` stay window in UTC.
///
/// The constructor is the only way to obtain a value, so every `StayRange`
/// in the system satisfies `check_in < check_out`. Touching windows (one
/// stay's check-out equals another's check-in) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayRange {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StayRangeError {
    #[error("check-in {check_in} must fall before check-out {check_out}")]
    InvalidRange {
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    },
}

impl StayRange {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<Self, StayRangeError> {
        if check_in < check_out {
            Ok(Self {
                check_in,
                check_out,
            })
        } else {
            Err(StayRangeError::InvalidRange {
                check_in,
                check_out,
            })
        }
    }

    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Standard interval-overlap predicate over half-open windows.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Billable nights: whole calendar days between the check-in and
    /// check-out dates, never less than one.
    pub fn nights(&self) -> i64 {
        (self.check_out.date_naive() - self.check_in.date_naive())
            .num_days()
            .max(1)
    }
}

/// A customer's claim on a room for a stay window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub stay: StayRange,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Whether this reservation makes the requested window unbookable.
    pub fn blocks(&self, requested: &StayRange) -> bool {
        self.status.blocks_room() && self.stay.overlaps(requested)
    }
}
