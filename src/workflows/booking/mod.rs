//! Room availability checking and conflict-aware reservation intake.

pub mod availability;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use availability::{assess, AvailabilityReport, ConflictView};
pub use domain::{
    Reservation, ReservationId, ReservationStatus, Room, RoomId, StayRange, StayRangeError,
};
pub use repository::{BookingRepository, MemoryBookingRepository, RepositoryError};
pub use router::booking_router;
pub use service::{
    BookingOutcome, BookingRequest, BookingService, BookingServiceError, BookingStatusView,
};
