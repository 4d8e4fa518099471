use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{Reservation, ReservationId, ReservationStatus, Room, RoomId};

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for rooms and their reservations.
///
/// `insert_reservation` must perform the overlap scan and the insert as one
/// atomic step with respect to other inserts for the same room; otherwise two
/// concurrent requests can both observe an empty calendar and double-book.
/// The in-memory implementation serializes on a single mutex; a SQL-backed
/// implementation would use a serializable transaction or an exclusion
/// constraint on the room/date predicate.
pub trait BookingRepository: Send + Sync {
    fn room(&self, id: &RoomId) -> Result<Option<Room>, RepositoryError>;
    fn reservations_for_room(&self, room_id: &RoomId) -> Result<Vec<Reservation>, RepositoryError>;
    /// Stores the reservation and returns the blocking reservations that
    /// overlapped its stay at the moment of insertion.
    fn insert_reservation(&self, reservation: Reservation)
        -> Result<Vec<Reservation>, RepositoryError>;
    fn set_status(
        &self,
        id: &ReservationId,
        status: ReservationStatus,
    ) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReservationId) -> Result<Option<Reservation>, RepositoryError>;
}

#[derive(Default)]
struct BookingState {
    rooms: HashMap<RoomId, Room>,
    reservations: HashMap<ReservationId, Reservation>,
}

/// In-process store backing the service binary and the test suites.
#[derive(Default, Clone)]
pub struct MemoryBookingRepository {
    state: Arc<Mutex<BookingState>>,
}

impl MemoryBookingRepository {
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        let repository = Self::default();
        {
            let mut state = repository.state.lock().expect("booking mutex poisoned");
            for room in rooms {
                state.rooms.insert(room.id.clone(), room);
            }
        }
        repository
    }

    pub fn add_room(&self, room: Room) {
        let mut state = self.state.lock().expect("booking mutex poisoned");
        state.rooms.insert(room.id.clone(), room);
    }
}

impl BookingRepository for MemoryBookingRepository {
    fn room(&self, id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        let state = self.state.lock().expect("booking mutex poisoned");
        Ok(state.rooms.get(id).cloned())
    }

    fn reservations_for_room(&self, room_id: &RoomId) -> Result<Vec<Reservation>, RepositoryError> {
        let state = self.state.lock().expect("booking mutex poisoned");
        Ok(state
            .reservations
            .values()
            .filter(|reservation| &reservation.room_id == room_id)
            .cloned()
            .collect())
    }

    fn insert_reservation(
        &self,
        reservation: Reservation,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        let mut state = self.state.lock().expect("booking mutex poisoned");
        if state.reservations.contains_key(&reservation.id) {
            return Err(RepositoryError::Conflict);
        }

        let overlapping: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|existing| {
                existing.room_id == reservation.room_id && existing.blocks(&reservation.stay)
            })
            .cloned()
            .collect();

        state
            .reservations
            .insert(reservation.id.clone(), reservation);
        Ok(overlapping)
    }

    fn set_status(
        &self,
        id: &ReservationId,
        status: ReservationStatus,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("booking mutex poisoned");
        let reservation = state.reservations.get_mut(id).ok_or(RepositoryError::NotFound)?;
        reservation.status = status;
        Ok(())
    }

    fn fetch(&self, id: &ReservationId) -> Result<Option<Reservation>, RepositoryError> {
        let state = self.state.lock().expect("booking mutex poisoned");
        Ok(state.reservations.get(id).cloned())
    }
}
