use crate::error::BookingError;
use crate::types::{Booking, NewBooking, Slot};
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

pub trait BookingBackend: Clone + Send + Sync + 'static {
    /// Records the booking and claims its slot as one atomic step.
    /// Fails with `SlotUnavailable` and records nothing if the slot could not be claimed.
    fn create_booking(&self, booking: NewBooking) -> Result<Uuid, BookingError>;
    fn bookings(&self) -> Result<Vec<Booking>, BookingError>;
    fn slot(&self, date: NaiveDate, time: NaiveTime) -> Result<Option<Slot>, BookingError>;
}
