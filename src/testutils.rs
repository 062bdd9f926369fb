use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{NaiveDate, NaiveTime};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::{
    backend::BookingBackend,
    error::BookingError,
    types::{Booking, NewBooking, Slot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Database,
    SlotUnavailable,
}

#[derive(Default)]
pub struct MockBookingBackendInner {
    pub failure: Mutex<Option<MockFailure>>,
    pub calls_to_create_booking: AtomicU64,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_slot: AtomicU64,
    pub bookings: Mutex<Vec<Booking>>,
    pub slot: Mutex<Option<Slot>>,
}

#[derive(Clone, Default)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, failure: MockFailure) {
        *self.0.failure.lock().unwrap() = Some(failure);
    }

    fn result(&self, date: NaiveDate, time: NaiveTime) -> Result<(), BookingError> {
        match *self.0.failure.lock().unwrap() {
            None => Ok(()),
            Some(MockFailure::SlotUnavailable) => Err(BookingError::SlotUnavailable { date, time }),
            Some(MockFailure::Database) => Err(DieselError::DatabaseError(
                DatabaseErrorKind::ClosedConnection,
                Box::new(String::from("Supposed to fail")),
            )
            .into()),
        }
    }
}

impl BookingBackend for MockBookingBackend {
    fn create_booking(&self, booking: NewBooking) -> Result<Uuid, BookingError> {
        self.0.calls_to_create_booking.fetch_add(1, Ordering::SeqCst);
        self.result(booking.booking_date, booking.booking_time)?;
        let id = booking.id;
        self.0.bookings.lock().unwrap().push(booking.into());
        Ok(id)
    }

    fn bookings(&self) -> Result<Vec<Booking>, BookingError> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        self.result(NaiveDate::default(), NaiveTime::default())?;
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn slot(&self, date: NaiveDate, time: NaiveTime) -> Result<Option<Slot>, BookingError> {
        self.0.calls_to_slot.fetch_add(1, Ordering::SeqCst);
        self.result(date, time)?;
        Ok(*self.0.slot.lock().unwrap())
    }
}
