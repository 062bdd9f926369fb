use crate::{
    backend::BookingBackend,
    error::BookingError,
    types::{Availability, AvailabilityQuery, Booking, BookingConfirmation, BookingRequest, NewBooking},
};
use chrono::{NaiveDate, NaiveTime};
use tokio::task::spawn_blocking;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

pub const MISSING_BOOKING_FIELDS: &str = "Missing required booking information.";
pub const MISSING_SLOT_FIELDS: &str = "Missing booking_date or booking_time.";

/// Storage calls are blocking, so every one of them runs on the blocking thread pool.
#[derive(Clone)]
pub struct BookingService<B: BookingBackend> {
    backend: B,
}

impl<B: BookingBackend> BookingService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn create_booking(
        &self,
        request: BookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        let booking = new_booking(request)?;
        let (date, time) = (booking.booking_date, booking.booking_time);

        let backend = self.backend.clone();
        let id = spawn_blocking(move || backend.create_booking(booking)).await??;

        info!(%id, %date, %time, "Booking created");
        Ok(BookingConfirmation {
            message: "Booking created successfully.".into(),
            id,
        })
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let backend = self.backend.clone();
        let bookings = spawn_blocking(move || backend.bookings()).await??;
        debug!(number_of_bookings = bookings.len(), "Loaded bookings");
        Ok(bookings)
    }

    /// A (date, time) without a slot row counts as available.
    pub async fn check_availability(
        &self,
        query: AvailabilityQuery,
    ) -> Result<Availability, BookingError> {
        query.validate().map_err(|errors| {
            debug!(%errors, "Rejected availability query");
            BookingError::Validation(MISSING_SLOT_FIELDS.into())
        })?;
        let date = parse_date(query.booking_date.as_deref().unwrap_or_default())?;
        let time = parse_time(query.booking_time.as_deref().unwrap_or_default())?;

        let backend = self.backend.clone();
        let slot = spawn_blocking(move || backend.slot(date, time)).await??;
        Ok(Availability::from_slot(slot))
    }
}

fn new_booking(request: BookingRequest) -> Result<NewBooking, BookingError> {
    request.validate().map_err(|errors| {
        debug!(%errors, "Rejected booking request");
        BookingError::Validation(MISSING_BOOKING_FIELDS.into())
    })?;

    let BookingRequest {
        name,
        email,
        phone,
        business_type,
        booking_date,
        booking_time,
    } = request;

    Ok(NewBooking {
        id: Uuid::new_v4(),
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        phone,
        business_type,
        booking_date: parse_date(booking_date.as_deref().unwrap_or_default())?,
        booking_time: parse_time(booking_time.as_deref().unwrap_or_default())?,
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        BookingError::Validation(format!(
            "Invalid booking_date '{value}', expected YYYY-MM-DD."
        ))
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            BookingError::Validation(format!(
                "Invalid booking_time '{value}', expected HH:MM or HH:MM:SS."
            ))
        })
}
