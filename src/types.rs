use crate::schema::{availability, bookings};
use chrono::{NaiveDate, NaiveTime};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_type: Option<String>,
    pub booking_date: NaiveDate,
    pub booking_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBooking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_type: Option<String>,
    pub booking_date: NaiveDate,
    pub booking_time: NaiveTime,
}

impl From<NewBooking> for Booking {
    fn from(booking: NewBooking) -> Self {
        Self {
            id: booking.id,
            name: booking.name,
            email: booking.email,
            phone: booking.phone,
            business_type: booking.business_type,
            booking_date: booking.booking_date,
            booking_time: booking.booking_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = availability)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Slot {
    pub available_date: NaiveDate,
    pub available_time: NaiveTime,
    pub is_booked: bool,
}

/// Body of `POST /api/book`. Every field is optional on the wire so that missing
/// and empty values are both reported as validation errors instead of JSON rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business_type: Option<String>,
    #[validate(required, length(min = 1))]
    pub booking_date: Option<String>,
    #[validate(required, length(min = 1))]
    pub booking_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AvailabilityQuery {
    #[validate(required, length(min = 1))]
    pub booking_date: Option<String>,
    #[validate(required, length(min = 1))]
    pub booking_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub message: String,
}

impl Availability {
    pub fn from_slot(slot: Option<Slot>) -> Self {
        match slot {
            Some(slot) if slot.is_booked => Self {
                available: false,
                message: "Slot is already booked".into(),
            },
            _ => Self {
                available: true,
                message: "Slot is available".into(),
            },
        }
    }
}
