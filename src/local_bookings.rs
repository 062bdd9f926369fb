use crate::{
    backend::BookingBackend,
    error::BookingError,
    types::{Booking, NewBooking, Slot},
};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
struct LocalState {
    bookings: Vec<Booking>,
    slots: HashMap<(NaiveDate, NaiveTime), bool>,
}

/// Non-persistent backend. Bookings and slots share one lock, so claiming a slot
/// and recording the booking happen together.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    state: Arc<Mutex<LocalState>>,
}

impl LocalBookings {
    fn state(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an unbooked slot. Existing slots keep their booked flag.
    pub fn add_slot(&self, date: NaiveDate, time: NaiveTime) {
        self.state().slots.entry((date, time)).or_insert(false);
    }

    pub fn insert_example_slots(&self) {
        const NUMBER_OF_DAYS: i64 = 5;
        const OPENING_HOURS: std::ops::Range<u32> = 9..17;

        let today = Local::now().date_naive();
        for day in 1..=NUMBER_OF_DAYS {
            let date = today + Duration::days(day);
            for hour in OPENING_HOURS {
                if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
                    self.add_slot(date, time);
                }
            }
        }
        debug!(number_of_slots = self.state().slots.len(), "Inserted example slots");
    }
}

impl BookingBackend for LocalBookings {
    fn create_booking(&self, booking: NewBooking) -> Result<Uuid, BookingError> {
        let (date, time) = (booking.booking_date, booking.booking_time);
        let mut state = self.state();

        match state.slots.get_mut(&(date, time)) {
            Some(booked) if !*booked => *booked = true,
            _ => {
                warn!(%date, %time, "Slot could not be claimed");
                return Err(BookingError::SlotUnavailable { date, time });
            }
        }

        let id = booking.id;
        state.bookings.push(booking.into());
        Ok(id)
    }

    fn bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.state().bookings.clone())
    }

    fn slot(&self, date: NaiveDate, time: NaiveTime) -> Result<Option<Slot>, BookingError> {
        Ok(self
            .state()
            .slots
            .get(&(date, time))
            .map(|&is_booked| Slot {
                available_date: date,
                available_time: time,
                is_booked,
            }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn example_slot() -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::from_ymd_opt(2030, 5, 17).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        )
    }

    fn new_booking(name: &str, date: NaiveDate, time: NaiveTime) -> NewBooking {
        NewBooking {
            id: Uuid::new_v4(),
            name: name.into(),
            email: "stefan@example.com".into(),
            phone: Some("+43 660 1234567".into()),
            business_type: None,
            booking_date: date,
            booking_time: time,
        }
    }

    #[test]
    fn test_add_and_book_single_slot() {
        let local_bookings = LocalBookings::default();
        let (date, time) = example_slot();
        local_bookings.add_slot(date, time);

        let slot = local_bookings.slot(date, time).unwrap().unwrap();
        assert!(!slot.is_booked);

        let booking = new_booking("Stefan", date, time);
        let id = local_bookings.create_booking(booking.clone()).unwrap();
        assert_eq!(id, booking.id);

        let slot = local_bookings.slot(date, time).unwrap().unwrap();
        assert!(slot.is_booked);

        let bookings = local_bookings.bookings().unwrap();
        assert_eq!(bookings, vec![Booking::from(booking)]);

        let err = local_bookings
            .create_booking(new_booking("Peter", date, time))
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotUnavailable { .. }));
        assert_eq!(local_bookings.bookings().unwrap().len(), 1);
    }

    #[test]
    fn test_booking_unknown_slot_fails() {
        let local_bookings = LocalBookings::default();
        let (date, time) = example_slot();

        assert_eq!(local_bookings.slot(date, time).unwrap(), None);
        local_bookings
            .create_booking(new_booking("Stefan", date, time))
            .unwrap_err();
        assert!(local_bookings.bookings().unwrap().is_empty());
    }

    #[test]
    fn test_add_slot_keeps_booked_flag() {
        let local_bookings = LocalBookings::default();
        let (date, time) = example_slot();
        local_bookings.add_slot(date, time);
        local_bookings
            .create_booking(new_booking("Stefan", date, time))
            .unwrap();

        local_bookings.add_slot(date, time);
        assert!(local_bookings.slot(date, time).unwrap().unwrap().is_booked);
    }

    #[test]
    fn test_bookings_keep_insertion_order() {
        let local_bookings = LocalBookings::default();
        let date = NaiveDate::from_ymd_opt(2030, 5, 17).unwrap();
        let names = ["First", "Second", "Third"];

        for (hour, name) in (9..).zip(names) {
            let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
            local_bookings.add_slot(date, time);
            local_bookings
                .create_booking(new_booking(name, date, time))
                .unwrap();
        }

        let bookings = local_bookings.bookings().unwrap();
        let booked_names: Vec<_> = bookings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(booked_names, names);
    }

    #[test]
    fn test_insert_example_slots() {
        let local_bookings = LocalBookings::default();
        local_bookings.insert_example_slots();

        let tomorrow = Local::now().date_naive() + Duration::days(1);
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let five_pm = NaiveTime::from_hms_opt(17, 0, 0).unwrap();

        assert_eq!(local_bookings.state().slots.len(), 5 * 8);
        assert!(!local_bookings.slot(tomorrow, nine).unwrap().unwrap().is_booked);
        assert_eq!(local_bookings.slot(tomorrow, five_pm).unwrap(), None);
    }
}
