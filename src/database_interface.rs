use crate::backend::BookingBackend;
use crate::error::BookingError;
use crate::schema::{availability, bookings};
use crate::types::{Booking, NewBooking, Slot};
use chrono::{NaiveDate, NaiveTime};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::{
    Connection, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl,
    SelectableHelper,
};
use tracing::{debug, warn};
use uuid::Uuid;

type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct DatabaseInterface {
    pool: PgPool,
}

impl DatabaseInterface {
    /// Builds the pool and opens its first connection, so an unreachable store fails here.
    pub fn new(database_url: &str, pool_size: u32) -> Result<Self, BookingError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;
        Ok(Self { pool })
    }

    fn connection(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, BookingError> {
        Ok(self.pool.get()?)
    }
}

impl BookingBackend for DatabaseInterface {
    fn create_booking(&self, booking: NewBooking) -> Result<Uuid, BookingError> {
        let mut connection = self.connection()?;
        let (date, time) = (booking.booking_date, booking.booking_time);

        connection.transaction::<_, BookingError, _>(|connection| {
            diesel::insert_into(bookings::table)
                .values(&booking)
                .execute(connection)?;

            let claimed = diesel::update(
                availability::table
                    .filter(availability::available_date.eq(date))
                    .filter(availability::available_time.eq(time))
                    .filter(availability::is_booked.eq(false)),
            )
            .set(availability::is_booked.eq(true))
            .execute(connection)?;

            if claimed == 0 {
                warn!(%date, %time, "Slot could not be claimed, rolling back booking");
                return Err(BookingError::SlotUnavailable { date, time });
            }

            debug!(id = %booking.id, %date, %time, "Booking stored and slot claimed");
            Ok(booking.id)
        })
    }

    fn bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let mut connection = self.connection()?;
        let result = bookings::table
            .select(Booking::as_select())
            .load(&mut connection)?;
        Ok(result)
    }

    fn slot(&self, date: NaiveDate, time: NaiveTime) -> Result<Option<Slot>, BookingError> {
        let mut connection = self.connection()?;
        let slot = availability::table
            .filter(availability::available_date.eq(date))
            .filter(availability::available_time.eq(time))
            .select(Slot::as_select())
            .first(&mut connection)
            .optional()?;
        Ok(slot)
    }
}
