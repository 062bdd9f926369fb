use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("slot {date} {time} is not available")]
    SlotUnavailable { date: NaiveDate, time: NaiveTime },

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl BookingError {
    /// Store unreachable or a statement failed.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            BookingError::Database(_) | BookingError::Pool(_) | BookingError::Task(_)
        )
    }
}
