//! Repository implementations for all StayHub entities.

pub mod booking;
pub mod room;
pub mod user;

pub use booking::BookingRepository;
pub use room::RoomRepository;
pub use user::UserRepository;

use stayhub_core::error::{AppError, ErrorKind};

/// Map a sqlx error into an [`AppError`] with the given context message.
///
/// Pool exhaustion and connection loss surface as `ServiceUnavailable` so
/// callers can distinguish a retryable infrastructure failure from a query
/// that is itself broken.
pub(crate) fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::with_source(ErrorKind::ServiceUnavailable, context, e)
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}
