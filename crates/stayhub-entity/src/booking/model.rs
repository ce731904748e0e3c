//! Booking entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{BookingStatus, PaymentStatus};

/// A reservation of a room for a half-open date interval
/// `[check_in, check_out)`.
///
/// Immutable after creation except for the `status` and `payment_status`
/// dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The booked room.
    pub room_id: Uuid,
    /// The guest who made the booking.
    pub guest_id: Uuid,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Day of departure. The night of `check_out` itself is not occupied,
    /// so a back-to-back stay may check in on this date.
    pub check_out: NaiveDate,
    /// Number of guests staying.
    pub guests: i32,
    /// Total price in cents, fixed at creation time. Later changes to the
    /// room's nightly price do not affect it.
    pub total_price_cents: i64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights covered by this booking.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The room to book.
    pub room_id: Uuid,
    /// The booking guest.
    pub guest_id: Uuid,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Day of departure.
    pub check_out: NaiveDate,
    /// Number of guests.
    pub guests: i32,
    /// Total price in cents, computed by the caller.
    pub total_price_cents: i64,
    /// Initial lifecycle status.
    pub status: BookingStatus,
}
