//! Booking and payment status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a booking.
///
/// Valid transitions: `Pending → Confirmed → Completed`, and
/// `Pending | Confirmed → Cancelled`. `Cancelled` and `Completed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting confirmation by the room's owner.
    Pending,
    /// Confirmed; the stay will happen.
    Confirmed,
    /// Cancelled by the guest or the owner.
    Cancelled,
    /// The stay has taken place.
    Completed,
}

impl BookingStatus {
    /// Check if the booking is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Check whether a transition to `target` is permitted.
    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }

    /// Whether a booking in this status occupies its room's dates.
    ///
    /// Every non-cancelled booking blocks the slot, including pending ones.
    pub fn blocks_room(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status of a booking.
///
/// Moves `Pending → Paid`, and `Paid → Refunded` when a paid booking is
/// cancelled. `Paid` and `Refunded` are terminal for ordinary payment
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment has not been made yet.
    Pending,
    /// Payment received.
    Paid,
    /// Payment returned after cancellation.
    Refunded,
}

impl PaymentStatus {
    /// Check if no further payment action is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Refunded)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
