//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in StayHub.
///
/// Guests browse rooms and make bookings; hotel owners list rooms and
/// manage the bookings made against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A traveller who books rooms.
    Guest,
    /// A hotel owner who lists rooms and manages their bookings.
    HotelOwner,
}

impl UserRole {
    /// Check if this role may list and manage rooms.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::HotelOwner)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::HotelOwner => "hotel_owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = stayhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "hotel_owner" => Ok(Self::HotelOwner),
            _ => Err(stayhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: guest, hotel_owner"
            ))),
        }
    }
}
