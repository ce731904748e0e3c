//! Room type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of room categories a hotel can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// Single bed room.
    SingleBed,
    /// Double bed room.
    DoubleBed,
    /// Luxury room.
    LuxuryRoom,
    /// Family suite.
    FamilySuite,
}

impl RoomType {
    /// Return the room type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleBed => "single_bed",
            Self::DoubleBed => "double_bed",
            Self::LuxuryRoom => "luxury_room",
            Self::FamilySuite => "family_suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = stayhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single_bed" => Ok(Self::SingleBed),
            "double_bed" => Ok(Self::DoubleBed),
            "luxury_room" => Ok(Self::LuxuryRoom),
            "family_suite" => Ok(Self::FamilySuite),
            _ => Err(stayhub_core::AppError::validation(format!(
                "Invalid room type: '{s}'. Expected one of: single_bed, double_bed, luxury_room, family_suite"
            ))),
        }
    }
}
