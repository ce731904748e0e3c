//! Room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::amenities::Amenities;
use super::room_type::RoomType;

/// A bookable hotel room listed by an owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// The hotel owner who listed this room.
    pub owner_id: Uuid,
    /// Hotel name.
    pub hotel_name: String,
    /// Hotel description.
    pub description: String,
    /// City the hotel is located in.
    pub city: String,
    /// Room category.
    pub room_type: RoomType,
    /// Nightly price in cents. Never negative.
    pub price_per_night_cents: i64,
    /// Maximum number of guests. At least 1.
    pub max_guests: i32,
    /// Whether the room is currently bookable at all.
    pub is_available: bool,
    /// Amenity flags, stored as JSONB.
    pub amenities: Json<Amenities>,
    /// Image URLs.
    pub images: Vec<String>,
    /// When the room was listed.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to list a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// The listing owner.
    pub owner_id: Uuid,
    /// Hotel name.
    pub hotel_name: String,
    /// Hotel description.
    pub description: String,
    /// City.
    pub city: String,
    /// Room category.
    pub room_type: RoomType,
    /// Nightly price in cents.
    pub price_per_night_cents: i64,
    /// Maximum guests.
    pub max_guests: i32,
    /// Amenity flags.
    pub amenities: Amenities,
    /// Image URLs.
    pub images: Vec<String>,
}

/// Data for updating an existing room. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoom {
    /// New hotel name.
    pub hotel_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New room category.
    pub room_type: Option<RoomType>,
    /// New nightly price in cents.
    pub price_per_night_cents: Option<i64>,
    /// New maximum guests.
    pub max_guests: Option<i32>,
    /// New availability flag.
    pub is_available: Option<bool>,
    /// New amenity flags.
    pub amenities: Option<Amenities>,
    /// New image URLs.
    pub images: Option<Vec<String>>,
}
