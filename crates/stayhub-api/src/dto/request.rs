//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use stayhub_entity::room::{Amenities, RoomType};
use stayhub_entity::user::UserRole;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Requested role.
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Guest
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
}

/// Create room request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    /// Hotel name.
    #[validate(length(min = 1, max = 255, message = "Hotel name is required"))]
    pub hotel_name: String,
    /// Hotel description.
    #[validate(length(min = 1, message = "Hotel description is required"))]
    pub description: String,
    /// City.
    #[validate(length(min = 1, max = 120, message = "City is required"))]
    pub city: String,
    /// Room category.
    pub room_type: RoomType,
    /// Nightly price in cents.
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_per_night_cents: i64,
    /// Maximum guests.
    #[validate(range(min = 1, message = "Max guests must be at least 1"))]
    pub max_guests: i32,
    /// Amenity flags.
    #[serde(default)]
    pub amenities: Amenities,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Update room request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
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

/// Room search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRoomsRequest {
    /// Free-text city query (matched fuzzily).
    pub city: Option<String>,
    /// Exact room category.
    pub room_type: Option<RoomType>,
    /// Minimum nightly price in cents.
    pub min_price_cents: Option<i64>,
    /// Maximum nightly price in cents.
    pub max_price_cents: Option<i64>,
    /// Minimum guest capacity.
    pub guests: Option<i32>,
    /// Required amenity flags.
    pub amenities: Option<Amenities>,
    /// Desired check-in date.
    pub check_in: Option<NaiveDate>,
    /// Desired check-out date.
    pub check_out: Option<NaiveDate>,
}

/// Availability check / booking creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StayRequestBody {
    /// The room to stay in.
    pub room_id: Uuid,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Number of guests.
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: i32,
}
