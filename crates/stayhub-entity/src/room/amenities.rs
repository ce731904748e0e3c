//! Room amenity flags.
//!
//! Amenities are a closed set of known boolean flags rather than an open
//! key/value map, so that search filters are always built from a fixed
//! schema and never from caller-supplied keys.

use serde::{Deserialize, Serialize};

/// The amenity flags a room can advertise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    /// Free wifi.
    #[serde(default)]
    pub free_wifi: bool,
    /// Free breakfast.
    #[serde(default)]
    pub free_breakfast: bool,
    /// Room service.
    #[serde(default)]
    pub room_service: bool,
    /// Mountain view.
    #[serde(default)]
    pub mountain_view: bool,
    /// Pool access.
    #[serde(default)]
    pub pool_access: bool,
}

impl Amenities {
    /// Check whether every amenity required by `other` is present here.
    pub fn contains(&self, other: &Amenities) -> bool {
        (!other.free_wifi || self.free_wifi)
            && (!other.free_breakfast || self.free_breakfast)
            && (!other.room_service || self.room_service)
            && (!other.mountain_view || self.mountain_view)
            && (!other.pool_access || self.pool_access)
    }
}
