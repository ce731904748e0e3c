//! Room domain entities.

pub mod amenities;
pub mod model;
pub mod room_type;

pub use amenities::Amenities;
pub use model::{CreateRoom, Room, UpdateRoom};
pub use room_type::RoomType;
