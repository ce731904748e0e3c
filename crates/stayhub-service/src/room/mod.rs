//! Room services: listing management and search.

pub mod search;
pub mod service;

pub use search::match_cities;
pub use service::RoomService;
