//! # stayhub-service
//!
//! Business logic service layer for StayHub. Each service orchestrates
//! repositories and auth primitives to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod booking;
pub mod context;
pub mod room;
pub mod user;

pub use booking::BookingService;
pub use context::RequestContext;
pub use room::RoomService;
pub use user::UserService;
