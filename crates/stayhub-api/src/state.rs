//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use stayhub_auth::jwt::decoder::JwtDecoder;
use stayhub_auth::jwt::encoder::JwtEncoder;
use stayhub_auth::password::hasher::PasswordHasher;
use stayhub_core::config::AppConfig;

use stayhub_database::repositories::booking::BookingRepository;
use stayhub_database::repositories::room::RoomRepository;
use stayhub_database::repositories::user::UserRepository;

use stayhub_service::booking::service::BookingService;
use stayhub_service::room::service::RoomService;
use stayhub_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Room repository
    pub room_repo: Arc<RoomRepository>,
    /// Booking repository
    pub booking_repo: Arc<BookingRepository>,

    // ── Services ─────────────────────────────────────────────
    /// User account service
    pub user_service: Arc<UserService>,
    /// Room listing service
    pub room_service: Arc<RoomService>,
    /// Booking lifecycle service
    pub booking_service: Arc<BookingService>,
}
