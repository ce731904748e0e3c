//! Route definitions for the StayHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(room_routes())
        .merge(booking_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/me", put(handlers::user::update_profile))
}

/// Room listing, search, and owner management
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(handlers::room::list_rooms))
        .route("/rooms", post(handlers::room::create_room))
        .route("/rooms/search", post(handlers::room::search_rooms))
        .route("/rooms/mine", get(handlers::room::my_rooms))
        .route("/rooms/{id}", get(handlers::room::get_room))
        .route("/rooms/{id}", put(handlers::room::update_room))
        .route("/rooms/{id}", delete(handlers::room::delete_room))
}

/// Booking availability, creation, and lifecycle
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings/check-availability",
            post(handlers::booking::check_availability),
        )
        .route("/bookings", post(handlers::booking::create_booking))
        .route("/bookings/me", get(handlers::booking::my_bookings))
        .route("/bookings/owner", get(handlers::booking::owner_bookings))
        .route(
            "/bookings/{id}/confirm",
            post(handlers::booking::confirm_booking),
        )
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/bookings/{id}/complete",
            post(handlers::booking::complete_booking),
        )
        .route("/bookings/{id}/pay", post(handlers::booking::pay_booking))
        .route(
            "/bookings/{id}/mark-paid",
            post(handlers::booking::mark_booking_paid),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
