//! # stayhub-api
//!
//! HTTP API layer for StayHub built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, logging), extractors,
//! and DTOs.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
