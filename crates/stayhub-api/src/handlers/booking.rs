//! Booking handlers — availability, creation, and lifecycle transitions.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use stayhub_core::error::AppError;
use stayhub_core::types::pagination::PageResponse;
use stayhub_entity::booking::Booking;
use stayhub_service::booking::service::{AvailabilityQuote, StayRequest};

use crate::dto::request::StayRequestBody;
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

impl From<StayRequestBody> for StayRequest {
    fn from(req: StayRequestBody) -> Self {
        Self {
            room_id: req.room_id,
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
        }
    }
}

/// POST /api/bookings/check-availability
pub async fn check_availability(
    State(state): State<AppState>,
    Json(req): Json<StayRequestBody>,
) -> Result<Json<ApiResponse<AvailabilityQuote>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let quote = state
        .booking_service
        .check_availability(&req.into())
        .await?;
    Ok(Json(ApiResponse::ok(quote)))
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<StayRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let booking = state
        .booking_service
        .create_booking(&auth, &req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// GET /api/bookings/me
pub async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Booking>>>, AppError> {
    let page = pagination.into_page_request();
    let bookings = state.booking_service.my_bookings(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/owner
pub async fn owner_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Booking>>>, AppError> {
    let page = pagination.into_page_request();
    let bookings = state.booking_service.owner_bookings(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// POST /api/bookings/{id}/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state.booking_service.confirm(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state.booking_service.cancel(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/bookings/{id}/complete
pub async fn complete_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state.booking_service.complete(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/bookings/{id}/pay
pub async fn pay_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state.booking_service.pay(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/bookings/{id}/mark-paid
pub async fn mark_booking_paid(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state.booking_service.mark_paid(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}
