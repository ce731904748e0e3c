//! Room listing and search handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use stayhub_core::error::AppError;
use stayhub_core::types::pagination::PageResponse;
use stayhub_entity::room::Room;
use stayhub_entity::room::model::{CreateRoom, UpdateRoom};
use stayhub_service::room::service::SearchRoomsRequest as SvcSearch;

use crate::dto::request::{CreateRoomRequest, SearchRoomsRequest, UpdateRoomRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Room>>>, AppError> {
    let page = pagination.into_page_request();
    let rooms = state.room_service.list_available(&page).await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// POST /api/rooms/search
pub async fn search_rooms(
    State(state): State<AppState>,
    Json(req): Json<SearchRoomsRequest>,
) -> Result<Json<ApiResponse<Vec<Room>>>, AppError> {
    let rooms = state
        .room_service
        .search(&SvcSearch {
            city: req.city,
            room_type: req.room_type,
            min_price_cents: req.min_price_cents,
            max_price_cents: req.max_price_cents,
            guests: req.guests,
            amenities: req.amenities,
            check_in: req.check_in,
            check_out: req.check_out,
        })
        .await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// GET /api/rooms/mine
pub async fn my_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Room>>>, AppError> {
    let page = pagination.into_page_request();
    let rooms = state.room_service.my_rooms(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// GET /api/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Room>>, AppError> {
    let room = state.room_service.get(room_id).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Room>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let room = state
        .room_service
        .create(
            &auth,
            CreateRoom {
                owner_id: auth.user_id,
                hotel_name: req.hotel_name,
                description: req.description,
                city: req.city,
                room_type: req.room_type,
                price_per_night_cents: req.price_per_night_cents,
                max_guests: req.max_guests,
                amenities: req.amenities,
                images: req.images,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(room))))
}

/// PUT /api/rooms/{id}
pub async fn update_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<Uuid>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<Room>>, AppError> {
    let room = state
        .room_service
        .update(
            &auth,
            room_id,
            UpdateRoom {
                hotel_name: req.hotel_name,
                description: req.description,
                city: req.city,
                room_type: req.room_type,
                price_per_night_cents: req.price_per_night_cents,
                max_guests: req.max_guests,
                is_available: req.is_available,
                amenities: req.amenities,
                images: req.images,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(room)))
}

/// DELETE /api/rooms/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.room_service.delete(&auth, room_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Room deleted successfully".to_string(),
    })))
}
