//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use stayhub_core::error::AppError;
use stayhub_entity::user::model::UpdateProfile;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_service
        .update_profile(
            &auth,
            UpdateProfile {
                name: req.name,
                phone_number: req.phone_number,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
