//! User account operations — registration, login, and profile editing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use stayhub_auth::jwt::encoder::JwtEncoder;
use stayhub_auth::password::hasher::PasswordHasher;
use stayhub_core::config::auth::AuthConfig;
use stayhub_core::error::AppError;
use stayhub_core::result::AppResult;
use stayhub_database::repositories::user::UserRepository;
use stayhub_entity::user::model::{CreateUser, UpdateProfile};
use stayhub_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Data for a registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role.
    pub role: UserRole,
}

/// A successful login: the user plus a bearer token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Signed access token.
    pub token: String,
    /// Token expiration time.
    pub expires_at: DateTime<Utc>,
}

/// Handles registration, login, and profile self-service.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Auth policy settings.
    auth_config: AuthConfig,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            jwt_encoder,
            auth_config,
        }
    }

    /// Registers a new user.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if !req.email.contains('@') || !req.email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        if req.password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: req.name,
                email: req.email,
                password_hash,
                role: req.role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let (token, expires_at) = self
            .jwt_encoder
            .generate_token(user.id, user.role, &user.email)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            token,
            expires_at,
        })
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfile,
    ) -> AppResult<User> {
        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }

        let user = self.user_repo.update_profile(ctx.user_id, &req).await?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }
}
