//! Authentication Handlers
//!
//! Admin login against the env-configured credentials.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// Token lifetime in minutes
    pub expires_in_minutes: i64,
}

/// POST /api/auth/login - authenticate the admin and return a JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Fixed delay before any result is revealed
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let Some(admin) = &state.admin else {
        tracing::warn!("Login attempted but no admin credentials are configured");
        return Err(AppError::invalid_credentials());
    };

    if !admin.verify(&req.username, &req.password) {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service()
        .generate_token(&admin.username)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(username = %admin.username, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        username: admin.username.clone(),
        expires_in_minutes: state.jwt_service.config.expiration_minutes,
    }))
}
