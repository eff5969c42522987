//! Authentication handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::{NewUser, UserRepository};
use crate::web::dto::{
    ApiResponse, AuthResponse, LoginRequest, MeResponse, RegisterRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/register - User registration.
///
/// Registers a new account and immediately issues an access token, so a
/// fresh user can post without a separate login round trip.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    // Validate password policy before hashing
    crate::validate_password(&req.password)
        .map_err(|e| ApiError::unprocessable(format!("Password error: {}", e)))?;

    // Hash password
    let password_hash = crate::hash_password(&req.password)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;

    // Create user
    let user = {
        let db = state.db.lock().await;
        let repo = UserRepository::new(&db);
        repo.create(&NewUser::new(&req.username, password_hash))
            .map_err(|e| {
                if e.to_string().contains("UNIQUE") {
                    ApiError::conflict("Username already exists")
                } else {
                    tracing::error!("User creation failed: {}", e);
                    ApiError::internal("Failed to create user")
                }
            })?
    };

    let access_token = state.generate_access_token(&user.username)?;

    let response = AuthResponse {
        access_token,
        expires_in: state.token_expiry_secs,
        username: user.username,
    };

    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    // Get user from database
    let user = {
        let db = state.db.lock().await;
        let repo = UserRepository::new(&db);
        repo.get_by_username(&req.username)
            .map_err(|_| ApiError::unauthorized("Invalid username or password"))?
            .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?
    };

    // Verify password; the same message for unknown user and wrong password
    crate::verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?;

    // Check if user is active
    if !user.is_active {
        return Err(ApiError::unauthorized("Account is disabled"));
    }

    let access_token = state.generate_access_token(&user.username)?;

    let response = AuthResponse {
        access_token,
        expires_in: state.token_expiry_secs,
        username: user.username,
    };

    Ok(Json(ApiResponse::new(response)))
}

/// GET /api/me - Get current user info.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    // The token may outlive the account; verify the user still exists
    let user = {
        let db = state.db.lock().await;
        let repo = UserRepository::new(&db);
        repo.get_by_username(&claims.sub)
            .map_err(|_| ApiError::internal("Database error"))?
            .ok_or_else(|| ApiError::unauthorized("User not found"))?
    };

    let response = MeResponse {
        username: user.username,
        created_at: user.created_at,
    };

    Ok(Json(ApiResponse::new(response)))
}
