//! Request DTOs for the Brasa Web API.

use serde::Deserialize;
use validator::Validate;

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Thread creation request.
///
/// Anonymity is an explicit per-request flag, evaluated once at creation;
/// the server never trusts a client-chosen author field.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateThreadRequest {
    /// Thread title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Thread body text.
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,
    /// Reference to a previously uploaded image.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Suppress attribution for this post (only meaningful when authenticated).
    #[serde(default)]
    pub anonymous: bool,
}

/// Reply creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReplyRequest {
    /// Reply body text.
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,
    /// Reference to a previously uploaded image.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Suppress attribution for this post (only meaningful when authenticated).
    #[serde(default)]
    pub anonymous: bool,
}
