//! API handlers for the Brasa Web API.

pub mod attachment;
pub mod auth;
pub mod forum;

pub use attachment::*;
pub use auth::*;
pub use forum::*;

use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::web::error::ApiError;
use crate::web::middleware::JwtClaims;
use crate::Database;

/// Thread-safe database wrapper for the Web API.
pub type SharedDatabase = Arc<Mutex<Database>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (wrapped in Mutex for thread safety).
    pub db: SharedDatabase,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub token_expiry_secs: u64,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: SharedDatabase,
        jwt_secret: &str,
        token_expiry_secs: u64,
        max_upload_size: u64,
    ) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            token_expiry_secs,
            max_upload_size,
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, username: &str) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.token_expiry_secs,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }
}
