//! Middleware for the Brasa Web API.

mod auth;
mod cors;

pub use auth::{jwt_auth, AuthUser, JwtClaims, JwtState, OptionalAuthUser};
pub use cors::create_cors_layer;
