//! Brasa - a small discussion forum backend.
//!
//! Threads and replies with optional anonymity, optional image
//! attachments, and JWT-based sessions, served over a REST API.

pub mod attachment;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod forum;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{BrasaError, Result};
pub use web::WebServer;
