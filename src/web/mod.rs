//! Web API module for Brasa.
//!
//! This module provides the REST API for the forum: registration, login,
//! thread and reply browsing and posting, and image uploads.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
