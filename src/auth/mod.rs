//! Authentication module for Brasa.
//!
//! Provides password hashing and verification for the credential store.

mod password;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
};
