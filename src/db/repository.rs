//! User repository for Brasa.
//!
//! This module provides CRUD operations for users in the database.

use rusqlite::{params, Row};

use super::user::{NewUser, User};
use super::Database;
use crate::{BrasaError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. Fails with a UNIQUE
    /// constraint error when the username is already taken.
    pub fn create(&self, new_user: &NewUser) -> Result<User> {
        self.db.conn().execute(
            "INSERT INTO users (username, password) VALUES (?, ?)",
            params![&new_user.username, &new_user.password],
        )?;

        let id = self.db.conn().last_insert_rowid();
        self.get_by_id(id)?
            .ok_or_else(|| BrasaError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = self.db.conn().query_row(
            "SELECT id, username, password, created_at, is_active
             FROM users WHERE id = ?",
            [id],
            Self::row_to_user,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by username (exact, case-sensitive match).
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = self.db.conn().query_row(
            "SELECT id, username, password, created_at, is_active
             FROM users WHERE username = ?",
            [username],
            Self::row_to_user,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Count all registered users.
    pub fn count(&self) -> Result<i64> {
        let count: i64 =
            self.db
                .conn()
                .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a User struct.
    fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            password: row.get(2)?,
            created_at: row.get(3)?,
            is_active: row.get(4)?,
        })
    }
}
