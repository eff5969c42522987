//! Thread repository for Brasa.
//!
//! This module provides CRUD operations for threads in the database.

use rusqlite::{params, Row};

use super::thread::{NewThread, Thread};
use crate::db::Database;
use crate::{BrasaError, Result};

/// Repository for thread CRUD operations.
pub struct ThreadRepository<'a> {
    db: &'a Database,
}

impl<'a> ThreadRepository<'a> {
    /// Create a new ThreadRepository with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new thread in the database.
    ///
    /// Returns the created thread with the assigned ID.
    pub fn create(&self, new_thread: &NewThread) -> Result<Thread> {
        self.db.conn().execute(
            "INSERT INTO threads (title, content, author_username, image_ref) VALUES (?, ?, ?, ?)",
            params![
                &new_thread.title,
                &new_thread.content,
                &new_thread.author_username,
                &new_thread.image_ref,
            ],
        )?;

        let id = self.db.conn().last_insert_rowid();
        self.get_by_id(id)?
            .ok_or_else(|| BrasaError::NotFound("thread".to_string()))
    }

    /// Get a thread by ID.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Thread>> {
        let result = self.db.conn().query_row(
            "SELECT id, title, content, author_username, reply_count, image_ref, created_at
             FROM threads WHERE id = ?",
            [id],
            Self::row_to_thread,
        );

        match result {
            Ok(thread) => Ok(Some(thread)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all threads, newest first.
    ///
    /// Ordering is `created_at DESC` with the ID as a tie-breaker so threads
    /// created within the same second still list in reverse creation order.
    pub fn list(&self) -> Result<Vec<Thread>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, title, content, author_username, reply_count, image_ref, created_at
             FROM threads ORDER BY created_at DESC, id DESC",
        )?;

        let threads = stmt
            .query_map([], Self::row_to_thread)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(threads)
    }

    /// Count all threads.
    pub fn count(&self) -> Result<i64> {
        let count: i64 =
            self.db
                .conn()
                .query_row("SELECT COUNT(*) FROM threads", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a Thread struct.
    fn row_to_thread(row: &Row<'_>) -> rusqlite::Result<Thread> {
        Ok(Thread {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            author_username: row.get(3)?,
            reply_count: row.get(4)?,
            image_ref: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}
