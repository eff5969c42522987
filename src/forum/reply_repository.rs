//! Reply repository for Brasa.
//!
//! Read operations for replies. Reply creation lives in the forum service,
//! since appending a reply and incrementing the owning thread's reply count
//! must happen in one transaction.

use rusqlite::Row;

use super::reply::Reply;
use crate::db::Database;
use crate::Result;

/// Repository for reply read operations.
pub struct ReplyRepository<'a> {
    db: &'a Database,
}

impl<'a> ReplyRepository<'a> {
    /// Create a new ReplyRepository with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get a reply by ID.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Reply>> {
        let result = self.db.conn().query_row(
            "SELECT id, thread_id, content, author_username, image_ref, created_at
             FROM replies WHERE id = ?",
            [id],
            Self::row_to_reply,
        );

        match result {
            Ok(reply) => Ok(Some(reply)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List replies in a thread, in creation order.
    ///
    /// Returns an empty vec when the thread has no replies.
    pub fn list_by_thread(&self, thread_id: i64) -> Result<Vec<Reply>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, thread_id, content, author_username, image_ref, created_at
             FROM replies WHERE thread_id = ? ORDER BY created_at ASC, id ASC",
        )?;

        let replies = stmt
            .query_map([thread_id], Self::row_to_reply)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(replies)
    }

    /// Count replies in a thread.
    pub fn count_by_thread(&self, thread_id: i64) -> Result<i64> {
        let count: i64 = self.db.conn().query_row(
            "SELECT COUNT(*) FROM replies WHERE thread_id = ?",
            [thread_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Convert a database row to a Reply struct.
    fn row_to_reply(row: &Row<'_>) -> rusqlite::Result<Reply> {
        Ok(Reply {
            id: row.get(0)?,
            thread_id: row.get(1)?,
            content: row.get(2)?,
            author_username: row.get(3)?,
            image_ref: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}
