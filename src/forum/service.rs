//! Forum service for Brasa.
//!
//! High-level create operations with input validation, attachment
//! verification, and the transactional reply append.

use rusqlite::params;

use crate::attachment::AttachmentRepository;
use crate::db::Database;
use crate::{BrasaError, Result};

use super::reply::{NewReply, Reply};
use super::thread::{NewThread, Thread};
use super::thread_repository::ThreadRepository;

/// Maximum length for thread titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for post content (in characters).
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Length of the content preview shown in thread listings (in characters).
pub const PREVIEW_LENGTH: usize = 200;

/// Validate a thread title.
fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BrasaError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BrasaError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate post content.
fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(BrasaError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(BrasaError::Validation(format!(
            "content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Verify that a provided image reference resolves to a stored attachment.
///
/// A post never carries a reference to a blob that was not fully stored;
/// an unknown reference aborts the create instead of being silently dropped.
fn verify_image_ref(db: &Database, image_ref: &Option<String>) -> Result<()> {
    if let Some(ref image_ref) = image_ref {
        if !AttachmentRepository::new(db).exists(image_ref)? {
            return Err(BrasaError::Validation(format!(
                "unknown image reference: {image_ref}"
            )));
        }
    }
    Ok(())
}

/// Create a new thread.
///
/// Title and content are required non-empty text; a provided image
/// reference must already be stored. The new thread starts with a reply
/// count of zero.
pub fn create_thread(db: &Database, new_thread: &NewThread) -> Result<Thread> {
    validate_title(&new_thread.title)?;
    validate_content(&new_thread.content)?;
    verify_image_ref(db, &new_thread.image_ref)?;

    ThreadRepository::new(db).create(new_thread)
}

/// Create a new reply in a thread.
///
/// Fails with NotFound when the thread does not exist. The reply insert
/// and the owning thread's reply-count increment happen in one transaction,
/// so a reader never observes one without the other.
pub fn create_reply(db: &mut Database, thread_id: i64, new_reply: &NewReply) -> Result<Reply> {
    validate_content(&new_reply.content)?;
    verify_image_ref(db, &new_reply.image_ref)?;

    let tx = db.transaction()?;

    let exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM threads WHERE id = ?)",
        [thread_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(BrasaError::NotFound("thread".to_string()));
    }

    tx.execute(
        "INSERT INTO replies (thread_id, content, author_username, image_ref) VALUES (?, ?, ?, ?)",
        params![
            thread_id,
            &new_reply.content,
            &new_reply.author_username,
            &new_reply.image_ref,
        ],
    )?;
    let id = tx.last_insert_rowid();

    tx.execute(
        "UPDATE threads SET reply_count = reply_count + 1 WHERE id = ?",
        [thread_id],
    )?;

    let reply = tx.query_row(
        "SELECT id, thread_id, content, author_username, image_ref, created_at
         FROM replies WHERE id = ?",
        [id],
        |row| {
            Ok(Reply {
                id: row.get(0)?,
                thread_id: row.get(1)?,
                content: row.get(2)?,
                author_username: row.get(3)?,
                image_ref: row.get(4)?,
                created_at: row.get(5)?,
            })
        },
    )?;

    tx.commit()?;
    Ok(reply)
}

/// Build the content preview for thread listings.
///
/// Takes the first [`PREVIEW_LENGTH`] characters. Truncation happens on a
/// character boundary, so multi-byte sequences are never split.
pub fn content_preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_LENGTH {
        return content.to_string();
    }
    content.chars().take(PREVIEW_LENGTH).collect()
}
