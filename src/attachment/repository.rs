//! Attachment repository for Brasa.

use rusqlite::{params, Row};

use super::image::{Attachment, NewAttachment};
use crate::db::Database;
use crate::{BrasaError, Result};

/// Repository for attachment storage and retrieval.
pub struct AttachmentRepository<'a> {
    db: &'a Database,
}

impl<'a> AttachmentRepository<'a> {
    /// Create a new AttachmentRepository with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a new attachment and return it with its assigned reference.
    ///
    /// The blob is durably stored before the reference is handed out, so a
    /// reference in circulation always resolves. Each upload stores its own
    /// blob; there is no deduplication.
    pub fn create(&self, new_attachment: &NewAttachment) -> Result<Attachment> {
        let image_ref = uuid::Uuid::new_v4().to_string();

        self.db.conn().execute(
            "INSERT INTO attachments (image_ref, filename, data) VALUES (?, ?, ?)",
            params![&image_ref, &new_attachment.filename, &new_attachment.data],
        )?;

        self.get_by_ref(&image_ref)?
            .ok_or_else(|| BrasaError::NotFound("attachment".to_string()))
    }

    /// Get an attachment by its reference.
    pub fn get_by_ref(&self, image_ref: &str) -> Result<Option<Attachment>> {
        let result = self.db.conn().query_row(
            "SELECT image_ref, filename, data, created_at
             FROM attachments WHERE image_ref = ?",
            [image_ref],
            Self::row_to_attachment,
        );

        match result {
            Ok(attachment) => Ok(Some(attachment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether an attachment exists.
    pub fn exists(&self, image_ref: &str) -> Result<bool> {
        let exists: bool = self.db.conn().query_row(
            "SELECT EXISTS(SELECT 1 FROM attachments WHERE image_ref = ?)",
            [image_ref],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Convert a database row to an Attachment struct.
    fn row_to_attachment(row: &Row<'_>) -> rusqlite::Result<Attachment> {
        Ok(Attachment {
            image_ref: row.get(0)?,
            filename: row.get(1)?,
            data: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
