//! Attachment model for Brasa.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Attachment entity: one uploaded image blob.
///
/// Stored bytes are kept as-is; no format or content-type validation is
/// applied on upload.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Opaque reference (UUID) identifying this attachment.
    pub image_ref: String,
    /// Original filename as uploaded.
    pub filename: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Upload timestamp.
    pub created_at: String,
}

impl Attachment {
    /// Encode the stored bytes as base64 for inline delivery.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }
}

/// Data for storing a new attachment.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    /// Original filename as uploaded.
    pub filename: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl NewAttachment {
    /// Create a new attachment from raw bytes and a filename.
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }
}
