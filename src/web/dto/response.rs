//! Response DTOs for the Brasa Web API.

use serde::Serialize;

use crate::attachment::Attachment;
use crate::forum::{content_preview, Reply, Thread};

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Authentication response (register and login).
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// Username the token was issued for.
    pub username: String,
}

/// Current user response (for /api/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Username.
    pub username: String,
    /// Account creation timestamp.
    pub created_at: String,
}

// ============================================================================
// Forum DTOs
// ============================================================================

/// Thread detail response.
#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    /// Thread ID.
    pub id: i64,
    /// Thread title.
    pub title: String,
    /// Thread body text.
    pub content: String,
    /// Author username (None when posted anonymously).
    pub author_username: Option<String>,
    /// Number of replies in the thread.
    pub reply_count: i64,
    /// Attached image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
    /// Creation timestamp.
    pub created_at: String,
}

impl ThreadResponse {
    /// Build a detail response from a thread and its optional attachment.
    pub fn from_thread(thread: Thread, attachment: Option<Attachment>) -> Self {
        Self {
            id: thread.id,
            title: thread.title,
            content: thread.content,
            author_username: thread.author_username,
            reply_count: thread.reply_count,
            image: attachment.map(ImageInfo::from_attachment),
            created_at: thread.created_at,
        }
    }
}

/// Thread listing item.
///
/// Carries a content preview instead of the full body.
#[derive(Debug, Serialize)]
pub struct ThreadSummaryResponse {
    /// Thread ID.
    pub id: i64,
    /// Thread title.
    pub title: String,
    /// Truncated body text.
    pub preview: String,
    /// Author username (None when posted anonymously).
    pub author_username: Option<String>,
    /// Number of replies in the thread.
    pub reply_count: i64,
    /// Whether the thread has an attached image.
    pub has_image: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl ThreadSummaryResponse {
    /// Build a listing item from a thread row.
    pub fn from_thread(thread: Thread) -> Self {
        Self {
            id: thread.id,
            title: thread.title,
            preview: content_preview(&thread.content),
            author_username: thread.author_username,
            reply_count: thread.reply_count,
            has_image: thread.image_ref.is_some(),
            created_at: thread.created_at,
        }
    }
}

/// Reply response.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    /// Reply ID.
    pub id: i64,
    /// Thread this reply belongs to.
    pub thread_id: i64,
    /// Reply body text.
    pub content: String,
    /// Author username (None when posted anonymously).
    pub author_username: Option<String>,
    /// Attached image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
    /// Creation timestamp.
    pub created_at: String,
}

impl ReplyResponse {
    /// Build a response from a reply and its optional attachment.
    pub fn from_reply(reply: Reply, attachment: Option<Attachment>) -> Self {
        Self {
            id: reply.id,
            thread_id: reply.thread_id,
            content: reply.content,
            author_username: reply.author_username,
            image: attachment.map(ImageInfo::from_attachment),
            created_at: reply.created_at,
        }
    }
}

// ============================================================================
// Attachment DTOs
// ============================================================================

/// Inline image payload embedded in post responses.
#[derive(Debug, Serialize)]
pub struct ImageInfo {
    /// Opaque attachment reference.
    pub image_ref: String,
    /// Original filename.
    pub filename: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

impl ImageInfo {
    /// Encode an attachment for inline delivery.
    pub fn from_attachment(attachment: Attachment) -> Self {
        Self {
            data: attachment.to_base64(),
            image_ref: attachment.image_ref,
            filename: attachment.filename,
        }
    }
}

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Opaque reference to the stored image.
    pub image_ref: String,
    /// Original filename.
    pub filename: String,
}
