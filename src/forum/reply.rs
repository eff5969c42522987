//! Reply model for Brasa.

/// Reply entity representing a post owned by exactly one thread.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Unique reply ID.
    pub id: i64,
    /// ID of the owning thread (immutable once set).
    pub thread_id: i64,
    /// Reply body text.
    pub content: String,
    /// Username of the author, or None for anonymous replies.
    pub author_username: Option<String>,
    /// Reference to an attached image, if any.
    pub image_ref: Option<String>,
    /// Reply creation timestamp.
    pub created_at: String,
}

/// Data for creating a new reply.
#[derive(Debug, Clone)]
pub struct NewReply {
    /// Reply body text.
    pub content: String,
    /// Resolved author username (None for anonymous).
    pub author_username: Option<String>,
    /// Reference to an attached image, if any.
    pub image_ref: Option<String>,
}

impl NewReply {
    /// Create a new reply with the required fields.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author_username: None,
            image_ref: None,
        }
    }

    /// Set the author username.
    pub fn with_author(mut self, author_username: impl Into<String>) -> Self {
        self.author_username = Some(author_username.into());
        self
    }

    /// Set the attached image reference.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}
