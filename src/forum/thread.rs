//! Thread model for Brasa.

/// Thread entity representing a top-level discussion topic.
#[derive(Debug, Clone)]
pub struct Thread {
    /// Unique thread ID.
    pub id: i64,
    /// Thread title.
    pub title: String,
    /// Thread body text.
    pub content: String,
    /// Username of the author, or None for anonymous threads.
    pub author_username: Option<String>,
    /// Number of replies in this thread.
    pub reply_count: i64,
    /// Reference to an attached image, if any.
    pub image_ref: Option<String>,
    /// Thread creation timestamp.
    pub created_at: String,
}

/// Data for creating a new thread.
#[derive(Debug, Clone)]
pub struct NewThread {
    /// Thread title.
    pub title: String,
    /// Thread body text.
    pub content: String,
    /// Resolved author username (None for anonymous).
    pub author_username: Option<String>,
    /// Reference to an attached image, if any.
    pub image_ref: Option<String>,
}

impl NewThread {
    /// Create a new thread with the required fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
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
