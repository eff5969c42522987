//! Authorship resolution for Brasa.
//!
//! Decides the stored author of a post from the current session identity
//! and the poster's explicit anonymity choice. Evaluated once, at
//! post-creation time.

/// Resolve the author field of a post.
///
/// Rules:
/// - No identity (unauthenticated): the post is anonymous, regardless of
///   the flag. An anonymity flag without an identity is a no-op, not an error.
/// - Identity present and `anonymous` is true: the attribution is suppressed
///   for this post.
/// - Identity present and `anonymous` is false: the post is attributed to
///   the session's username.
pub fn resolve_author(identity: Option<&str>, anonymous: bool) -> Option<String> {
    match identity {
        None => None,
        Some(_) if anonymous => None,
        Some(username) => Some(username.to_string()),
    }
}
