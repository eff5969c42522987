//! Forum module for Brasa.
//!
//! This module provides the thread/reply entity graph:
//! - Threads (top-level discussion topics)
//! - Replies (posts owned by exactly one thread, in creation order)
//! - Authorship resolution (anonymous vs. attributed posts)
//! - Validated, transactional create operations

mod authorship;
mod reply;
mod reply_repository;
mod service;
mod thread;
mod thread_repository;

pub use authorship::resolve_author;
pub use reply::{NewReply, Reply};
pub use reply_repository::ReplyRepository;
pub use service::{
    content_preview, create_reply, create_thread, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH,
    PREVIEW_LENGTH,
};
pub use thread::{NewThread, Thread};
pub use thread_repository::ThreadRepository;
