//! Attachment module for Brasa.
//!
//! Stores uploaded image blobs and serves them back as inline base64
//! payloads keyed by an opaque reference.

mod image;
mod repository;

pub use image::{Attachment, NewAttachment};
pub use repository::AttachmentRepository;
