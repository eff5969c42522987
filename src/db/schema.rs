//! Database schema and migrations for Brasa.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Users table
    r#"
-- Users table for authentication
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    is_active   INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX idx_users_username ON users(username);
"#,
    // v2: Attachments table for uploaded images
    r#"
-- Attachments table; each row is one uploaded image blob
CREATE TABLE attachments (
    image_ref   TEXT PRIMARY KEY,        -- opaque UUID reference
    filename    TEXT NOT NULL,
    data        BLOB NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v3: Threads table
    r#"
-- Threads table; author_username is NULL for anonymous threads
CREATE TABLE threads (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    content         TEXT NOT NULL,
    author_username TEXT REFERENCES users(username),
    reply_count     INTEGER NOT NULL DEFAULT 0,
    image_ref       TEXT REFERENCES attachments(image_ref),
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_threads_created_at ON threads(created_at);
"#,
    // v4: Replies table
    r#"
-- Replies table; each reply belongs to exactly one thread
CREATE TABLE replies (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    thread_id       INTEGER NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
    content         TEXT NOT NULL,
    author_username TEXT REFERENCES users(username),
    image_ref       TEXT REFERENCES attachments(image_ref),
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_replies_thread_id ON replies(thread_id);
"#,
];
