//! Database module for Brasa.
//!
//! This module provides SQLite database connectivity and migration management.

mod repository;
mod schema;
mod user;

pub use repository::UserRepository;
pub use schema::MIGRATIONS;
pub use user::{NewUser, User};

use std::path::Path;

use rusqlite::{Connection, Transaction};
use tracing::{debug, info};

use crate::Result;

/// Database wrapper for managing SQLite connections and migrations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database connection at the specified path.
    ///
    /// If the database file doesn't exist, it will be created.
    /// Migrations are automatically applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening database at {:?}", path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::configure_connection(&conn)?;

        let mut db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory database");
        let conn = Connection::open_in_memory()?;
        Self::configure_connection(&conn)?;

        let mut db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Configure the connection with recommended settings.
    fn configure_connection(conn: &Connection) -> Result<()> {
        // Enable foreign key constraints
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        // Use WAL mode for better concurrent read performance
        // journal_mode returns the mode as a result, so we use query_row
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        // Set busy timeout to 5 seconds (returns timeout value, so use query_row)
        let _: i64 = conn.query_row("PRAGMA busy_timeout = 5000", [], |row| row.get(0))?;
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a new transaction.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i64> {
        let table_exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: i64 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        Ok(version)
    }

    /// Apply pending migrations.
    pub fn migrate(&mut self) -> Result<()> {
        let current_version = self.schema_version()?;
        let migrations = MIGRATIONS;

        if current_version as usize >= migrations.len() {
            debug!("Database is up to date (version {})", current_version);
            return Ok(());
        }

        info!(
            "Migrating database from version {} to {}",
            current_version,
            migrations.len()
        );

        // Ensure schema_version table exists
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version     INTEGER PRIMARY KEY,
                applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        // Apply each pending migration in a transaction
        for (i, migration) in migrations.iter().enumerate().skip(current_version as usize) {
            let version = (i + 1) as i64;
            info!("Applying migration v{}", version);

            let tx = self.conn.transaction()?;
            tx.execute_batch(migration)?;
            tx.execute("INSERT INTO schema_version (version) VALUES (?)", [version])?;
            tx.commit()?;

            debug!("Migration v{} applied successfully", version);
        }

        info!(
            "Database migration complete (now at version {})",
            migrations.len()
        );
        Ok(())
    }

    /// Execute a SQL statement that doesn't return rows.
    pub fn execute(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Check if a table exists.
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?)",
            [table_name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_migrations_applied() {
        let db = Database::open_in_memory().unwrap();
        let version = db.schema_version().unwrap();
        assert_eq!(version as usize, MIGRATIONS.len());
    }

    #[test]
    fn test_tables_exist() {
        let db = Database::open_in_memory().unwrap();

        assert!(db.table_exists("users").unwrap());
        assert!(db.table_exists("threads").unwrap());
        assert!(db.table_exists("replies").unwrap());
        assert!(db.table_exists("attachments").unwrap());
        assert!(db.table_exists("schema_version").unwrap());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();

        let fk_enabled: i64 = db
            .conn()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_insert_and_query_user() {
        let db = Database::open_in_memory().unwrap();

        db.execute(
            "INSERT INTO users (username, password) VALUES (?, ?)",
            &[&"testuser", &"hashedpassword"],
        )
        .unwrap();

        let (id, username): (i64, String) = db
            .conn()
            .query_row(
                "SELECT id, username FROM users WHERE username = ?",
                ["testuser"],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(username, "testuser");
    }

    #[test]
    fn test_reply_requires_existing_thread() {
        let db = Database::open_in_memory().unwrap();

        // Inserting a reply for a nonexistent thread violates the FK constraint
        let result = db.execute(
            "INSERT INTO replies (thread_id, content) VALUES (?, ?)",
            &[&999i64, &"orphan"],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_rollback() {
        let mut db = Database::open_in_memory().unwrap();

        {
            let tx = db.transaction().unwrap();
            tx.execute(
                "INSERT INTO users (username, password) VALUES (?, ?)",
                ["rollbackuser", "hash"],
            )
            .unwrap();
            // Don't commit - transaction will be rolled back when dropped
        }

        let count: i64 = db
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM users WHERE username = ?",
                ["rollbackuser"],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_open_file_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Open and close database
        {
            let db = Database::open(&db_path).unwrap();
            assert!(db.table_exists("users").unwrap());
        }

        // Reopen database; migrations should not be reapplied
        {
            let db = Database::open(&db_path).unwrap();
            assert!(db.table_exists("threads").unwrap());
            assert_eq!(db.schema_version().unwrap() as usize, MIGRATIONS.len());
        }
    }
}
