// Docseal — SQLite Database Management
//
// Opens the signature database and applies the schema. Each connection sets
// a busy timeout so that concurrent signers on the same file queue on the
// write lock instead of failing with SQLITE_BUSY.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use super::StoreError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Wrapper around a SQLite connection holding the `signatures` table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let db = Self { conn };
        db.run_migrations()?;

        tracing::debug!(path = %path.display(), "Signature database opened");
        Ok(db)
    }

    /// Open an in-memory database (for testing only).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run schema migrations to create or update tables.
    fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS signatures (
                id                  TEXT PRIMARY KEY,
                digest              TEXT NOT NULL,
                encrypted_signature TEXT NOT NULL,
                iv_policy           TEXT NOT NULL DEFAULT 'random',
                created_at          TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_signatures_digest
                ON signatures(digest);
            ",
        )?;

        tracing::debug!("Database migrations completed successfully");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
