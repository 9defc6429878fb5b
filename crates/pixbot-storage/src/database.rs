// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread. Do not open additional connections for writes.

use pixbot_core::PixbotError;
use tracing::debug;

use crate::migrations;

/// Milliseconds SQLite waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5000;

/// The single SQLite connection of the process.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` in WAL mode and
    /// applies pending migrations.
    pub async fn open(path: &str) -> Result<Self, PixbotError> {
        Self::open_with_options(path, true).await
    }

    /// Like [`Database::open`], with WAL mode configurable.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, PixbotError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(PixbotError::storage)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(PixbotError::storage)?;
        let db = Self { conn };
        db.prepare(wal_mode).await?;
        debug!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// Opens a private in-memory database with the full schema.
    pub async fn open_in_memory() -> Result<Self, PixbotError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(PixbotError::storage)?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    /// The underlying connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Flushes the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), PixbotError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), PixbotError> {
        // Migration failures are returned inside the closure's value so the
        // closure error type stays `rusqlite::Error`.
        self.conn
            .call(move |conn| {
                if wal_mode {
                    conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
                }
                conn.execute_batch(&format!(
                    "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
                ))?;
                Ok(migrations::run_migrations(conn))
            })
            .await
            .map_err(map_tr_err)?
    }
}

/// Convert a tokio-rusqlite error into `PixbotError::Storage`.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> PixbotError {
    PixbotError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn table_names(db: &Database) -> Vec<String> {
        db.connection()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
            .map_err(map_tr_err)
            .unwrap()
    }

    #[tokio::test]
    async fn open_creates_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        let tables = table_names(&db).await;
        for table in ["allowed_roles", "guild_settings", "pending_registrations", "pix_keys"] {
            assert!(tables.iter().any(|t| t == table), "missing {table}: {tables:?}");
        }
    }

    #[tokio::test]
    async fn open_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("pixbot.db");
        Database::open(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let path = path.to_str().unwrap();
        drop(Database::open(path).await.unwrap());
        let db = Database::open(path).await.unwrap();
        assert!(table_names(&db).await.iter().any(|t| t == "pix_keys"));
    }

    #[tokio::test]
    async fn wal_mode_is_applied() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wal.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        let mode: String = db
            .connection()
            .call(|conn| conn.query_row("PRAGMA journal_mode", [], |row| row.get(0)))
            .await
            .map_err(map_tr_err)
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
        db.checkpoint().await.unwrap();
    }

    #[tokio::test]
    async fn in_memory_has_schema() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(table_names(&db).await.iter().any(|t| t == "guild_settings"));
    }
}
