// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use pixbot_config::model::StorageConfig;
use pixbot_core::{
    AdapterType, HealthStatus, KeyType, PixKeyRecord, PixbotError, PluginAdapter,
    RegistrationState, StorageAdapter, StoredKey,
};

use crate::database::{Database, map_tr_err};
use crate::legacy::{self, ImportReport};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// The database is opened on the first call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](StorageAdapter::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// A ready-to-use storage over a private in-memory database.
    pub async fn in_memory() -> Result<Self, PixbotError> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            config: StorageConfig {
                database_path: ":memory:".to_string(),
                wal_mode: false,
            },
            db: OnceCell::new_with(Some(db)),
        })
    }

    /// Imports a legacy `database.json` file. Existing keys are kept.
    pub async fn import_legacy(&self, path: &Path) -> Result<ImportReport, PixbotError> {
        legacy::import_file(self.db()?, path).await
    }

    fn db(&self) -> Result<&Database, PixbotError> {
        self.db.get().ok_or_else(|| PixbotError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PixbotError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PixbotError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), PixbotError> {
        let db =
            Database::open_with_options(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| PixbotError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), PixbotError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    // --- Pix keys ---

    async fn get_key(&self, user_id: &str) -> Result<Option<PixKeyRecord>, PixbotError> {
        let db = self.db()?;
        let Some(row) = queries::keys::get_key(db, user_id).await? else {
            return Ok(None);
        };

        let needs_backfill = row.stored_type().is_none();
        let stored = row.into_stored_key();
        if needs_backfill {
            debug!(
                user_id,
                key_type = %stored.record.key_type,
                "backfilling key type"
            );
            queries::keys::backfill_key_type(db, user_id, stored.record.key_type.label()).await?;
        }
        Ok(Some(stored.record))
    }

    async fn put_key(
        &self,
        user_id: &str,
        username: Option<&str>,
        record: &PixKeyRecord,
    ) -> Result<(), PixbotError> {
        queries::keys::upsert_key(
            self.db()?,
            user_id,
            username,
            &record.value,
            Some(record.key_type.label()),
        )
        .await
    }

    async fn delete_key(&self, user_id: &str) -> Result<bool, PixbotError> {
        queries::keys::delete_key(self.db()?, user_id).await
    }

    async fn list_keys(&self) -> Result<Vec<StoredKey>, PixbotError> {
        let rows = queries::keys::list_keys(self.db()?).await?;
        Ok(rows.into_iter().map(|row| row.into_stored_key()).collect())
    }

    // --- Role allow-list ---

    async fn add_allowed_role(&self, guild_id: &str, role_id: &str) -> Result<bool, PixbotError> {
        queries::roles::add_role(self.db()?, guild_id, role_id).await
    }

    async fn remove_allowed_role(
        &self,
        guild_id: &str,
        role_id: &str,
    ) -> Result<bool, PixbotError> {
        queries::roles::remove_role(self.db()?, guild_id, role_id).await
    }

    async fn allowed_roles(&self, guild_id: &str) -> Result<Vec<String>, PixbotError> {
        queries::roles::list_roles(self.db()?, guild_id).await
    }

    async fn seed_allowed_roles(
        &self,
        guild_id: &str,
        role_ids: &[String],
    ) -> Result<bool, PixbotError> {
        let seeded = queries::roles::seed_roles(self.db()?, guild_id, role_ids).await?;
        if seeded {
            debug!(guild_id, roles = role_ids.len(), "seeded guild allow-list");
        }
        Ok(seeded)
    }

    // --- Interactive registration ---

    async fn get_registration(
        &self,
        user_id: &str,
    ) -> Result<Option<RegistrationState>, PixbotError> {
        let pending = queries::registrations::get_registration(self.db()?, user_id).await?;
        Ok(pending.map(|declared| RegistrationState {
            declared_type: declared.and_then(|label| label.parse::<KeyType>().ok()),
        }))
    }

    async fn put_registration(
        &self,
        user_id: &str,
        state: &RegistrationState,
    ) -> Result<(), PixbotError> {
        queries::registrations::put_registration(
            self.db()?,
            user_id,
            state.declared_type.map(KeyType::label),
        )
        .await
    }

    async fn clear_registration(&self, user_id: &str) -> Result<(), PixbotError> {
        queries::registrations::clear_registration(self.db()?, user_id).await
    }

    // --- Guild settings ---

    async fn set_log_channel(&self, guild_id: &str, channel_id: &str) -> Result<(), PixbotError> {
        queries::settings::set_log_channel(self.db()?, guild_id, channel_id).await
    }

    async fn log_channel(&self, guild_id: &str) -> Result<Option<String>, PixbotError> {
        queries::settings::log_channel(self.db()?, guild_id).await
    }
}
