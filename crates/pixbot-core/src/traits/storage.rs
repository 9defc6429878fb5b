// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the bot's persistent state.

use async_trait::async_trait;

use crate::error::PixbotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{PixKeyRecord, RegistrationState, StoredKey};

/// Persistence for registered keys and the dispatcher's state.
///
/// The role allow-list, pending registrations and log channels live here so
/// the command dispatcher owns no process-wide mutable state.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), PixbotError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), PixbotError>;

    // --- Pix keys ---

    /// Returns the key registered by `user_id`.
    ///
    /// Records stored without a type are classified on read.
    async fn get_key(&self, user_id: &str) -> Result<Option<PixKeyRecord>, PixbotError>;

    /// Stores `record` for `user_id`, replacing any previous key.
    async fn put_key(
        &self,
        user_id: &str,
        username: Option<&str>,
        record: &PixKeyRecord,
    ) -> Result<(), PixbotError>;

    /// Deletes the key of `user_id`. Returns whether a key existed.
    async fn delete_key(&self, user_id: &str) -> Result<bool, PixbotError>;

    /// Lists every registered key, ordered by registration time.
    async fn list_keys(&self) -> Result<Vec<StoredKey>, PixbotError>;

    // --- Role allow-list ---

    /// Adds `role_id` to the allow-list of `guild_id`. Returns false if already present.
    async fn add_allowed_role(&self, guild_id: &str, role_id: &str) -> Result<bool, PixbotError>;

    /// Removes `role_id` from the allow-list of `guild_id`. Returns whether it was present.
    async fn remove_allowed_role(&self, guild_id: &str, role_id: &str)
    -> Result<bool, PixbotError>;

    /// Lists the allowed role ids of `guild_id`.
    async fn allowed_roles(&self, guild_id: &str) -> Result<Vec<String>, PixbotError>;

    /// Seeds the allow-list of `guild_id` with `role_ids` the first time the
    /// guild is seen. Returns whether seeding happened.
    async fn seed_allowed_roles(
        &self,
        guild_id: &str,
        role_ids: &[String],
    ) -> Result<bool, PixbotError>;

    // --- Interactive registration ---

    /// Returns the pending registration of `user_id`, if any.
    async fn get_registration(
        &self,
        user_id: &str,
    ) -> Result<Option<RegistrationState>, PixbotError>;

    /// Creates or replaces the pending registration of `user_id`.
    async fn put_registration(
        &self,
        user_id: &str,
        state: &RegistrationState,
    ) -> Result<(), PixbotError>;

    /// Clears the pending registration of `user_id`.
    async fn clear_registration(&self, user_id: &str) -> Result<(), PixbotError>;

    // --- Guild settings ---

    /// Sets the log channel of `guild_id`.
    async fn set_log_channel(&self, guild_id: &str, channel_id: &str) -> Result<(), PixbotError>;

    /// Returns the log channel of `guild_id`, if configured.
    async fn log_channel(&self, guild_id: &str) -> Result<Option<String>, PixbotError>;
}
