// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the command stack over a temp SQLite database
//! and a [`MockChannel`]. `send()` drives one message through the
//! dispatcher; `bot_loop()` wires the same pieces into a [`BotLoop`].

use std::sync::Arc;

use pixbot_commands::{BotLoop, CommandDispatcher, DispatchSettings};
use pixbot_config::PixbotConfig;
use pixbot_config::model::StorageConfig;
use pixbot_core::{InboundMessage, OutboundMessage, PixbotError, StorageAdapter};
use pixbot_storage::SqliteStorage;

use crate::mock_channel::MockChannel;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: PixbotConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: PixbotConfig::default(),
        }
    }

    /// Sets the command prefix.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.config.bot.command_prefix = prefix.into();
        self
    }

    /// Sets the roles seeded into every guild's allow-list.
    pub fn with_allowed_roles(mut self, roles: &[&str]) -> Self {
        self.config.discord.allowed_roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Sets the fallback payer name.
    pub fn with_default_payer_name(mut self, name: &str) -> Self {
        self.config.bot.default_payer_name = name.into();
        self
    }

    /// Build the test harness over a fresh temp database.
    pub async fn build(mut self) -> Result<TestHarness, PixbotError> {
        let temp_dir = tempfile::TempDir::new().map_err(PixbotError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        self.config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let storage = Arc::new(SqliteStorage::new(self.config.storage.clone()));
        storage.initialize().await?;

        let mock_channel = Arc::new(MockChannel::new());
        let dispatcher = CommandDispatcher::new(
            storage.clone(),
            DispatchSettings::from_config(&self.config),
        );

        Ok(TestHarness {
            mock_channel,
            storage,
            dispatcher,
            config: self.config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock channel and temp storage.
pub struct TestHarness {
    /// The mock channel adapter.
    pub mock_channel: Arc<MockChannel>,
    /// SQLite storage (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    /// Dispatcher over `storage`.
    pub dispatcher: CommandDispatcher,
    /// Configuration the harness was built from.
    pub config: PixbotConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Dispatches one message and returns what the bot would send.
    pub async fn send(&self, msg: InboundMessage) -> Result<Vec<OutboundMessage>, PixbotError> {
        self.dispatcher.handle(&msg).await
    }

    /// Dispatches one message and returns the text of the first reply.
    pub async fn reply_text(&self, msg: InboundMessage) -> Result<String, PixbotError> {
        let out = self.send(msg).await?;
        out.into_iter()
            .next()
            .map(|m| m.content)
            .ok_or_else(|| PixbotError::Internal("no reply".into()))
    }

    /// A bot loop reading from the mock channel.
    pub fn bot_loop(&self) -> BotLoop {
        BotLoop::new(
            self.mock_channel.clone(),
            self.storage.clone(),
            DispatchSettings::from_config(&self.config),
        )
    }
}
