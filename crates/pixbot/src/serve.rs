// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pixbot serve` command implementation.
//!
//! Opens SQLite storage, connects the Discord adapter, and runs the bot loop
//! until SIGINT/SIGTERM or until the gateway inbox closes.

use std::sync::Arc;

use pixbot_commands::{BotLoop, DispatchSettings, install_signal_handler};
use pixbot_config::PixbotConfig;
use pixbot_core::{ChannelAdapter, PixbotError, PluginAdapter, StorageAdapter};
use pixbot_discord::DiscordChannel;
use pixbot_storage::SqliteStorage;
use tracing::{info, warn};

/// Runs the `pixbot serve` command.
pub async fn run_serve(config: PixbotConfig) -> Result<(), PixbotError> {
    init_tracing(&config.bot.log_level);

    info!(
        bot_name = config.bot.name.as_str(),
        prefix = config.bot.command_prefix.as_str(),
        "starting pixbot serve"
    );

    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let storage = Arc::new(storage);
    info!(path = config.storage.database_path.as_str(), "storage ready");

    let mut channel = DiscordChannel::new(&config.discord)?;
    channel.connect().await?;
    let channel = Arc::new(channel);

    let cancel = install_signal_handler();
    let bot = BotLoop::new(
        channel.clone(),
        storage.clone(),
        DispatchSettings::from_config(&config),
    );
    bot.run(cancel).await?;

    if let Err(e) = channel.shutdown().await {
        warn!(error = %e, "discord shutdown failed");
    }
    info!("pixbot stopped");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pixbot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
