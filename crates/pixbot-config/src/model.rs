// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Pixbot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Pixbot configuration.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PixbotConfig {
    /// Bot identity and payment defaults.
    #[serde(default)]
    pub bot: BotConfig,

    /// Discord gateway settings.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Bot identity, command syntax and QR defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name used in logs and help texts.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prefix that marks a message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Payer name written into payloads when the user has no username.
    #[serde(default = "default_payer_name")]
    pub default_payer_name: String,

    /// Payer city written into every payload.
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Minimum side of generated QR images, in pixels.
    #[serde(default = "default_qr_width")]
    pub qr_width: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
            command_prefix: default_command_prefix(),
            default_payer_name: default_payer_name(),
            default_city: default_city(),
            qr_width: default_qr_width(),
        }
    }
}

fn default_bot_name() -> String {
    "pixbot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_payer_name() -> String {
    "Usuario".to_string()
}

fn default_city() -> String {
    "BRASIL".to_string()
}

fn default_qr_width() -> u32 {
    300
}

/// Discord integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Bot token. Also read from `DISCORD_TOKEN`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Role ids allowed to use the bot in every guild, in addition to the
    /// roles added at runtime with `!pixadd`.
    #[serde(default)]
    pub allowed_roles: Vec<String>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("pixbot").join("pixbot.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("pixbot.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
