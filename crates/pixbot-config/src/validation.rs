// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::ops::RangeInclusive;

use crate::diagnostic::ConfigError;
use crate::model::PixbotConfig;

pub const QR_WIDTH_RANGE: RangeInclusive<u32> = 100..=2000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first.
pub fn validate_config(config: &PixbotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.bot.name.trim().is_empty() {
        fail("bot.name must not be empty".to_string());
    }

    let level = config.bot.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "bot.log_level `{}` is not one of {}",
            config.bot.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let prefix = &config.bot.command_prefix;
    if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
        fail(format!(
            "bot.command_prefix `{prefix}` must be non-empty and contain no whitespace"
        ));
    }

    if !QR_WIDTH_RANGE.contains(&config.bot.qr_width) {
        fail(format!(
            "bot.qr_width must be between {} and {}, got {}",
            QR_WIDTH_RANGE.start(),
            QR_WIDTH_RANGE.end(),
            config.bot.qr_width
        ));
    }

    if let Some(token) = &config.discord.bot_token
        && token.trim().is_empty()
    {
        fail("discord.bot_token must not be empty when set".to_string());
    }

    for role in &config.discord.allowed_roles {
        if role.is_empty() || !role.bytes().all(|b| b.is_ascii_digit()) {
            fail(format!(
                "discord.allowed_roles entry `{role}` is not a numeric role id"
            ));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
