// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pixbot.toml` > `~/.config/pixbot/pixbot.toml` > `/etc/pixbot/pixbot.toml`
//! with environment variable overrides via the `PIXBOT_` prefix and the
//! conventional `DISCORD_TOKEN`.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PixbotConfig;

pub const SYSTEM_CONFIG_PATH: &str = "/etc/pixbot/pixbot.toml";
pub const LOCAL_CONFIG_PATH: &str = "pixbot.toml";

/// Top-level sections that `PIXBOT_<SECTION>_<KEY>` variables map into.
const SECTIONS: [&str; 3] = ["bot", "discord", "storage"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pixbot/pixbot.toml` (system-wide)
/// 3. `~/.config/pixbot/pixbot.toml` (user XDG config)
/// 4. `./pixbot.toml` (local directory)
/// 5. `PIXBOT_*` environment variables
/// 6. `DISCORD_TOKEN`
pub fn load_config() -> Result<PixbotConfig, figment::Error> {
    for path in [Some(Path::new(SYSTEM_CONFIG_PATH).to_path_buf()), user_config_path()]
        .into_iter()
        .flatten()
        .chain([Path::new(LOCAL_CONFIG_PATH).to_path_buf()])
    {
        if path.exists() {
            tracing::debug!(path = %path.display(), "config file found");
        }
    }
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PixbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PixbotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PixbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PixbotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(discord_token_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PixbotConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
        .merge(discord_token_provider())
}

/// `~/.config/pixbot/pixbot.toml`, when a config dir exists for this platform.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("pixbot").join("pixbot.toml"))
}

/// `PIXBOT_*` variables, mapped section-first with `Env::map()`.
///
/// `Env::split("_")` would turn `PIXBOT_DISCORD_BOT_TOKEN` into
/// `discord.bot.token`; only the first separator after a known section is a
/// path separator.
fn env_provider() -> Env {
    Env::prefixed("PIXBOT_").map(|key| map_env_key(key.as_str()).into())
}

/// `DISCORD_TOKEN`, the variable the bot has always been deployed with.
fn discord_token_provider() -> Env {
    Env::raw()
        .only(&["DISCORD_TOKEN"])
        .map(|_| "discord.bot_token".into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
