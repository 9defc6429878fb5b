// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-guild settings.

use pixbot_core::PixbotError;
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};

pub async fn set_log_channel(
    db: &Database,
    guild_id: &str,
    channel_id: &str,
) -> Result<(), PixbotError> {
    let guild_id = guild_id.to_string();
    let channel_id = channel_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO guild_settings (guild_id, log_channel_id) VALUES (?1, ?2)
                 ON CONFLICT(guild_id) DO UPDATE SET
                    log_channel_id = excluded.log_channel_id,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![guild_id, channel_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn log_channel(db: &Database, guild_id: &str) -> Result<Option<String>, PixbotError> {
    let guild_id = guild_id.to_string();
    db.connection()
        .call(move |conn| {
            let channel: Option<Option<String>> = conn
                .query_row(
                    "SELECT log_channel_id FROM guild_settings WHERE guild_id = ?1",
                    params![guild_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(channel.flatten())
        })
        .await
        .map_err(map_tr_err)
}
