// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-guild role allow-list.

use pixbot_core::PixbotError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Add a role. Returns false when it was already allowed.
pub async fn add_role(db: &Database, guild_id: &str, role_id: &str) -> Result<bool, PixbotError> {
    let guild_id = guild_id.to_string();
    let role_id = role_id.to_string();
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO allowed_roles (guild_id, role_id) VALUES (?1, ?2)",
                params![guild_id, role_id],
            )?;
            Ok(inserted > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Remove a role. Returns whether it was allowed.
pub async fn remove_role(
    db: &Database,
    guild_id: &str,
    role_id: &str,
) -> Result<bool, PixbotError> {
    let guild_id = guild_id.to_string();
    let role_id = role_id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM allowed_roles WHERE guild_id = ?1 AND role_id = ?2",
                params![guild_id, role_id],
            )?;
            Ok(deleted > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Allowed role ids of a guild, oldest first.
pub async fn list_roles(db: &Database, guild_id: &str) -> Result<Vec<String>, PixbotError> {
    let guild_id = guild_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT role_id FROM allowed_roles WHERE guild_id = ?1
                 ORDER BY created_at, rowid",
            )?;
            let rows = stmt.query_map(params![guild_id], |row| row.get(0))?;
            rows.collect::<Result<Vec<String>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Seed a guild's allow-list once. Later calls for the same guild are no-ops,
/// so roles removed with `!pixrem` stay removed.
///
/// Returns whether seeding happened.
pub async fn seed_roles(
    db: &Database,
    guild_id: &str,
    role_ids: &[String],
) -> Result<bool, PixbotError> {
    let guild_id = guild_id.to_string();
    let role_ids = role_ids.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR IGNORE INTO guild_settings (guild_id) VALUES (?1)",
                params![guild_id],
            )?;
            let claimed = tx.execute(
                "UPDATE guild_settings SET roles_seeded = 1,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE guild_id = ?1 AND roles_seeded = 0",
                params![guild_id],
            )?;
            if claimed > 0 {
                for role_id in &role_ids {
                    tx.execute(
                        "INSERT OR IGNORE INTO allowed_roles (guild_id, role_id) VALUES (?1, ?2)",
                        params![guild_id, role_id],
                    )?;
                }
            }
            tx.commit()?;
            Ok(claimed > 0)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_and_remove_report_membership() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(add_role(&db, "g1", "r1").await.unwrap());
        assert!(!add_role(&db, "g1", "r1").await.unwrap());
        assert!(add_role(&db, "g2", "r1").await.unwrap());

        assert_eq!(list_roles(&db, "g1").await.unwrap(), ["r1"]);
        assert!(remove_role(&db, "g1", "r1").await.unwrap());
        assert!(!remove_role(&db, "g1", "r1").await.unwrap());
        assert!(list_roles(&db, "g1").await.unwrap().is_empty());
        assert_eq!(list_roles(&db, "g2").await.unwrap(), ["r1"]);
    }

    #[tokio::test]
    async fn seeding_happens_once_per_guild() {
        let db = Database::open_in_memory().await.unwrap();
        let seeds = vec!["10".to_string(), "20".to_string()];

        assert!(seed_roles(&db, "g", &seeds).await.unwrap());
        assert_eq!(list_roles(&db, "g").await.unwrap(), ["10", "20"]);

        remove_role(&db, "g", "10").await.unwrap();
        assert!(!seed_roles(&db, "g", &seeds).await.unwrap());
        assert_eq!(list_roles(&db, "g").await.unwrap(), ["20"]);
    }
}
