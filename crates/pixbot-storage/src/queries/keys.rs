// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pix key CRUD operations.

use pixbot_core::PixbotError;
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};
use crate::models::KeyRow;

const SELECT_COLUMNS: &str = "SELECT user_id, username, key_value, key_type FROM pix_keys";

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<KeyRow> {
    Ok(KeyRow {
        user_id: row.get(0)?,
        username: row.get(1)?,
        key_value: row.get(2)?,
        key_type: row.get(3)?,
    })
}

/// Get the key row of a user.
pub async fn get_key(db: &Database, user_id: &str) -> Result<Option<KeyRow>, PixbotError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("{SELECT_COLUMNS} WHERE user_id = ?1"),
                params![user_id],
                read_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace the key of a user. The original registration time is kept.
pub async fn upsert_key(
    db: &Database,
    user_id: &str,
    username: Option<&str>,
    key_value: &str,
    key_type: Option<&str>,
) -> Result<(), PixbotError> {
    let user_id = user_id.to_string();
    let username = username.map(str::to_string);
    let key_value = key_value.to_string();
    let key_type = key_type.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO pix_keys (user_id, username, key_value, key_type)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id) DO UPDATE SET
                    username = excluded.username,
                    key_value = excluded.key_value,
                    key_type = excluded.key_type,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![user_id, username, key_value, key_type],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a key only if the user has none. Returns whether a row was written.
pub async fn insert_key_if_absent(
    db: &Database,
    user_id: &str,
    key_value: &str,
    key_type: Option<&str>,
) -> Result<bool, PixbotError> {
    let user_id = user_id.to_string();
    let key_value = key_value.to_string();
    let key_type = key_type.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO pix_keys (user_id, key_value, key_type)
                 VALUES (?1, ?2, ?3)",
                params![user_id, key_value, key_type],
            )?;
            Ok(inserted > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Fill in the type of a row stored without one.
pub async fn backfill_key_type(
    db: &Database,
    user_id: &str,
    key_type: &str,
) -> Result<(), PixbotError> {
    let user_id = user_id.to_string();
    let key_type = key_type.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE pix_keys SET key_type = ?2 WHERE user_id = ?1",
                params![user_id, key_type],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete the key of a user. Returns whether a row existed.
pub async fn delete_key(db: &Database, user_id: &str) -> Result<bool, PixbotError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM pix_keys WHERE user_id = ?1", params![user_id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// All key rows in registration order.
pub async fn list_keys(db: &Database) -> Result<Vec<KeyRow>, PixbotError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at, rowid"))?;
            let rows = stmt.query_map([], read_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_replaces_wholesale() {
        let db = Database::open_in_memory().await.unwrap();
        upsert_key(&db, "u1", Some("ana"), "a@b.co", Some("email")).await.unwrap();
        upsert_key(&db, "u1", None, "12345678901", Some("cpf")).await.unwrap();

        let row = get_key(&db, "u1").await.unwrap().unwrap();
        assert_eq!(row.key_value, "12345678901");
        assert_eq!(row.key_type.as_deref(), Some("cpf"));
        assert_eq!(row.username, None);
        assert_eq!(list_keys(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(get_key(&db, "nobody").await.unwrap().is_none());
        assert!(!delete_key(&db, "nobody").await.unwrap());
    }

    #[tokio::test]
    async fn insert_if_absent_does_not_overwrite() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(insert_key_if_absent(&db, "u1", "first", None).await.unwrap());
        assert!(!insert_key_if_absent(&db, "u1", "second", None).await.unwrap());
        let row = get_key(&db, "u1").await.unwrap().unwrap();
        assert_eq!(row.key_value, "first");
        assert!(row.key_type.is_none());

        backfill_key_type(&db, "u1", "evp").await.unwrap();
        let row = get_key(&db, "u1").await.unwrap().unwrap();
        assert_eq!(row.key_type.as_deref(), Some("evp"));
    }

    #[tokio::test]
    async fn list_is_in_insertion_order() {
        let db = Database::open_in_memory().await.unwrap();
        for user in ["c", "a", "b"] {
            upsert_key(&db, user, None, "k", None).await.unwrap();
        }
        let users: Vec<_> = list_keys(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(users, ["c", "a", "b"]);
    }
}
