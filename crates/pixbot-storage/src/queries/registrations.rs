// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pending interactive registrations.

use pixbot_core::PixbotError;
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};

/// The raw declared-type label of a pending registration.
///
/// `Some(None)` is a registration still waiting for its type.
pub async fn get_registration(
    db: &Database,
    user_id: &str,
) -> Result<Option<Option<String>>, PixbotError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT declared_type FROM pending_registrations WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Create or replace a pending registration.
pub async fn put_registration(
    db: &Database,
    user_id: &str,
    declared_type: Option<&str>,
) -> Result<(), PixbotError> {
    let user_id = user_id.to_string();
    let declared_type = declared_type.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO pending_registrations (user_id, declared_type) VALUES (?1, ?2)
                 ON CONFLICT(user_id) DO UPDATE SET
                    declared_type = excluded.declared_type,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![user_id, declared_type],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn clear_registration(db: &Database, user_id: &str) -> Result<(), PixbotError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM pending_registrations WHERE user_id = ?1",
                params![user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registration_lifecycle() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(get_registration(&db, "u").await.unwrap(), None);

        put_registration(&db, "u", None).await.unwrap();
        assert_eq!(get_registration(&db, "u").await.unwrap(), Some(None));

        put_registration(&db, "u", Some("cpf")).await.unwrap();
        assert_eq!(
            get_registration(&db, "u").await.unwrap(),
            Some(Some("cpf".to_string()))
        );

        clear_registration(&db, "u").await.unwrap();
        assert_eq!(get_registration(&db, "u").await.unwrap(), None);
        clear_registration(&db, "u").await.unwrap();
    }
}
