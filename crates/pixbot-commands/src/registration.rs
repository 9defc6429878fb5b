// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interactive `pixreg` dialogue.
//!
//! A pending registration first waits for a key type, then for a key that
//! classifies to exactly that type. A mismatch keeps the state and asks again.

use pixbot_core::{KeyType, PixKeyRecord, PixbotError, RegistrationState, StorageAdapter};
use tracing::info;

use crate::replies;

/// Starts (or restarts) a registration for `user_id`.
pub async fn start(storage: &dyn StorageAdapter, user_id: &str) -> Result<String, PixbotError> {
    storage
        .put_registration(user_id, &RegistrationState::default())
        .await?;
    Ok(replies::ASK_KEY_TYPE.to_string())
}

/// Registers `key` directly with its classified type, ending any pending dialogue.
pub async fn register_direct(
    storage: &dyn StorageAdapter,
    user_id: &str,
    username: &str,
    key: &str,
) -> Result<String, PixbotError> {
    let record = PixKeyRecord {
        value: key.to_string(),
        key_type: pixbot_pix::classify(key),
    };
    storage
        .put_key(user_id, Some(username), &record)
        .await?;
    storage.clear_registration(user_id).await?;
    info!(user_id, key_type = %record.key_type, "pix key registered");
    Ok(replies::key_registered(record.key_type))
}

/// Parses a type word as typed by the user; only declarable types count.
pub fn parse_declared_type(input: &str) -> Option<KeyType> {
    input
        .trim()
        .parse::<KeyType>()
        .ok()
        .filter(|t| KeyType::DECLARABLE.contains(t))
}

/// Feeds one free-text message into a pending registration.
pub async fn advance(
    storage: &dyn StorageAdapter,
    user_id: &str,
    username: &str,
    state: RegistrationState,
    text: &str,
    prefix: &str,
) -> Result<String, PixbotError> {
    match state.declared_type {
        None => {
            let Some(declared) = parse_declared_type(text) else {
                return Ok(replies::INVALID_KEY_TYPE.to_string());
            };
            storage
                .put_registration(
                    user_id,
                    &RegistrationState {
                        declared_type: Some(declared),
                    },
                )
                .await?;
            Ok(replies::ask_key(declared))
        }
        Some(declared) => {
            let key = text.trim();
            if pixbot_pix::classify(key) != declared {
                return Ok(replies::key_mismatch(declared, prefix));
            }
            let record = PixKeyRecord {
                value: key.to_string(),
                key_type: declared,
            };
            storage.put_key(user_id, Some(username), &record).await?;
            storage.clear_registration(user_id).await?;
            info!(user_id, key_type = %declared, "pix key registered");
            Ok(replies::key_registered(declared))
        }
    }
}
