// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types as stored, before classification is applied.

use pixbot_core::{KeyType, PixKeyRecord, StoredKey};

/// A `pix_keys` row. `key_type` holds the raw label and may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRow {
    pub user_id: String,
    pub username: Option<String>,
    pub key_value: String,
    pub key_type: Option<String>,
}

impl KeyRow {
    /// The stored type, if present and recognizable.
    pub fn stored_type(&self) -> Option<KeyType> {
        self.key_type.as_deref().and_then(|t| t.parse().ok())
    }

    /// Converts to a record, classifying the value when no usable type is stored.
    pub fn into_stored_key(self) -> StoredKey {
        let key_type = self
            .stored_type()
            .unwrap_or_else(|| pixbot_pix::classify(&self.key_value));
        StoredKey {
            user_id: self.user_id,
            username: self.username,
            record: PixKeyRecord {
                value: self.key_value,
                key_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(value: &str, key_type: Option<&str>) -> KeyRow {
        KeyRow {
            user_id: "1".into(),
            username: None,
            key_value: value.into(),
            key_type: key_type.map(str::to_string),
        }
    }

    #[test]
    fn stored_type_is_trusted() {
        let key = row("12345678901", Some("cpf")).into_stored_key();
        assert_eq!(key.record.key_type, KeyType::NationalIndividualId);
    }

    #[test]
    fn missing_or_garbled_type_is_classified() {
        assert_eq!(
            row("a@b.co", None).into_stored_key().record.key_type,
            KeyType::Email
        );
        assert_eq!(
            row("11998765432", Some("telefone")).into_stored_key().record.key_type,
            KeyType::Phone
        );
    }
}
