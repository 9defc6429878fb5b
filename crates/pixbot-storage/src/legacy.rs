// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Import of the JSON key file used by earlier deployments of the bot.
//!
//! The file maps user ids to either a bare key string or an object
//! `{"chave": ..., "tipo": ...}` whose type may be missing or null.

use std::collections::BTreeMap;
use std::path::Path;

use pixbot_core::{KeyType, PixbotError};
use serde::Deserialize;
use tracing::{info, warn};

use crate::database::Database;
use crate::queries;

/// One value of the legacy map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyEntry {
    Bare(String),
    Typed {
        chave: String,
        #[serde(default)]
        tipo: Option<String>,
    },
}

impl LegacyEntry {
    pub fn key(&self) -> &str {
        match self {
            LegacyEntry::Bare(key) => key,
            LegacyEntry::Typed { chave, .. } => chave,
        }
    }

    /// The recorded type, if present and recognizable.
    pub fn key_type(&self) -> Option<KeyType> {
        match self {
            LegacyEntry::Bare(_) => None,
            LegacyEntry::Typed { tipo, .. } => tipo.as_deref().and_then(|t| t.parse().ok()),
        }
    }
}

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    /// Users that already had a key in the database.
    pub skipped: usize,
    /// Entries with an empty key.
    pub invalid: usize,
}

/// Parses the legacy file contents.
pub fn parse(json: &str) -> Result<BTreeMap<String, LegacyEntry>, PixbotError> {
    serde_json::from_str(json).map_err(PixbotError::storage)
}

/// Imports every entry of `path`. Untyped entries are stored without a type
/// and classified when first read.
pub async fn import_file(db: &Database, path: &Path) -> Result<ImportReport, PixbotError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(PixbotError::storage)?;
    let entries = parse(&json)?;
    let report = import_entries(db, &entries).await?;
    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        invalid = report.invalid,
        "legacy import finished"
    );
    Ok(report)
}

pub async fn import_entries(
    db: &Database,
    entries: &BTreeMap<String, LegacyEntry>,
) -> Result<ImportReport, PixbotError> {
    let mut report = ImportReport::default();
    for (user_id, entry) in entries {
        let key = entry.key().trim();
        if key.is_empty() {
            warn!(user_id = %user_id, "skipping legacy entry with empty key");
            report.invalid += 1;
            continue;
        }
        let key_type = entry.key_type().map(KeyType::label);
        if queries::keys::insert_key_if_absent(db, user_id, key, key_type).await? {
            report.imported += 1;
        } else {
            report.skipped += 1;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "100": "ana@exemplo.com",
        "200": { "chave": "12345678901", "tipo": "cpf" },
        "300": { "chave": "11998765432" },
        "400": { "chave": "123e4567-e89b-12d3-a456-426614174000", "tipo": null },
        "500": { "chave": "  " }
    }"#;

    #[test]
    fn parses_both_shapes() {
        let entries = parse(SAMPLE).unwrap();
        assert_eq!(entries["100"], LegacyEntry::Bare("ana@exemplo.com".into()));
        assert_eq!(
            entries["200"].key_type(),
            Some(KeyType::NationalIndividualId)
        );
        assert_eq!(entries["300"].key_type(), None);
        assert_eq!(entries["400"].key_type(), None);
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(parse("[1, 2]").is_err());
    }

    #[tokio::test]
    async fn import_counts_and_keeps_existing() {
        let db = Database::open_in_memory().await.unwrap();
        queries::keys::upsert_key(&db, "200", None, "existing@x.com", Some("email"))
            .await
            .unwrap();

        let report = import_entries(&db, &parse(SAMPLE).unwrap()).await.unwrap();
        assert_eq!(
            report,
            ImportReport {
                imported: 3,
                skipped: 1,
                invalid: 1
            }
        );

        let kept = queries::keys::get_key(&db, "200").await.unwrap().unwrap();
        assert_eq!(kept.key_value, "existing@x.com");
        let bare = queries::keys::get_key(&db, "100").await.unwrap().unwrap();
        assert_eq!(bare.key_type, None);
    }

    #[tokio::test]
    async fn import_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, r#"{"1": {"chave": "a@b.co", "tipo": "email"}}"#).unwrap();

        let db = Database::open_in_memory().await.unwrap();
        let report = import_file(&db, &path).await.unwrap();
        assert_eq!(report.imported, 1);
    }
}
