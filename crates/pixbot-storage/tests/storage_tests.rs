// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for SqliteStorage against on-disk databases.

use pixbot_config::model::StorageConfig;
use pixbot_core::{KeyType, PixKeyRecord, StorageAdapter};
use pixbot_storage::{ImportReport, SqliteStorage};

async fn open(dir: &tempfile::TempDir) -> SqliteStorage {
    let storage = SqliteStorage::new(StorageConfig {
        database_path: dir.path().join("pixbot.db").to_string_lossy().into_owned(),
        wal_mode: true,
    });
    storage.initialize().await.unwrap();
    storage
}

#[tokio::test]
async fn legacy_import_then_read_backfills_types() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("database.json");
    std::fs::write(
        &legacy,
        r#"{
            "1": "12345678000195",
            "2": { "chave": "+5511987654321", "tipo": "celular" },
            "3": { "chave": "abc" }
        }"#,
    )
    .unwrap();

    let storage = open(&dir).await;
    let report = storage.import_legacy(&legacy).await.unwrap();
    assert_eq!(
        report,
        ImportReport {
            imported: 3,
            skipped: 0,
            invalid: 0
        }
    );

    let types: Vec<KeyType> = storage
        .list_keys()
        .await
        .unwrap()
        .into_iter()
        .map(|k| k.record.key_type)
        .collect();
    assert!(types.contains(&KeyType::NationalEntityId));
    assert!(types.contains(&KeyType::Phone));
    assert!(types.contains(&KeyType::Unknown));

    // a second run changes nothing
    let again = storage.import_legacy(&legacy).await.unwrap();
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, 3);
}

#[tokio::test]
async fn state_is_shared_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let storage = open(&dir).await;
        storage
            .put_key(
                "42",
                Some("bia"),
                &PixKeyRecord {
                    value: "bia@exemplo.com".into(),
                    key_type: KeyType::Email,
                },
            )
            .await
            .unwrap();
        storage.add_allowed_role("g", "7").await.unwrap();
        storage.set_log_channel("g", "99").await.unwrap();
        storage.close().await.unwrap();
    }

    let storage = open(&dir).await;
    assert_eq!(
        storage.get_key("42").await.unwrap().map(|r| r.key_type),
        Some(KeyType::Email)
    );
    assert_eq!(storage.allowed_roles("g").await.unwrap(), ["7"]);
    assert_eq!(storage.log_channel("g").await.unwrap().as_deref(), Some("99"));
}

#[tokio::test]
async fn missing_legacy_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open(&dir).await;
    let err = storage
        .import_legacy(&dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, pixbot_core::PixbotError::Storage { .. }));
}
