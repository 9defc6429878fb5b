// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline subcommands: `classify`, `payload` and `import-legacy`.

use std::path::{Path, PathBuf};

use clap::Args;
use pixbot_config::PixbotConfig;
use pixbot_core::{PixbotError, StorageAdapter};
use pixbot_pix::{Amount, PaymentRequest};
use pixbot_storage::SqliteStorage;

#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// The receiver's Pix key.
    pub key: String,
    /// Amount in BRL, e.g. `10.50` or `10,50`. Omit for an open amount.
    pub amount: Option<String>,
    /// Receiver name (defaults to `bot.default_payer_name`).
    #[arg(long)]
    pub name: Option<String>,
    /// Receiver city (defaults to `bot.default_city`).
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Transaction reference id.
    #[arg(long)]
    pub txid: Option<String>,
    /// Also write the QR code as a PNG to this path.
    #[arg(long)]
    pub qr: Option<PathBuf>,
}

pub fn classify_label(key: &str) -> &'static str {
    pixbot_pix::classify(key).label()
}

/// Builds the payload described by `args`, filling gaps from `config`.
pub fn build_payload(config: &PixbotConfig, args: &PayloadArgs) -> Result<String, PixbotError> {
    let name = args.name.as_deref().unwrap_or(&config.bot.default_payer_name);
    let city = args.city.as_deref().unwrap_or(&config.bot.default_city);
    let mut request = PaymentRequest::new(args.key.as_str(), name, city);

    if let Some(raw) = &args.amount {
        request = request.with_amount(raw.parse::<Amount>()?);
    }
    if let Some(description) = &args.description {
        request = request.with_description(description.as_str());
    }
    if let Some(txid) = &args.txid {
        request = request.with_reference_id(txid.as_str());
    }
    Ok(pixbot_pix::encode(&request))
}

pub async fn run_payload(config: &PixbotConfig, args: &PayloadArgs) -> Result<(), PixbotError> {
    let payload = build_payload(config, args)?;
    if let Some(path) = &args.qr {
        let png = pixbot_pix::render_qr_png(&payload, config.bot.qr_width)?;
        tokio::fs::write(path, png)
            .await
            .map_err(|e| PixbotError::Internal(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("QR code written to {}", path.display());
    }
    println!("{payload}");
    Ok(())
}

pub async fn run_import_legacy(config: &PixbotConfig, path: &Path) -> Result<(), PixbotError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let report = storage.import_legacy(path).await?;
    storage.close().await?;
    println!(
        "imported {} keys ({} already registered, {} invalid)",
        report.imported, report.skipped, report.invalid
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(key: &str, amount: Option<&str>) -> PayloadArgs {
        PayloadArgs {
            key: key.into(),
            amount: amount.map(str::to_string),
            name: None,
            city: None,
            description: None,
            txid: None,
            qr: None,
        }
    }

    #[test]
    fn classify_prints_labels() {
        assert_eq!(classify_label("test@example.com"), "email");
        assert_eq!(classify_label("11998765432"), "celular");
        assert_eq!(classify_label("abc"), "evp");
    }

    #[test]
    fn payload_uses_config_defaults() {
        let config = PixbotConfig::default();
        let payload = build_payload(&config, &args("chave@exemplo.com", Some("10.50"))).unwrap();
        let parsed = pixbot_pix::parse(&payload).unwrap();
        assert_eq!(parsed.name, "Usuario");
        assert_eq!(parsed.city, "BRASIL");
        assert_eq!(parsed.amount.as_deref(), Some("10.50"));
    }

    #[test]
    fn payload_options_reach_the_codec() {
        let config = PixbotConfig::default();
        let mut a = args("chave@exemplo.com", None);
        a.name = Some("Maria".into());
        a.city = Some("RECIFE".into());
        a.description = Some("pizza".into());
        a.txid = Some("PED1".into());

        let parsed = pixbot_pix::parse(&build_payload(&config, &a).unwrap()).unwrap();
        assert_eq!(parsed.name, "Maria");
        assert_eq!(parsed.city, "RECIFE");
        assert_eq!(parsed.description.as_deref(), Some("pizza"));
        assert_eq!(parsed.reference_id.as_deref(), Some("PED1"));
        assert!(parsed.amount.is_none());
    }

    #[test]
    fn payload_rejects_bad_amount() {
        let config = PixbotConfig::default();
        let err = build_payload(&config, &args("k", Some("0"))).unwrap_err();
        assert!(matches!(err, PixbotError::InvalidAmount { .. }));
    }

    #[tokio::test]
    async fn payload_writes_qr_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pix.png");
        let mut a = args("chave@exemplo.com", Some("1"));
        a.qr = Some(path.clone());

        run_payload(&PixbotConfig::default(), &a).await.unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn import_legacy_into_configured_database() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("database.json");
        std::fs::write(&json, r#"{"1": "chave@exemplo.com"}"#).unwrap();

        let mut config = PixbotConfig::default();
        config.storage.database_path = dir.path().join("pixbot.db").to_string_lossy().to_string();
        run_import_legacy(&config, &json).await.unwrap();

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await.unwrap();
        let key = storage.get_key("1").await.unwrap().unwrap();
        assert_eq!(key.value, "chave@exemplo.com");
    }
}
