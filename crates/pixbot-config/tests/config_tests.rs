// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Pixbot configuration system.

use pixbot_config::diagnostic::ConfigError;
use pixbot_config::model::PixbotConfig;
use pixbot_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_pixbot_config() {
    let toml = r#"
[bot]
name = "caixinha"
log_level = "debug"
command_prefix = "?"
default_payer_name = "Cliente"
default_city = "SAO PAULO"
qr_width = 400

[discord]
bot_token = "abc.def.ghi"
allowed_roles = ["111", "222"]

[storage]
database_path = "/tmp/pixbot-test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.bot.name, "caixinha");
    assert_eq!(config.bot.log_level, "debug");
    assert_eq!(config.bot.command_prefix, "?");
    assert_eq!(config.bot.default_payer_name, "Cliente");
    assert_eq!(config.bot.default_city, "SAO PAULO");
    assert_eq!(config.bot.qr_width, 400);
    assert_eq!(config.discord.bot_token.as_deref(), Some("abc.def.ghi"));
    assert_eq!(config.discord.allowed_roles, vec!["111", "222"]);
    assert_eq!(config.storage.database_path, "/tmp/pixbot-test.db");
    assert!(!config.storage.wal_mode);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    let defaults = PixbotConfig::default();
    assert_eq!(config.bot.default_city, defaults.bot.default_city);
    assert_eq!(config.bot.qr_width, 300);
    assert!(config.discord.bot_token.is_none());
}

#[test]
fn dotted_override_reaches_bot_token() {
    use figment::{Figment, providers::Serialized};

    let config: PixbotConfig = Figment::new()
        .merge(Serialized::defaults(PixbotConfig::default()))
        .merge(("discord.bot_token", "xyz-from-env"))
        .extract()
        .expect("should set bot_token via dot notation");

    assert_eq!(config.discord.bot_token.as_deref(), Some("xyz-from-env"));
}

#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[bot]
default_ctiy = "RECIFE"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "default_ctiy"
                && suggestion.as_deref() == Some("default_city")
                && valid_keys.contains("qr_width")
        })
    });
    assert!(found, "expected UnknownKey for default_ctiy, got: {errors:?}");
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let errors = load_and_validate_str("[telegram]\nbot_token = \"x\"\n")
        .expect_err("unknown section should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "telegram"))
    );
}

#[test]
fn invalid_type_is_reported() {
    let errors = load_and_validate_str("[bot]\nqr_width = \"wide\"\n")
        .expect_err("string width should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("qr_width"))),
        "got: {errors:?}"
    );
}

#[test]
fn validation_errors_surface_through_loader() {
    let errors = load_and_validate_str("[bot]\nqr_width = 5000\n")
        .expect_err("out-of-range width should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("qr_width"))
    ));
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "naem".to_string(),
        suggestion: Some("name".to_string()),
        valid_keys: "name, log_level".to_string(),
        span: None,
        src: None,
    };
    assert_eq!(
        error.code().map(|c| c.to_string()).as_deref(),
        Some("pixbot::config::unknown_key")
    );

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("naem"));
    assert!(buf.contains("did you mean `name`"));
}

#[test]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[bot]\ndefault_city = \"NATAL\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file should load");
    assert_eq!(config.bot.default_city, "NATAL");
}

#[test]
fn explicit_path_errors_point_into_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[storage]\nwal_mod = true\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("typo should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { suggestion, .. } if suggestion.as_deref() == Some("wal_mode")
    )));
}
