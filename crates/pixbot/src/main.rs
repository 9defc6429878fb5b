// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! pixbot - a Discord bot for Pix keys and payment QR codes.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pixbot - a Discord bot for Pix keys and payment QR codes.
#[derive(Parser, Debug)]
#[command(name = "pixbot", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to Discord and answer commands.
    Serve,
    /// Print the type of a Pix key.
    Classify {
        /// The key to classify.
        key: String,
    },
    /// Print the copy-and-paste payload for a key.
    Payload(tools::PayloadArgs),
    /// Import keys from the JSON database of the previous bot.
    ImportLegacy {
        /// Path to `database.json`.
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => pixbot_config::load_and_validate_path(path),
        None => pixbot_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            pixbot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Classify { key }) => {
            println!("{}", tools::classify_label(&key));
            Ok(())
        }
        Some(Commands::Payload(args)) => tools::run_payload(&config, &args).await,
        Some(Commands::ImportLegacy { path }) => tools::run_import_legacy(&config, &path).await,
        None => {
            println!("pixbot: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_payload_options() {
        let cli = Cli::try_parse_from([
            "pixbot",
            "payload",
            "chave@exemplo.com",
            "10,50",
            "--name",
            "Maria",
            "--txid",
            "PED1",
            "--qr",
            "out.png",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Payload(args)) => {
                assert_eq!(args.key, "chave@exemplo.com");
                assert_eq!(args.amount.as_deref(), Some("10,50"));
                assert_eq!(args.name.as_deref(), Some("Maria"));
                assert_eq!(args.txid.as_deref(), Some("PED1"));
                assert_eq!(args.qr, Some(PathBuf::from("out.png")));
                assert!(args.city.is_none());
            }
            other => panic!("expected payload, got {other:?}"),
        }
    }

    #[test]
    fn cli_accepts_global_config_flag() {
        let cli = Cli::try_parse_from(["pixbot", "serve", "--config", "/tmp/p.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn cli_parses_import_legacy() {
        let cli = Cli::try_parse_from(["pixbot", "import-legacy", "database.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::ImportLegacy { ref path }) if path == &PathBuf::from("database.json")
        ));
    }
}
