// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Pixbot.
//!
//! WAL-mode SQLite with embedded migrations and a single-writer
//! connection via `tokio-rusqlite`. Holds registered keys, the per-guild
//! role allow-list, pending registrations and guild settings.

pub mod adapter;
pub mod database;
pub mod legacy;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
pub use legacy::ImportReport;
