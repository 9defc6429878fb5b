// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every pixbot crate.

use thiserror::Error;

/// The primary error type used across adapter traits and bot operations.
#[derive(Debug, Error)]
pub enum PixbotError {
    /// Configuration errors (invalid TOML, missing token, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel adapter errors (gateway failure, send failure, closed inbox).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An amount argument was missing, non-numeric, or not positive.
    #[error("invalid amount `{input}`")]
    InvalidAmount { input: String },

    /// QR image rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PixbotError {
    /// Wraps any error as a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        PixbotError::Storage {
            source: Box::new(err),
        }
    }

    /// Returns true when the error means a channel can no longer deliver messages.
    pub fn is_channel_closed(&self) -> bool {
        matches!(self, PixbotError::Channel { message, .. } if message.contains("closed"))
    }
}
