// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors raised around the Pix kernel.
//!
//! Encoding and classification are total; only amount parsing, payload
//! decoding and QR rendering can fail.

use pixbot_core::PixbotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PixError {
    /// Amount missing, non-numeric, or not strictly positive.
    #[error("invalid amount `{input}`")]
    InvalidAmount { input: String },

    /// The payload is not a well-formed TLV sequence.
    #[error("malformed payload at byte {offset}: {reason}")]
    MalformedPayload { offset: usize, reason: &'static str },

    /// The checksum trailer does not match the payload body.
    #[error("checksum mismatch: payload declares {actual}, body hashes to {expected}")]
    ChecksumMismatch { expected: String, actual: String },

    /// The QR image could not be produced.
    #[error("QR rendering failed: {0}")]
    Render(String),
}

impl From<PixError> for PixbotError {
    fn from(err: PixError) -> Self {
        match err {
            PixError::InvalidAmount { input } => PixbotError::InvalidAmount { input },
            PixError::Render(message) => PixbotError::Render(message),
            other => PixbotError::Internal(other.to_string()),
        }
    }
}
