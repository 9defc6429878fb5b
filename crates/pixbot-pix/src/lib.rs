// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pix kernel for Pixbot.
//!
//! Everything here is pure and synchronous apart from logging:
//! - [`classifier`] labels a raw key string with its [`KeyType`](pixbot_core::KeyType).
//! - [`payload`] encodes and decodes static BR Code payloads.
//! - [`crc`] and [`tlv`] are the wire primitives the codec is made of.
//! - [`amount`] parses user-entered values into centavos.
//! - [`qr`] turns a payload into a PNG.

pub mod amount;
pub mod classifier;
pub mod crc;
pub mod error;
pub mod payload;
pub mod qr;
pub mod tlv;

pub use amount::Amount;
pub use classifier::classify;
pub use error::PixError;
pub use payload::{ParsedPayload, PaymentRequest, encode, parse};
pub use qr::{DEFAULT_WIDTH, render_qr_png};
