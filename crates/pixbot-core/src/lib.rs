// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the pixbot workspace.
//!
//! This crate provides the trait definitions, error type and shared types
//! used by every other crate. Channel and storage adapters implement the
//! traits defined here; the Pix kernel consumes the key types.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PixbotError;
pub use types::{
    AdapterType, Attachment, ChannelCapabilities, HealthStatus, InboundMessage, KeyType,
    MentionedRole, MentionedUser, Mentions, MessageId, OutboundMessage, PixKeyRecord,
    RegistrationState, Sender, StoredKey,
};

pub use traits::{ChannelAdapter, PluginAdapter, StorageAdapter};
