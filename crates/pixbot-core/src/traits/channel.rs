// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for chat platform integrations.

use async_trait::async_trait;

use crate::error::PixbotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelCapabilities, InboundMessage, MessageId, OutboundMessage};

/// Bidirectional connection to a chat platform.
///
/// Adapters deliver every human-authored message through [`receive`](Self::receive)
/// and translate [`OutboundMessage`]s, attachments included, into platform calls.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Returns the capabilities supported by this channel.
    fn capabilities(&self) -> ChannelCapabilities;

    /// Establishes a connection to the chat platform.
    async fn connect(&mut self) -> Result<(), PixbotError>;

    /// Sends a message through the channel.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PixbotError>;

    /// Receives the next inbound message from the channel.
    async fn receive(&self) -> Result<InboundMessage, PixbotError>;
}
