// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord channel adapter for pixbot.
//!
//! Implements [`ChannelAdapter`] on top of serenity: the gateway client runs
//! in a background task and pushes messages into a bounded inbox, while
//! replies go out through the REST client with PNG attachments.

pub mod handler;
pub mod split;

use std::sync::Arc;

use async_trait::async_trait;
use pixbot_config::model::DiscordConfig;
use pixbot_core::{
    AdapterType, ChannelAdapter, ChannelCapabilities, HealthStatus, InboundMessage, MessageId,
    OutboundMessage, PixbotError, PluginAdapter,
};
use serenity::all::{ChannelId, CreateAttachment, CreateMessage, GatewayIntents, Http};
use serenity::Client;
use serenity::gateway::ShardManager;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info};

use crate::handler::Handler;
use crate::split::{MAX_MESSAGE_LENGTH, split_message};

/// Capacity of the inbound message queue.
const INBOX_CAPACITY: usize = 100;

/// Discord channel adapter implementing [`ChannelAdapter`].
pub struct DiscordChannel {
    token: String,
    http: Arc<Http>,
    inbound_rx: Mutex<mpsc::Receiver<InboundMessage>>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    shard_manager: Option<Arc<ShardManager>>,
    client_handle: Option<tokio::task::JoinHandle<()>>,
}

impl DiscordChannel {
    /// Creates a new Discord channel adapter.
    ///
    /// Requires `config.bot_token` to be set and non-empty.
    pub fn new(config: &DiscordConfig) -> Result<Self, PixbotError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            PixbotError::Config(
                "discord.bot_token is required (or set DISCORD_TOKEN)".into(),
            )
        })?;
        if token.trim().is_empty() {
            return Err(PixbotError::Config("discord.bot_token cannot be empty".into()));
        }

        let (inbound_tx, inbound_rx) = mpsc::channel(INBOX_CAPACITY);
        Ok(Self {
            token: token.to_string(),
            http: Arc::new(Http::new(token)),
            inbound_rx: Mutex::new(inbound_rx),
            inbound_tx,
            shard_manager: None,
            client_handle: None,
        })
    }

    /// Gateway intents the bot needs to read commands in guilds and DMs.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl PluginAdapter for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, PixbotError> {
        match self.http.get_current_user().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("discord unreachable: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), PixbotError> {
        debug!("discord channel shutting down");
        if let Some(shard_manager) = &self.shard_manager {
            shard_manager.shutdown_all().await;
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for DiscordChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_attachments: true,
            supports_mentions: true,
            max_message_length: Some(MAX_MESSAGE_LENGTH),
        }
    }

    async fn connect(&mut self) -> Result<(), PixbotError> {
        if self.client_handle.is_some() {
            return Ok(());
        }

        let handler = Handler {
            tx: self.inbound_tx.clone(),
        };
        let mut client = Client::builder(&self.token, Self::intents())
            .event_handler(handler)
            .await
            .map_err(|e| PixbotError::Channel {
                message: format!("failed to build discord client: {e}"),
                source: Some(Box::new(e)),
            })?;

        self.shard_manager = Some(client.shard_manager.clone());
        info!("starting discord gateway client");

        let handle = tokio::spawn(async move {
            if let Err(e) = client.start().await {
                error!(error = %e, "discord client stopped");
            }
        });
        self.client_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PixbotError> {
        let channel_id = parse_channel_id(&msg.channel_id)?;
        let reference = msg
            .reply_to
            .as_ref()
            .and_then(|id| id.0.parse::<u64>().ok())
            .filter(|&id| id != 0)
            .map(serenity::all::MessageId::new);

        let parts = split_message(&msg.content, MAX_MESSAGE_LENGTH);
        let last = parts.len() - 1;
        let mut sent_id = None;

        for (i, part) in parts.into_iter().enumerate() {
            let mut builder = CreateMessage::new().content(part);
            if i == 0
                && let Some(reference) = reference
            {
                builder = builder.reference_message((channel_id, reference));
            }
            if i == last
                && let Some(attachment) = &msg.attachment
            {
                builder = builder.add_file(CreateAttachment::bytes(
                    attachment.bytes.clone(),
                    attachment.filename.clone(),
                ));
            }

            let sent = channel_id
                .send_message(&self.http, builder)
                .await
                .map_err(|e| PixbotError::Channel {
                    message: format!("failed to send message: {e}"),
                    source: Some(Box::new(e)),
                })?;
            sent_id = Some(sent.id);
        }

        sent_id
            .map(|id| MessageId(id.to_string()))
            .ok_or_else(|| PixbotError::Internal("no message part was sent".into()))
    }

    async fn receive(&self) -> Result<InboundMessage, PixbotError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| PixbotError::Channel {
            message: "discord inbound channel closed".into(),
            source: None,
        })
    }
}

fn parse_channel_id(raw: &str) -> Result<ChannelId, PixbotError> {
    raw.parse::<u64>()
        .ok()
        .filter(|&id| id != 0)
        .map(ChannelId::new)
        .ok_or_else(|| PixbotError::Channel {
            message: format!("invalid discord channel id `{raw}`"),
            source: None,
        })
}
