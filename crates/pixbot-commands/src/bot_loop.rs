// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The receive, dispatch and send loop.

use std::sync::Arc;

use pixbot_core::{ChannelAdapter, InboundMessage, PixbotError, StorageAdapter};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::dispatcher::{CommandDispatcher, DispatchSettings};

/// Pulls messages from a channel, dispatches them, and sends the replies.
pub struct BotLoop {
    channel: Arc<dyn ChannelAdapter>,
    storage: Arc<dyn StorageAdapter>,
    dispatcher: CommandDispatcher,
}

impl BotLoop {
    pub fn new(
        channel: Arc<dyn ChannelAdapter>,
        storage: Arc<dyn StorageAdapter>,
        settings: DispatchSettings,
    ) -> Self {
        let dispatcher = CommandDispatcher::new(storage.clone(), settings);
        info!(
            channel = channel.name(),
            storage = storage.name(),
            "bot loop initialized"
        );
        Self {
            channel,
            storage,
            dispatcher,
        }
    }

    /// Runs until `cancel` fires or the channel closes, then closes storage.
    ///
    /// A failure while handling one message is logged and the loop goes on.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), PixbotError> {
        info!("bot loop running");

        loop {
            tokio::select! {
                msg = self.channel.receive() => {
                    match msg {
                        Ok(inbound) => {
                            if let Err(e) = self.handle_inbound(&inbound).await {
                                error!(error = %e, message_id = inbound.id.as_str(), "failed to handle inbound message");
                            }
                        }
                        Err(e) if e.is_channel_closed() => {
                            warn!(error = %e, "channel closed, stopping bot loop");
                            break;
                        }
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping bot loop");
                    break;
                }
            }
        }

        self.storage.close().await?;
        info!("bot loop stopped");
        Ok(())
    }

    /// Dispatches one message and sends every resulting message in order.
    pub async fn handle_inbound(&self, inbound: &InboundMessage) -> Result<(), PixbotError> {
        let outbound = self.dispatcher.handle(inbound).await?;
        for msg in outbound {
            let channel_id = msg.channel_id.clone();
            if let Err(e) = self.channel.send(msg).await {
                error!(error = %e, channel_id = channel_id.as_str(), "failed to send message");
            }
        }
        Ok(())
    }
}
