// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for inbound messages.

use pixbot_core::{InboundMessage, MentionedRole, MentionedUser, Mentions, Sender};

/// Guild id used by [`MessageBuilder::guild`].
pub const TEST_GUILD: &str = "900";
/// Channel id used by [`MessageBuilder::guild`].
pub const TEST_CHANNEL: &str = "901";

/// Builds an [`InboundMessage`] the way a channel adapter would deliver it.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    msg: InboundMessage,
}

impl MessageBuilder {
    /// A direct message from user `1` (`ana`).
    pub fn dm(content: &str) -> Self {
        Self {
            msg: InboundMessage {
                id: uuid::Uuid::new_v4().to_string(),
                channel_id: "800".into(),
                guild_id: None,
                sender: Sender {
                    id: "1".into(),
                    username: "ana".into(),
                    is_admin: false,
                    role_ids: Vec::new(),
                },
                content: content.into(),
                mentions: Mentions::default(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// A message in [`TEST_GUILD`] from user `1` (`ana`).
    pub fn guild(content: &str) -> Self {
        let mut builder = Self::dm(content);
        builder.msg.guild_id = Some(TEST_GUILD.into());
        builder.msg.channel_id = TEST_CHANNEL.into();
        builder
    }

    pub fn from_user(mut self, id: &str, username: &str) -> Self {
        self.msg.sender.id = id.into();
        self.msg.sender.username = username.into();
        self
    }

    pub fn admin(mut self) -> Self {
        self.msg.sender.is_admin = true;
        self
    }

    pub fn with_role(mut self, role_id: &str) -> Self {
        self.msg.sender.role_ids.push(role_id.into());
        self
    }

    pub fn mention_user(mut self, id: &str, username: &str) -> Self {
        self.msg.mentions.users.push(MentionedUser {
            id: id.into(),
            username: username.into(),
            mention: format!("<@{id}>"),
        });
        self
    }

    pub fn mention_role(mut self, id: &str, name: &str) -> Self {
        self.msg.mentions.roles.push(MentionedRole {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn mention_channel(mut self, id: &str) -> Self {
        self.msg
            .mentions
            .channels
            .push((id.into(), format!("<#{id}>")));
        self
    }

    pub fn build(self) -> InboundMessage {
        self.msg
    }
}
