// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway event handling and conversion into [`InboundMessage`].

use std::collections::HashMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use pixbot_core::{InboundMessage, MentionedRole, MentionedUser, Mentions, Sender};
use regex::Regex;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::{GuildId, UserId};
use serenity::prelude::{Context, EventHandler};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<#(\d+)>").unwrap());

/// Forwards every human-authored message into the adapter's inbox.
pub struct Handler {
    pub tx: mpsc::Sender<InboundMessage>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = ready.user.name.as_str(),
            guilds = ready.guilds.len(),
            "connected to discord gateway"
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let guild = msg.guild_id.map(|guild_id| guild_snapshot(&ctx, guild_id));
        let inbound = to_inbound_message(&msg, guild.flatten().as_ref());
        debug!(
            message_id = inbound.id.as_str(),
            guild_id = inbound.guild_id.as_deref().unwrap_or("dm"),
            "inbound discord message"
        );
        if self.tx.send(inbound).await.is_err() {
            warn!("inbound channel closed, dropping message");
        }
    }
}

/// What the handler needs from the cached guild, copied out so no cache
/// guard is held across an await.
#[derive(Debug, Clone, Default)]
pub struct GuildSnapshot {
    pub owner_id: u64,
    /// Every role of the guild: name and whether it grants Administrator.
    pub roles: HashMap<u64, (String, bool)>,
    /// The id of the `@everyone` role, which equals the guild id.
    pub everyone_role: u64,
}

fn guild_snapshot(ctx: &Context, guild_id: GuildId) -> Option<GuildSnapshot> {
    let guild = ctx.cache.guild(guild_id)?;
    let roles = guild
        .roles
        .iter()
        .map(|(id, role)| {
            (
                id.get(),
                (role.name.clone(), role.permissions.administrator()),
            )
        })
        .collect();
    Some(GuildSnapshot {
        owner_id: guild.owner_id.get(),
        roles,
        everyone_role: guild_id.get(),
    })
}

impl GuildSnapshot {
    /// Whether `user_id` holding `role_ids` has administrator rights here.
    pub fn is_admin(&self, user_id: u64, role_ids: &[u64]) -> bool {
        if user_id == self.owner_id {
            return true;
        }
        role_ids
            .iter()
            .chain(std::iter::once(&self.everyone_role))
            .filter_map(|id| self.roles.get(id))
            .any(|(_, admin)| *admin)
    }

    fn role_name(&self, role_id: u64) -> Option<&str> {
        self.roles.get(&role_id).map(|(name, _)| name.as_str())
    }
}

/// Converts a gateway message into the channel-agnostic form.
///
/// Without a cached guild the sender is treated as a non-administrator and
/// role mentions fall back to their markup.
pub fn to_inbound_message(msg: &Message, guild: Option<&GuildSnapshot>) -> InboundMessage {
    let role_ids: Vec<u64> = msg
        .member
        .as_ref()
        .map(|member| member.roles.iter().map(|id| id.get()).collect())
        .unwrap_or_default();

    let is_admin = guild.is_some_and(|g| g.is_admin(msg.author.id.get(), &role_ids));

    let users = msg
        .mentions
        .iter()
        .map(|user| MentionedUser {
            id: user.id.to_string(),
            username: user.name.clone(),
            mention: user_mention(user.id),
        })
        .collect();

    let roles = msg
        .mention_roles
        .iter()
        .map(|role_id| MentionedRole {
            id: role_id.to_string(),
            name: guild
                .and_then(|g| g.role_name(role_id.get()))
                .map(str::to_string)
                .unwrap_or_else(|| format!("<@&{role_id}>")),
        })
        .collect();

    InboundMessage {
        id: msg.id.to_string(),
        channel_id: msg.channel_id.to_string(),
        guild_id: msg.guild_id.map(|id| id.to_string()),
        sender: Sender {
            id: msg.author.id.to_string(),
            username: msg.author.name.clone(),
            is_admin,
            role_ids: role_ids.iter().map(u64::to_string).collect(),
        },
        content: msg.content.clone(),
        mentions: Mentions {
            users,
            roles,
            channels: parse_channel_mentions(&msg.content),
        },
        timestamp: msg.timestamp.to_string(),
    }
}

fn user_mention(id: UserId) -> String {
    format!("<@{id}>")
}

/// Extracts `<#id>` channel mentions as `(id, markup)` pairs, in order.
pub fn parse_channel_mentions(content: &str) -> Vec<(String, String)> {
    CHANNEL_MENTION
        .captures_iter(content)
        .map(|caps| (caps[1].to_string(), caps[0].to_string()))
        .collect()
}
