// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes inbound messages to command handlers.
//!
//! The [`CommandDispatcher`] turns one inbound message into zero or more
//! outbound messages: the reply itself and, for generated payment codes, a
//! line in the guild's log channel. It holds no mutable state; the
//! allow-list, pending registrations and log channels live in storage.

use std::sync::Arc;

use pixbot_config::PixbotConfig;
use pixbot_core::{
    Attachment, InboundMessage, OutboundMessage, PixKeyRecord, PixbotError,
    StorageAdapter,
};
use pixbot_pix::{Amount, PaymentRequest};
use tracing::{debug, info, warn};

use crate::command::{self, CommandName, Invocation, Parsed};
use crate::permissions::{self, Access};
use crate::{registration, replies};

/// Settings the dispatcher reads from configuration.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub prefix: String,
    /// Payer name used when the key owner has no username.
    pub default_payer_name: String,
    pub default_city: String,
    pub qr_width: u32,
    /// Role ids seeded into each guild's allow-list the first time it is seen.
    pub seed_roles: Vec<String>,
}

impl DispatchSettings {
    pub fn from_config(config: &PixbotConfig) -> Self {
        Self {
            prefix: config.bot.command_prefix.clone(),
            default_payer_name: config.bot.default_payer_name.clone(),
            default_city: config.bot.default_city.clone(),
            qr_width: config.bot.qr_width,
            seed_roles: config.discord.allowed_roles.clone(),
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from_config(&PixbotConfig::default())
    }
}

/// Handles the `pix*` command family.
pub struct CommandDispatcher {
    storage: Arc<dyn StorageAdapter>,
    settings: DispatchSettings,
}

/// Whose key a payment code is generated for.
struct KeyOwner<'a> {
    username: &'a str,
    /// How the owner is shown in replies and log lines.
    display: &'a str,
}

impl CommandDispatcher {
    pub fn new(storage: Arc<dyn StorageAdapter>, settings: DispatchSettings) -> Self {
        Self { storage, settings }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Handles one inbound message and returns the messages to send.
    ///
    /// Free text from a user with a pending registration feeds the dialogue.
    /// Other free text and unknown commands produce nothing.
    pub async fn handle(&self, msg: &InboundMessage) -> Result<Vec<OutboundMessage>, PixbotError> {
        let invocation = match command::parse(&self.settings.prefix, &msg.content) {
            Parsed::NotCommand => return self.handle_free_text(msg).await,
            Parsed::Unknown(word) => {
                debug!(word, "ignoring unknown command");
                return Ok(Vec::new());
            }
            Parsed::Command(invocation) => invocation,
        };

        let name = invocation.name;
        metrics::counter!("pixbot_commands_total", "command" => name.to_string()).increment(1);
        debug!(
            command = %name,
            sender_id = msg.sender.id.as_str(),
            guild_id = msg.guild_id.as_deref().unwrap_or("dm"),
            "dispatching command"
        );

        match permissions::check(self.storage.as_ref(), &self.settings.seed_roles, msg, name)
            .await?
        {
            Access::Granted => {}
            Access::Denied => {
                debug!(command = %name, sender_id = msg.sender.id.as_str(), "sender not permitted");
                return single(msg, replies::NOT_PERMITTED);
            }
            Access::AdminRequired => {
                return single(msg, admin_only_reply(name));
            }
        }

        self.run(msg, &invocation).await
    }

    async fn handle_free_text(
        &self,
        msg: &InboundMessage,
    ) -> Result<Vec<OutboundMessage>, PixbotError> {
        let Some(state) = self.storage.get_registration(&msg.sender.id).await? else {
            return Ok(Vec::new());
        };
        let reply = registration::advance(
            self.storage.as_ref(),
            &msg.sender.id,
            &msg.sender.username,
            state,
            &msg.content,
            &self.settings.prefix,
        )
        .await?;
        Ok(vec![OutboundMessage::reply(msg, reply)])
    }

    async fn run(
        &self,
        msg: &InboundMessage,
        invocation: &Invocation<'_>,
    ) -> Result<Vec<OutboundMessage>, PixbotError> {
        let p = self.settings.prefix.as_str();
        let text = match invocation.name {
            CommandName::PixAdd => self.add_role(msg).await?,
            CommandName::PixRem => self.remove_role(msg).await?,
            CommandName::PixReg => match invocation.args.first() {
                None => registration::start(self.storage.as_ref(), &msg.sender.id).await?,
                Some(key) => {
                    registration::register_direct(
                        self.storage.as_ref(),
                        &msg.sender.id,
                        &msg.sender.username,
                        key,
                    )
                    .await?
                }
            },
            CommandName::Pix => return self.own_key(msg, invocation.args.first().copied()).await,
            CommandName::PixVer => self.view_other(msg).await?,
            CommandName::PixQrCode => return self.other_qr(msg, invocation).await,
            CommandName::PixCopy => return self.copy_paste(msg, invocation).await,
            CommandName::PixDel => {
                if self.storage.delete_key(&msg.sender.id).await? {
                    info!(user_id = msg.sender.id.as_str(), "pix key deleted");
                    replies::KEY_DELETED.to_string()
                } else {
                    replies::NO_KEY_TO_DELETE.to_string()
                }
            }
            CommandName::PixList => {
                let keys = self.storage.list_keys().await?;
                if keys.is_empty() {
                    replies::NO_KEYS.to_string()
                } else {
                    replies::key_list(&keys)
                }
            }
            CommandName::PixLog => self.set_log_channel(msg).await?,
            CommandName::PixCmd => replies::command_list(p),
            CommandName::PixHelp => replies::help(p),
            CommandName::PixInfo => replies::info(p),
        };
        Ok(vec![OutboundMessage::reply(msg, text)])
    }

    // --- Allow-list ---

    async fn add_role(&self, msg: &InboundMessage) -> Result<String, PixbotError> {
        let guild_id = guild_of(msg)?;
        let Some(role) = msg.mentions.roles.first() else {
            return Ok(replies::mention_role_to_add(&self.settings.prefix));
        };
        if self.storage.add_allowed_role(guild_id, &role.id).await? {
            info!(guild_id, role_id = role.id.as_str(), "role allowed");
            Ok(replies::role_added(&role.name))
        } else {
            Ok(replies::role_already_allowed(&role.name))
        }
    }

    async fn remove_role(&self, msg: &InboundMessage) -> Result<String, PixbotError> {
        let guild_id = guild_of(msg)?;
        let Some(role) = msg.mentions.roles.first() else {
            return Ok(replies::mention_role_to_remove(&self.settings.prefix));
        };
        if self.storage.remove_allowed_role(guild_id, &role.id).await? {
            info!(guild_id, role_id = role.id.as_str(), "role removed from allow-list");
            Ok(replies::role_removed(&role.name))
        } else {
            Ok(replies::role_not_allowed(&role.name))
        }
    }

    async fn set_log_channel(&self, msg: &InboundMessage) -> Result<String, PixbotError> {
        let guild_id = guild_of(msg)?;
        let Some((channel_id, mention)) = msg.mentions.channels.first() else {
            return Ok(replies::mention_log_channel(&self.settings.prefix));
        };
        self.storage.set_log_channel(guild_id, channel_id).await?;
        info!(guild_id, channel_id = channel_id.as_str(), "log channel set");
        Ok(replies::log_channel_set(mention))
    }

    // --- Keys and payment codes ---

    async fn own_key(
        &self,
        msg: &InboundMessage,
        amount_arg: Option<&str>,
    ) -> Result<Vec<OutboundMessage>, PixbotError> {
        let p = self.settings.prefix.as_str();
        let Some(amount_arg) = amount_arg else {
            let text = match self.storage.get_key(&msg.sender.id).await? {
                Some(record) => replies::own_key(record.key_type, &record.value),
                None => replies::no_key_yet(p),
            };
            return single(msg, text);
        };

        let Ok(amount) = amount_arg.parse::<Amount>() else {
            return single(msg, replies::invalid_amount(p));
        };
        let Some(record) = self.storage.get_key(&msg.sender.id).await? else {
            return single(msg, replies::no_key_yet(p));
        };

        let owner = KeyOwner {
            username: &msg.sender.username,
            display: &msg.sender.username,
        };
        let payload = self.payload(&record, owner.username, amount);
        let text = replies::own_qr_generated(amount, &record.value, record.key_type, &payload);
        let filename = format!("pix-r{amount}.png");
        self.qr_reply(msg, &owner, &payload, amount, text, filename)
            .await
    }

    async fn view_other(&self, msg: &InboundMessage) -> Result<String, PixbotError> {
        let Some(user) = msg.mentions.users.first() else {
            return Ok(replies::mention_user_to_view(&self.settings.prefix));
        };
        Ok(match self.storage.get_key(&user.id).await? {
            Some(record) => replies::other_key(record.key_type, &user.mention, &record.value),
            None => replies::OTHER_HAS_NO_KEY.to_string(),
        })
    }

    async fn other_qr(
        &self,
        msg: &InboundMessage,
        invocation: &Invocation<'_>,
    ) -> Result<Vec<OutboundMessage>, PixbotError> {
        let usage = || single(msg, replies::qrcode_usage(&self.settings.prefix));
        let (Some(user), Some(amount_arg)) =
            (msg.mentions.users.first(), invocation.first_plain_arg())
        else {
            return usage();
        };
        let Ok(amount) = amount_arg.parse::<Amount>() else {
            return usage();
        };
        let Some(record) = self.storage.get_key(&user.id).await? else {
            return single(msg, replies::OTHER_HAS_NO_KEY);
        };

        let owner = KeyOwner {
            username: &user.username,
            display: &user.mention,
        };
        let payload = self.payload(&record, owner.username, amount);
        let text = replies::other_qr_generated(amount, owner.display, record.key_type, &record.value);
        let filename = format!("pix-{}-r{amount}.png", user.username);
        self.qr_reply(msg, &owner, &payload, amount, text, filename)
            .await
    }

    async fn copy_paste(
        &self,
        msg: &InboundMessage,
        invocation: &Invocation<'_>,
    ) -> Result<Vec<OutboundMessage>, PixbotError> {
        let p = self.settings.prefix.as_str();
        let Some(amount_arg) = invocation.first_plain_arg() else {
            return single(msg, replies::copy_missing_amount(p));
        };
        let Ok(amount) = amount_arg.parse::<Amount>() else {
            return single(msg, replies::copy_invalid_amount(p));
        };
        let Some(record) = self.storage.get_key(&msg.sender.id).await? else {
            return single(msg, replies::no_key_yet(p));
        };

        let payload = self.payload(&record, &msg.sender.username, amount);
        metrics::counter!("pixbot_payloads_generated_total", "kind" => "copy_paste").increment(1);

        let mut out = vec![OutboundMessage::reply(msg, replies::copy_paste(amount, &payload))];
        out.extend(
            self.log_line(msg, replies::log_copy_paste(&msg.sender.username, amount))
                .await?,
        );
        Ok(out)
    }

    /// Encodes the payload for `record`, naming the payer after `username`.
    fn payload(&self, record: &PixKeyRecord, username: &str, amount: Amount) -> String {
        let payer_name = if username.trim().is_empty() {
            self.settings.default_payer_name.as_str()
        } else {
            username
        };
        let request = PaymentRequest::new(
            record.value.as_str(),
            payer_name,
            self.settings.default_city.as_str(),
        )
        .with_amount(amount);
        pixbot_pix::encode(&request)
    }

    async fn qr_reply(
        &self,
        msg: &InboundMessage,
        owner: &KeyOwner<'_>,
        payload: &str,
        amount: Amount,
        text: String,
        filename: String,
    ) -> Result<Vec<OutboundMessage>, PixbotError> {
        let png = match pixbot_pix::render_qr_png(payload, self.settings.qr_width) {
            Ok(png) => png,
            Err(e) => {
                warn!(error = %e, "qr rendering failed");
                return single(msg, replies::QR_ERROR);
            }
        };
        metrics::counter!("pixbot_payloads_generated_total", "kind" => "qr").increment(1);
        info!(
            sender_id = msg.sender.id.as_str(),
            owner = owner.username,
            %amount,
            "pix qr generated"
        );

        let reply = OutboundMessage::reply(msg, text).with_attachment(Attachment {
            filename,
            bytes: png,
        });
        let mut out = vec![reply];
        out.extend(
            self.log_line(msg, replies::log_qr(&msg.sender.username, owner.display, amount))
                .await?,
        );
        Ok(out)
    }

    /// A message for the guild's log channel, when one is configured.
    async fn log_line(
        &self,
        msg: &InboundMessage,
        text: String,
    ) -> Result<Option<OutboundMessage>, PixbotError> {
        let Some(guild_id) = msg.guild_id.as_deref() else {
            return Ok(None);
        };
        Ok(self
            .storage
            .log_channel(guild_id)
            .await?
            .map(|channel_id| OutboundMessage::to_channel(channel_id, text)))
    }
}

fn admin_only_reply(name: CommandName) -> &'static str {
    match name {
        CommandName::PixAdd => replies::ADMIN_ONLY_ADD,
        CommandName::PixRem => replies::ADMIN_ONLY_REMOVE,
        CommandName::PixLog => replies::ADMIN_ONLY_LOG,
        _ => replies::ADMIN_ONLY_LIST,
    }
}

fn guild_of(msg: &InboundMessage) -> Result<&str, PixbotError> {
    msg.guild_id
        .as_deref()
        .ok_or_else(|| PixbotError::Internal("guild command received outside a guild".into()))
}

fn single(
    msg: &InboundMessage,
    text: impl Into<String>,
) -> Result<Vec<OutboundMessage>, PixbotError> {
    Ok(vec![OutboundMessage::reply(msg, text)])
}
