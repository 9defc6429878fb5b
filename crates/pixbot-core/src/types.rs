// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the pixbot crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a message delivered through a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
}

// --- Pix keys ---

/// The format family a Pix key belongs to.
///
/// The string form is the stable label used in storage, in commands and in
/// the legacy JSON database. `cel` is accepted as an input alias of `celular`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(into = "String", try_from = "String")]
pub enum KeyType {
    #[strum(to_string = "email")]
    Email,
    #[strum(to_string = "aleatoria")]
    RandomToken,
    #[strum(to_string = "cnpj")]
    NationalEntityId,
    #[strum(to_string = "cpf")]
    NationalIndividualId,
    #[strum(to_string = "celular", serialize = "cel")]
    Phone,
    #[strum(to_string = "evp")]
    Unknown,
}

impl KeyType {
    /// Key types a user may declare during interactive registration.
    pub const DECLARABLE: [KeyType; 5] = [
        KeyType::NationalIndividualId,
        KeyType::Phone,
        KeyType::Email,
        KeyType::RandomToken,
        KeyType::NationalEntityId,
    ];

    /// Stable lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            KeyType::Email => "email",
            KeyType::RandomToken => "aleatoria",
            KeyType::NationalEntityId => "cnpj",
            KeyType::NationalIndividualId => "cpf",
            KeyType::Phone => "celular",
            KeyType::Unknown => "evp",
        }
    }
}

impl From<KeyType> for String {
    fn from(value: KeyType) -> Self {
        value.label().to_string()
    }
}

impl TryFrom<String> for KeyType {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A registered Pix key with its classification.
///
/// Replaced wholesale on re-registration; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixKeyRecord {
    pub value: String,
    pub key_type: KeyType,
}

/// A key record together with its owner, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredKey {
    pub user_id: String,
    /// Display name of the owner when the key was registered.
    pub username: Option<String>,
    pub record: PixKeyRecord,
}

/// Pending interactive registration for one user.
///
/// `declared_type == None` means the dialogue is waiting for the key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationState {
    pub declared_type: Option<KeyType>,
}

// --- Channel messages ---

/// The author of an inbound message, as seen by the channel adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sender {
    pub id: String,
    pub username: String,
    /// Whether the author holds administrator permission in the guild.
    pub is_admin: bool,
    /// Role ids the author holds in the guild (empty in DMs).
    pub role_ids: Vec<String>,
}

/// A user mentioned in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionedUser {
    pub id: String,
    pub username: String,
    /// Platform markup that renders as a mention, e.g. `<@123>`.
    pub mention: String,
}

/// A role mentioned in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionedRole {
    pub id: String,
    pub name: String,
}

/// Everything a message mentions, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mentions {
    pub users: Vec<MentionedUser>,
    pub roles: Vec<MentionedRole>,
    /// Channel ids, paired with their rendered mention markup.
    pub channels: Vec<(String, String)>,
}

/// An inbound message received from a channel adapter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub channel_id: String,
    /// Guild the message was posted in; `None` for direct messages.
    pub guild_id: Option<String>,
    pub sender: Sender,
    pub content: String,
    pub mentions: Mentions,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// A binary file attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// An outbound message to be sent via a channel adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel_id: String,
    pub content: String,
    /// Message this one replies to, if any.
    pub reply_to: Option<MessageId>,
    pub attachment: Option<Attachment>,
}

impl OutboundMessage {
    /// A reply to `inbound` in the same channel.
    pub fn reply(inbound: &InboundMessage, content: impl Into<String>) -> Self {
        Self {
            channel_id: inbound.channel_id.clone(),
            content: content.into(),
            reply_to: Some(MessageId(inbound.id.clone())),
            attachment: None,
        }
    }

    /// A standalone message to `channel_id`.
    pub fn to_channel(channel_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            content: content.into(),
            reply_to: None,
            attachment: None,
        }
    }

    /// Attaches a file to this message.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Capabilities reported by a channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    pub supports_attachments: bool,
    pub supports_mentions: bool,
    pub max_message_length: Option<usize>,
}
