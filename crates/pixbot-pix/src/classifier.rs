// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pix key type detection.
//!
//! Classification is an ordered table of `(predicate, label)` rules evaluated
//! first-match-wins. The numeric formats overlap: an 11-digit string shaped
//! like `DD9XXXXXXXX` is both a plausible CPF and a local mobile number, and
//! resolves to [`KeyType::Phone`].

use std::sync::LazyLock;

use pixbot_core::KeyType;
use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

// UUID with or without hyphens.
static RANDOM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F\-]{32,36}$").unwrap());

static CNPJ: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{14}$").unwrap());

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+55|55)?[0-9]{2}9[0-9]{8}$").unwrap());

static PHONE_LOCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}9[0-9]{8}$").unwrap());

static ELEVEN_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{11}$").unwrap());

/// A single classification rule.
pub struct Rule {
    pub label: KeyType,
    pub matches: fn(&str) -> bool,
}

/// Classification rules in precedence order.
pub const RULES: [Rule; 5] = [
    Rule {
        label: KeyType::Email,
        matches: is_email,
    },
    Rule {
        label: KeyType::RandomToken,
        matches: is_random_token,
    },
    Rule {
        label: KeyType::NationalEntityId,
        matches: is_cnpj,
    },
    Rule {
        label: KeyType::Phone,
        matches: is_phone,
    },
    Rule {
        label: KeyType::NationalIndividualId,
        matches: is_cpf,
    },
];

/// Classifies a candidate Pix key. Never fails; unmatched input is [`KeyType::Unknown`].
pub fn classify(candidate: &str) -> KeyType {
    let key_type = RULES
        .iter()
        .find(|rule| (rule.matches)(candidate))
        .map(|rule| rule.label)
        .unwrap_or(KeyType::Unknown);
    tracing::trace!(%key_type, len = candidate.len(), "classified pix key");
    key_type
}

pub fn is_email(candidate: &str) -> bool {
    EMAIL.is_match(candidate)
}

pub fn is_random_token(candidate: &str) -> bool {
    RANDOM_TOKEN.is_match(candidate)
}

pub fn is_cnpj(candidate: &str) -> bool {
    CNPJ.is_match(candidate)
}

/// `+55DD9XXXXXXXX`, `55DD9XXXXXXXX` or `DD9XXXXXXXX`. Three-digit area codes are not accepted.
pub fn is_phone(candidate: &str) -> bool {
    PHONE.is_match(candidate)
}

/// Exactly 11 digits that do not have the local mobile shape `DD9XXXXXXXX`.
pub fn is_cpf(candidate: &str) -> bool {
    ELEVEN_DIGITS.is_match(candidate) && !PHONE_LOCAL.is_match(candidate)
}
