// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static Pix payload ("BR Code") encoding and decoding.
//!
//! The encoder emits fields in a fixed order and appends a CRC-16 trailer
//! computed over everything before it, `6304` included. Oversized text
//! fields are truncated silently and empty optional fields are omitted.

use crate::amount::Amount;
use crate::crc::checksum_hex;
use crate::error::PixError;
use crate::tlv::{self, Field};

/// Globally unique identifier of the Pix arrangement inside template 26.
pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";

pub const MAX_NAME_LEN: usize = 25;
pub const MAX_CITY_LEN: usize = 15;
pub const MAX_DESCRIPTION_LEN: usize = 99;
pub const MAX_REFERENCE_ID_LEN: usize = 25;

const ID_FORMAT_INDICATOR: &str = "00";
const ID_MERCHANT_ACCOUNT: &str = "26";
const ID_CATEGORY_CODE: &str = "52";
const ID_CURRENCY: &str = "53";
const ID_AMOUNT: &str = "54";
const ID_COUNTRY: &str = "58";
const ID_NAME: &str = "59";
const ID_CITY: &str = "60";
const ID_ADDITIONAL_DATA: &str = "62";
const ID_CRC: &str = "63";

// Sub-fields of template 26.
const ID_GUI: &str = "00";
const ID_KEY: &str = "01";
const ID_DESCRIPTION: &str = "02";

// Sub-field of template 62.
const ID_REFERENCE: &str = "05";

/// Field id plus length of the checksum field, which precede the checksum value.
const CRC_PREFIX: &str = "6304";

/// Input to [`encode`]. Built per request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub key: String,
    pub payer_name: String,
    pub payer_city: String,
    pub amount: Option<Amount>,
    pub description: Option<String>,
    pub reference_id: Option<String>,
}

impl PaymentRequest {
    pub fn new(
        key: impl Into<String>,
        payer_name: impl Into<String>,
        payer_city: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            payer_name: payer_name.into(),
            payer_city: payer_city.into(),
            amount: None,
            description: None,
            reference_id: None,
        }
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }
}

/// Builds the copy-and-paste payload for `request`.
///
/// The key is written verbatim; validating it is the caller's job.
pub fn encode(request: &PaymentRequest) -> String {
    let name = tlv::truncate(&request.payer_name, MAX_NAME_LEN);
    let city = tlv::truncate(&request.payer_city, MAX_CITY_LEN);
    let description = request
        .description
        .as_deref()
        .map(|d| tlv::truncate(d, MAX_DESCRIPTION_LEN))
        .filter(|d| !d.is_empty());
    let reference_id = request
        .reference_id
        .as_deref()
        .map(|r| tlv::truncate(r, MAX_REFERENCE_ID_LEN))
        .filter(|r| !r.is_empty());

    let mut merchant = tlv::field(ID_GUI, PIX_GUI);
    tlv::push_field(&mut merchant, ID_KEY, &request.key);
    if let Some(description) = description {
        tlv::push_field(&mut merchant, ID_DESCRIPTION, description);
    }

    let mut payload = String::with_capacity(128 + merchant.len());
    tlv::push_field(&mut payload, ID_FORMAT_INDICATOR, "01");
    tlv::push_field(&mut payload, ID_MERCHANT_ACCOUNT, &merchant);
    tlv::push_field(&mut payload, ID_CATEGORY_CODE, "0000");
    tlv::push_field(&mut payload, ID_CURRENCY, "986");
    if let Some(amount) = request.amount.filter(|a| !a.is_zero()) {
        tlv::push_field(&mut payload, ID_AMOUNT, &amount.to_string());
    }
    tlv::push_field(&mut payload, ID_COUNTRY, "BR");
    tlv::push_field(&mut payload, ID_NAME, name);
    tlv::push_field(&mut payload, ID_CITY, city);
    if let Some(reference_id) = reference_id {
        tlv::push_field(
            &mut payload,
            ID_ADDITIONAL_DATA,
            &tlv::field(ID_REFERENCE, reference_id),
        );
    }
    payload.push_str(CRC_PREFIX);

    let crc = checksum_hex(&payload);
    payload.push_str(&crc);
    tracing::debug!(len = payload.len(), crc = %crc, "encoded pix payload");
    payload
}

/// The fields recovered from a payload by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPayload {
    pub format_indicator: String,
    pub gui: String,
    pub key: String,
    pub description: Option<String>,
    pub category_code: String,
    pub currency: String,
    /// Amount exactly as written in field 54.
    pub amount: Option<String>,
    pub country: String,
    pub name: String,
    pub city: String,
    pub reference_id: Option<String>,
    pub crc: String,
}

/// Decodes and verifies a payload produced by [`encode`] or any compatible encoder.
///
/// Unknown top-level and template sub-fields are skipped.
pub fn parse(payload: &str) -> Result<ParsedPayload, PixError> {
    let body_len = payload
        .len()
        .checked_sub(4)
        .filter(|&n| payload.is_char_boundary(n))
        .ok_or(PixError::MalformedPayload {
            offset: 0,
            reason: "payload shorter than checksum trailer",
        })?;
    let (body, declared_crc) = payload.split_at(body_len);

    if !body.ends_with(CRC_PREFIX) {
        return Err(PixError::MalformedPayload {
            offset: body_len.saturating_sub(CRC_PREFIX.len()),
            reason: "missing 6304 checksum header",
        });
    }
    let expected = checksum_hex(body);
    if !declared_crc.eq_ignore_ascii_case(&expected) {
        return Err(PixError::ChecksumMismatch {
            expected,
            actual: declared_crc.to_string(),
        });
    }

    let mut parsed = ParsedPayload {
        crc: declared_crc.to_ascii_uppercase(),
        ..ParsedPayload::default()
    };

    for Field { id, value } in tlv::split_fields(payload, 0)? {
        let value_offset = offset_in(payload, value);
        match id {
            ID_FORMAT_INDICATOR => parsed.format_indicator = value.to_string(),
            ID_MERCHANT_ACCOUNT => {
                for sub in tlv::split_fields(value, value_offset)? {
                    match sub.id {
                        ID_GUI => parsed.gui = sub.value.to_string(),
                        ID_KEY => parsed.key = sub.value.to_string(),
                        ID_DESCRIPTION => parsed.description = Some(sub.value.to_string()),
                        _ => {}
                    }
                }
            }
            ID_CATEGORY_CODE => parsed.category_code = value.to_string(),
            ID_CURRENCY => parsed.currency = value.to_string(),
            ID_AMOUNT => parsed.amount = Some(value.to_string()),
            ID_COUNTRY => parsed.country = value.to_string(),
            ID_NAME => parsed.name = value.to_string(),
            ID_CITY => parsed.city = value.to_string(),
            ID_ADDITIONAL_DATA => {
                for sub in tlv::split_fields(value, value_offset)? {
                    if sub.id == ID_REFERENCE {
                        parsed.reference_id = Some(sub.value.to_string());
                    }
                }
            }
            ID_CRC => {}
            _ => tracing::trace!(id, "skipping unknown payload field"),
        }
    }

    if parsed.gui != PIX_GUI {
        return Err(PixError::MalformedPayload {
            offset: 0,
            reason: "merchant account template is not a Pix arrangement",
        });
    }

    Ok(parsed)
}

/// Byte offset of `part` inside `whole`; `part` must be a subslice of `whole`.
fn offset_in(whole: &str, part: &str) -> usize {
    part.as_ptr() as usize - whole.as_ptr() as usize
}
