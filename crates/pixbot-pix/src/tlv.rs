// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EMV tag-length-value primitives.
//!
//! Lengths are counted in UTF-16 code units, which equals the byte length for
//! the ASCII content BR Codes normally carry.

use crate::error::PixError;

/// Largest value length a two-digit length field can declare.
pub const MAX_VALUE_LEN: usize = 99;

/// Length of `value` as the payload format counts it.
pub fn encoded_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Truncates `value` to at most `max` UTF-16 code units.
///
/// A character that would straddle the limit is dropped whole.
pub fn truncate(value: &str, max: usize) -> &str {
    let mut units = 0;
    for (idx, ch) in value.char_indices() {
        units += ch.len_utf16();
        if units > max {
            return &value[..idx];
        }
    }
    value
}

/// Appends one field: two-digit `id`, zero-padded two-digit length, value.
///
/// Callers keep values within [`MAX_VALUE_LEN`]; every field the codec emits
/// is capped below that.
pub fn push_field(out: &mut String, id: &str, value: &str) {
    debug_assert_eq!(id.len(), 2, "TLV ids are two digits");
    let len = encoded_len(value);
    debug_assert!(len <= MAX_VALUE_LEN, "TLV value of {len} units for id {id}");
    out.push_str(id);
    out.push_str(&format!("{len:02}"));
    out.push_str(value);
}

/// Encodes a single field into a new string.
pub fn field(id: &str, value: &str) -> String {
    let mut out = String::with_capacity(4 + value.len());
    push_field(&mut out, id, value);
    out
}

/// A decoded field borrowing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub id: &'a str,
    pub value: &'a str,
}

/// Splits a run of concatenated fields.
///
/// `base_offset` is added to byte offsets in error reports so nested
/// templates point into the full payload.
pub fn split_fields(input: &str, base_offset: usize) -> Result<Vec<Field<'_>>, PixError> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let header = input
            .get(pos..pos + 4)
            .ok_or_else(|| malformed(base_offset + pos, "truncated field header"))?;
        let (id, len_digits) = header.split_at(2);
        if !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(base_offset + pos, "field id is not numeric"));
        }
        let declared: usize = len_digits
            .parse()
            .ok()
            .filter(|_| len_digits.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| malformed(base_offset + pos + 2, "field length is not numeric"))?;

        let value_start = pos + 4;
        let value_end = advance_units(input, value_start, declared)
            .ok_or_else(|| malformed(base_offset + value_start, "field value overruns payload"))?;

        fields.push(Field {
            id,
            value: &input[value_start..value_end],
        });
        pos = value_end;
    }

    Ok(fields)
}

/// Byte offset reached after consuming `units` UTF-16 code units from `start`.
fn advance_units(input: &str, start: usize, units: usize) -> Option<usize> {
    let mut consumed = 0;
    let mut end = start;
    let mut chars = input.get(start..)?.chars();
    while consumed < units {
        let ch = chars.next()?;
        consumed += ch.len_utf16();
        end += ch.len_utf8();
    }
    (consumed == units).then_some(end)
}

fn malformed(offset: usize, reason: &'static str) -> PixError {
    PixError::MalformedPayload { offset, reason }
}
