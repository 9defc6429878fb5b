// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monetary amounts in centavos.

use std::fmt;
use std::str::FromStr;

use crate::error::PixError;

/// A BRL amount held as integer centavos.
///
/// Parsing is the gate in front of the codec: it only yields strictly
/// positive amounts. [`Amount::ZERO`] exists for callers that want an
/// open-amount code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Always two fractional digits, `.` as separator: `10.50`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Parses `10`, `10.5`, `10.50` or `10,50`.
///
/// Rejects signs, exponents, more than two fractional digits, zero, and
/// values that overflow.
impl FromStr for Amount {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PixError::InvalidAmount {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let (whole, frac) = match trimmed.find(['.', ',']) {
            Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
            None => (trimmed, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() && frac.is_empty()
            || !all_digits(whole)
            || !all_digits(frac)
            || frac.len() > 2
        {
            return Err(invalid());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_cents: u64 = match frac.len() {
            0 => 0,
            1 => u64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(invalid)?;

        if cents == 0 {
            return Err(invalid());
        }
        Ok(Amount(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Amount, PixError> {
        s.parse()
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!(parse("10").unwrap().cents(), 1000);
        assert_eq!(parse("10.5").unwrap().cents(), 1050);
        assert_eq!(parse("10.50").unwrap().cents(), 1050);
        assert_eq!(parse("10,50").unwrap().cents(), 1050);
        assert_eq!(parse("0.01").unwrap().cents(), 1);
        assert_eq!(parse(".5").unwrap().cents(), 50);
        assert_eq!(parse("7.").unwrap().cents(), 700);
    }

    #[test]
    fn display_has_two_decimals() {
        assert_eq!(Amount::from_cents(1050).to_string(), "10.50");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(Amount::from_cents(100_000).to_string(), "1000.00");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn rejects_non_positive() {
        assert!(parse("0").is_err());
        assert!(parse("0.00").is_err());
        assert!(parse("-5").is_err());
        assert!(parse("+5").is_err());
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", " ", "abc", "10abc", "1e3", "1.2.3", "1,2.3", ".", "NaN", "10.505"] {
            assert!(parse(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse("999999999999999999999").is_err());
        assert!(parse("184467440737095517").is_err());
    }

    #[test]
    fn error_carries_input() {
        match parse("abc").unwrap_err() {
            PixError::InvalidAmount { input } => assert_eq!(input, "abc"),
            other => panic!("expected InvalidAmount, got {other:?}"),
        }
    }
}
