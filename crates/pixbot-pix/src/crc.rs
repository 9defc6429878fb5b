// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRC-16/CCITT-FALSE, the BR Code integrity trailer.

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Computes the checksum register over the characters of `input`.
///
/// Bit-by-bit: the first UTF-16 code unit of each character is XORed into
/// the top byte of the register, then eight shift steps follow. A character
/// outside the BMP contributes its high surrogate only. Only the low byte of
/// a unit survives the 16-bit shift, so for ASCII this is the standard
/// byte-oriented CRC.
pub fn crc16_ccitt_false(input: &str) -> u16 {
    let mut crc = INITIAL;
    let mut buf = [0u16; 2];
    for ch in input.chars() {
        let unit = ch.encode_utf16(&mut buf)[0];
        crc ^= unit << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Renders the checksum of `input` as four uppercase hex digits.
pub fn checksum_hex(input: &str) -> String {
    format!("{:04X}", crc16_ccitt_false(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_check_value() {
        // Catalogued check value for CRC-16/CCITT-FALSE.
        assert_eq!(crc16_ccitt_false("123456789"), 0x29B1);
    }

    #[test]
    fn empty_input_is_initial_register() {
        assert_eq!(crc16_ccitt_false(""), 0xFFFF);
        assert_eq!(checksum_hex(""), "FFFF");
    }

    #[test]
    fn hex_is_zero_padded_uppercase() {
        let hex = checksum_hex("A");
        assert_eq!(hex.len(), 4);
        assert_eq!(hex, format!("{:04X}", crc16_ccitt_false("A")));
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn only_low_byte_of_wide_units_contributes() {
        // U+0141 and U+0041 share their low byte.
        assert_eq!(crc16_ccitt_false("\u{0141}"), crc16_ccitt_false("A"));
    }

    #[test]
    fn astral_characters_contribute_high_surrogate_only() {
        // U+1F600 encodes as D83D DE00; 0x3D is `=`.
        assert_eq!(crc16_ccitt_false("\u{1F600}"), crc16_ccitt_false("="));
        assert_ne!(crc16_ccitt_false("\u{1F600}"), crc16_ccitt_false("=\u{0}"));
        assert_eq!(
            checksum_hex(concat!(
                "00020126390014BR.GOV.BCB.PIX0117chave@exemplo.com",
                "520400005303986540510.505802BR5905ana\u{1F600}6006BRASIL6304",
            )),
            "F3C9"
        );
    }

    #[test]
    fn matches_table_driven_equivalent() {
        let table: Vec<u16> = (0u16..256)
            .map(|i| {
                let mut c = i << 8;
                for _ in 0..8 {
                    c = if c & 0x8000 != 0 { (c << 1) ^ POLYNOMIAL } else { c << 1 };
                }
                c
            })
            .collect();
        let input = "00020126330014BR.GOV.BCB.PIX01111234567890152040000530398654041.005802BR5903Ana6006BRASIL6304";
        let mut crc = INITIAL;
        for b in input.bytes() {
            crc = (crc << 8) ^ table[(((crc >> 8) as u8) ^ b) as usize];
        }
        assert_eq!(crc16_ccitt_false(input), crc);
    }
}
