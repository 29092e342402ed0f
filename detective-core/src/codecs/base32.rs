//! Base32 codec (RFC 4648)
//!
//! Hand-rolled bit-buffer implementation: the decode contract reports
//! the exact offending character, which the off-the-shelf crates do
//! not surface.

use crate::core::errors::DecodeError;
use crate::core::models::FormatKind;
use crate::Result;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn symbol_value(c: char) -> Option<u32> {
    let upper = c.to_ascii_uppercase();
    ALPHABET.iter().position(|&a| a as char == upper).map(|v| v as u32)
}

/// Encode to the RFC 4648 alphabet, padded with `=` to a multiple of 8
pub fn encode(text: &str) -> String {
    let mut result = String::new();
    let mut buffer: u32 = 0;
    let mut bits_left = 0;

    for &byte in text.as_bytes() {
        buffer = (buffer << 8) | byte as u32;
        bits_left += 8;

        while bits_left >= 5 {
            let index = (buffer >> (bits_left - 5)) & 31;
            result.push(ALPHABET[index as usize] as char);
            bits_left -= 5;
        }
    }

    if bits_left > 0 {
        let index = (buffer << (5 - bits_left)) & 31;
        result.push(ALPHABET[index as usize] as char);
    }

    while result.len() % 8 != 0 {
        result.push('=');
    }

    result
}

/// Case-insensitive decode, tolerant of whitespace and padding.
///
/// Any character outside the alphabet is an `InvalidCharacter` error
/// naming the character; decoded bytes must form valid UTF-8.
pub fn decode(text: &str) -> Result<String> {
    let mut buffer: u32 = 0;
    let mut bits_left = 0;
    let mut bytes = Vec::new();

    for c in text.chars() {
        if c.is_whitespace() || c == '=' {
            continue;
        }
        let value = symbol_value(c).ok_or(DecodeError::InvalidCharacter {
            format: FormatKind::Base32,
            character: c,
        })?;

        buffer = (buffer << 5) | value;
        bits_left += 5;

        if bits_left >= 8 {
            bytes.push(((buffer >> (bits_left - 8)) & 255) as u8);
            bits_left -= 8;
        }
    }

    String::from_utf8(bytes).map_err(|_| DecodeError::NotText {
        format: FormatKind::Base32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode("Hello"), "JBSWY3DP");
        assert_eq!(encode("CTF"), "INKEM===");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("JBSWY3DP").unwrap(), "Hello");
        assert_eq!(decode("INKEM===").unwrap(), "CTF");
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode("jbswy3dp").unwrap(), "Hello");
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        assert_eq!(decode("  JBSW Y3DP\n").unwrap(), "Hello");
    }

    #[test]
    fn test_decode_names_offending_character() {
        let err = decode("JBSW1###").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidCharacter {
                format: FormatKind::Base32,
                character: '1',
            }
        );
    }
}
