//! Hex, binary, and ASCII-decimal codecs

use crate::core::errors::DecodeError;
use crate::core::models::FormatKind;
use crate::Result;

/// Encode each byte as a two-nibble hex pair, space-separated
pub fn hex_encode(text: &str) -> String {
    text.as_bytes()
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lenient hex decode: strips every non-hex character first, then
/// requires an even number of remaining nibbles.
pub fn hex_decode(text: &str) -> Result<String> {
    let cleaned: String = text.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    if cleaned.is_empty() {
        return Err(DecodeError::NotDecodable {
            format: FormatKind::Hex,
        });
    }
    if cleaned.len() % 2 != 0 {
        return Err(DecodeError::malformed_length(
            FormatKind::Hex,
            format!("odd nibble count ({})", cleaned.len()),
        ));
    }

    let bytes = hex::decode(&cleaned).map_err(|_| DecodeError::NotDecodable {
        format: FormatKind::Hex,
    })?;
    String::from_utf8(bytes).map_err(|_| DecodeError::NotText {
        format: FormatKind::Hex,
    })
}

/// Encode each byte as an 8-bit group, space-separated
pub fn binary_encode(text: &str) -> String {
    text.as_bytes()
        .iter()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lenient binary decode: strips every non-`01` character first, then
/// requires a multiple of 8 remaining bits.
pub fn binary_decode(text: &str) -> Result<String> {
    let cleaned: String = text.chars().filter(|c| *c == '0' || *c == '1').collect();
    if cleaned.is_empty() {
        return Err(DecodeError::NotDecodable {
            format: FormatKind::Binary,
        });
    }
    if cleaned.len() % 8 != 0 {
        return Err(DecodeError::malformed_length(
            FormatKind::Binary,
            format!("{} bits is not a multiple of 8", cleaned.len()),
        ));
    }

    let bytes: Vec<u8> = cleaned
        .as_bytes()
        .chunks(8)
        .map(|group| {
            group
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | (bit - b'0'))
        })
        .collect();

    String::from_utf8(bytes).map_err(|_| DecodeError::NotText {
        format: FormatKind::Binary,
    })
}

/// Encode each character as its decimal scalar value, space-separated
pub fn ascii_encode(text: &str) -> String {
    text.chars()
        .map(|c| (c as u32).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode whitespace-separated decimal character codes
pub fn ascii_decode(text: &str) -> Result<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(DecodeError::NotDecodable {
            format: FormatKind::Ascii,
        });
    }

    let mut result = String::new();
    for token in tokens {
        let code: u32 = token.parse().map_err(|_| {
            let bad = token
                .chars()
                .find(|c| !c.is_ascii_digit())
                .unwrap_or_default();
            DecodeError::InvalidCharacter {
                format: FormatKind::Ascii,
                character: bad,
            }
        })?;
        let c = char::from_u32(code).ok_or(DecodeError::NotDecodable {
            format: FormatKind::Ascii,
        })?;
        result.push(c);
    }
    Ok(result)
}
