//! Base64 codec (standard alphabet, `=` padding)

use crate::core::errors::DecodeError;
use crate::core::models::FormatKind;
use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Strict decode: alphabet + trailing padding only, length a multiple
/// of 4, and the decoded bytes must be valid UTF-8.
pub fn decode(text: &str) -> Result<String> {
    if text.len() % 4 != 0 {
        return Err(DecodeError::malformed_length(
            FormatKind::Base64,
            format!("length {} is not a multiple of 4", text.len()),
        ));
    }

    let unpadded = text.trim_end_matches('=');
    if text.len() - unpadded.len() > 2 {
        return Err(DecodeError::malformed_length(
            FormatKind::Base64,
            "more than 2 padding characters",
        ));
    }
    if let Some(bad) = unpadded
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '+' && *c != '/')
    {
        return Err(DecodeError::InvalidCharacter {
            format: FormatKind::Base64,
            character: bad,
        });
    }

    let bytes = STANDARD
        .decode(text)
        .map_err(|_| DecodeError::NotDecodable {
            format: FormatKind::Base64,
        })?;

    String::from_utf8(bytes).map_err(|_| DecodeError::NotText {
        format: FormatKind::Base64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_value() {
        assert_eq!(decode("SGVsbG8=").unwrap(), "Hello");
        assert_eq!(encode("Hello"), "SGVsbG8=");
    }

    #[test]
    fn test_decode_empty_is_empty() {
        assert_eq!(decode("").unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        assert!(matches!(
            decode("SGVsbG8"),
            Err(DecodeError::MalformedLength { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_character() {
        assert!(matches!(
            decode("SGV bG8="),
            Err(DecodeError::InvalidCharacter { character: ' ', .. })
        ));
    }

    #[test]
    fn test_decode_rejects_excess_padding() {
        assert!(decode("A===").is_err());
        assert!(decode("=AAA").is_err());
    }

    #[test]
    fn test_decode_rejects_non_utf8_payload() {
        // 0xFF 0xFE is not valid UTF-8
        let encoded = STANDARD.encode([0xFFu8, 0xFE]);
        assert!(matches!(
            decode(&encoded),
            Err(DecodeError::NotText { .. })
        ));
    }
}
