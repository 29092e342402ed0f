//! Per-format encode/decode primitives
//!
//! Every codec is pure, stateless, and total: encoding never fails,
//! and decoding returns a typed `DecodeError` instead of panicking on
//! malformed input. Dispatch over `FormatKind` is a closed match so
//! adding a format without wiring its codec fails to compile.

pub mod base32;
pub mod base64;
pub mod morse;
pub mod radix;
pub mod rotation;
pub mod web;

use crate::core::models::FormatKind;
use crate::Result;

/// Encode `text` in the given format
pub fn encode(format: FormatKind, text: &str) -> String {
    match format {
        FormatKind::Base64 => base64::encode(text),
        FormatKind::Base32 => base32::encode(text),
        FormatKind::Hex => radix::hex_encode(text),
        FormatKind::Binary => radix::binary_encode(text),
        FormatKind::Url => web::url_encode(text),
        FormatKind::Html => web::html_encode(text),
        FormatKind::Ascii => radix::ascii_encode(text),
        FormatKind::Rot13 => rotation::rot13(text),
        FormatKind::Morse => morse::encode(text),
        FormatKind::Caesar { shift } => rotation::caesar(text, shift),
    }
}

/// Decode `text` from the given format.
///
/// Rotation ciphers have no failure mode and always return `Ok`.
pub fn decode(format: FormatKind, text: &str) -> Result<String> {
    match format {
        FormatKind::Base64 => base64::decode(text),
        FormatKind::Base32 => base32::decode(text),
        FormatKind::Hex => radix::hex_decode(text),
        FormatKind::Binary => radix::binary_decode(text),
        FormatKind::Url => web::url_decode(text),
        FormatKind::Html => Ok(web::html_decode(text)),
        FormatKind::Ascii => radix::ascii_decode(text),
        FormatKind::Rot13 => Ok(rotation::rot13(text)),
        FormatKind::Morse => Ok(morse::decode(text)),
        FormatKind::Caesar { shift } => Ok(rotation::caesar(text, 26 - (shift % 26))),
    }
}
