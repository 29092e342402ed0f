//! URL percent-encoding and HTML entity codecs

use crate::core::errors::DecodeError;
use crate::core::models::FormatKind;
use crate::Result;
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Everything except the characters `encodeURIComponent` leaves bare
const URL_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static DECIMAL_ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#([0-9]+);").unwrap());
static HEX_ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#x([0-9A-Fa-f]+);").unwrap());

pub fn url_encode(text: &str) -> String {
    utf8_percent_encode(text, URL_ESCAPE_SET).to_string()
}

/// Percent-decode; fails only when the decoded bytes are not UTF-8
pub fn url_decode(text: &str) -> Result<String> {
    percent_decode_str(text)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .map_err(|_| DecodeError::NotText {
            format: FormatKind::Url,
        })
}

/// Escape the five significant markup characters
pub fn html_encode(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Replace named and numeric entities; unknown entities pass through
pub fn html_decode(text: &str) -> String {
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let decimal = DECIMAL_ENTITY.replace_all(&named, |caps: &regex::Captures<'_>| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    let hexed = HEX_ENTITY.replace_all(&decimal, |caps: &regex::Captures<'_>| {
        u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    hexed.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_encode_matches_uri_component_rules() {
        assert_eq!(url_encode("a b&c"), "a%20b%26c");
        assert_eq!(url_encode("safe-_.!~*'()"), "safe-_.!~*'()");
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("Hello%20World%21").unwrap(), "Hello World!");
    }

    #[test]
    fn test_url_decode_passes_through_plain_text() {
        assert_eq!(url_decode("plain").unwrap(), "plain");
    }

    #[test]
    fn test_url_decode_rejects_non_utf8() {
        assert!(url_decode("%FF%FE").is_err());
    }

    #[test]
    fn test_html_round_trip() {
        let text = "<script>alert('x & y')</script>";
        assert_eq!(html_decode(&html_encode(text)), text);
    }

    #[test]
    fn test_html_decode_numeric_entities() {
        assert_eq!(html_decode("&#72;&#105;"), "Hi");
        assert_eq!(html_decode("&#x48;&#x69;"), "Hi");
    }

    #[test]
    fn test_html_decode_leaves_invalid_entities() {
        assert_eq!(html_decode("&#1114112;"), "&#1114112;");
        assert_eq!(html_decode("&unknown;"), "&unknown;");
    }
}
