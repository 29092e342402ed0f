//! Syntactic admissibility predicates for the format classifier
//!
//! Pure functions over the character domain, isolated from decoding
//! so the classifier can be unit-tested on its own. A format whose
//! predicate fails never becomes a candidate.

use once_cell::sync::Lazy;
use regex::Regex;

static BASE64_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").unwrap());
static BASE32_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[A-Z2-7=]*$").unwrap());
static URL_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").unwrap());
static HTML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&[a-zA-Z][a-zA-Z0-9]*;|&#[0-9]+;|&#x[0-9A-Fa-f]+;").unwrap());
static NAMED_ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[a-zA-Z][a-zA-Z0-9]*;").unwrap());
static ROT13_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s]*$").unwrap());
static MORSE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.\-\s/]+$").unwrap());

/// Small common-word list backing the ROT13 plausibility gate
const COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "in", "that", "have", "it", "for", "not", "on", "with", "he",
    "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say", "her", "she",
    "or", "an", "will", "my", "one", "all", "would", "there", "their", "what", "so", "up", "out",
    "if", "about", "who", "get", "which", "go", "me", "when", "make", "can", "like", "time", "no",
    "just", "him", "know", "take", "into", "your", "good", "some", "could", "them", "see", "other",
    "than", "then", "now", "look", "only", "come", "over", "think", "also", "is", "are", "was",
    "hello", "world", "flag", "secret", "password", "key", "test", "message", "welcome", "attack",
];

fn stripped(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn is_base64_shaped(text: &str) -> bool {
    !text.is_empty() && text.len() % 4 == 0 && BASE64_SHAPE.is_match(text)
}

pub fn is_base32_shaped(text: &str) -> bool {
    let cleaned = stripped(text);
    !cleaned.is_empty() && BASE32_SHAPE.is_match(&cleaned)
}

/// Hex shape over hex digits and whitespace with an even nibble count.
///
/// A string whose digits are all `0`/`1` in full 8-bit groups defers
/// to the Binary format — the hex reading of binary text is byte
/// garbage, and Binary is strictly more specific.
pub fn is_hex_shaped(text: &str) -> bool {
    let cleaned = stripped(text);
    if cleaned.is_empty()
        || cleaned.len() % 2 != 0
        || !cleaned.chars().all(|c| c.is_ascii_hexdigit())
    {
        return false;
    }
    !(cleaned.chars().all(|c| c == '0' || c == '1') && cleaned.len() % 8 == 0)
}

pub fn is_binary_shaped(text: &str) -> bool {
    let cleaned = stripped(text);
    !cleaned.is_empty()
        && cleaned.len() % 8 == 0
        && cleaned.chars().all(|c| c == '0' || c == '1')
}

pub fn has_url_escape(text: &str) -> bool {
    URL_ESCAPE.is_match(text)
}

pub fn url_escape_count(text: &str) -> usize {
    URL_ESCAPE.find_iter(text).count()
}

pub fn has_html_entity(text: &str) -> bool {
    HTML_ENTITY.is_match(text)
}

pub fn named_entity_count(text: &str) -> usize {
    NAMED_ENTITY.find_iter(text).count()
}

/// At least two whitespace-separated decimal tokens, each a printable
/// ASCII code — one stray number is never treated as an encoding.
pub fn is_ascii_codes_shaped(text: &str) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.len() >= 2
        && tokens.iter().all(|t| {
            t.parse::<u32>()
                .map(|n| (32..=126).contains(&n))
                .unwrap_or(false)
        })
}

pub fn is_rot13_shaped(text: &str) -> bool {
    text.trim().len() > 3 && ROT13_SHAPE.is_match(text)
}

pub fn is_morse_shaped(text: &str) -> bool {
    MORSE_SHAPE.is_match(text) && (text.contains('.') || text.contains('-'))
}

pub fn morse_symbol_count(text: &str) -> usize {
    text.chars().filter(|c| *c == '.' || *c == '-').count()
}

/// Count recognizable common English words in `text`
pub fn common_word_hits(text: &str) -> usize {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| w.len() >= 2 && COMMON_WORDS.contains(w))
        .count()
}
