//! Format classifier: scores candidate encodings for a text fragment

pub mod patterns;

use crate::codecs::rotation;
use crate::core::models::{Confidence, DetectionCandidate, FormatKind};
use tracing::trace;

/// Scoring weights and confidence thresholds, hoisted out of branch
/// logic so edge cases (exactly at a bucket boundary) are testable as
/// data.
#[derive(Debug, Clone)]
pub struct ScoringRules {
    /// Score above which a candidate is High confidence
    pub high_threshold: u8,
    /// Score above which a candidate is Medium confidence
    pub medium_threshold: u8,
    /// Awarded when the input reaches the format's minimum length
    pub min_length_bonus: u8,
    /// Awarded when the input exceeds twice the minimum length
    pub extended_length_bonus: u8,
    pub base64_padding_bonus: u8,
    pub base64_block_bonus: u8,
    pub base32_padding_bonus: u8,
    pub base32_block_bonus: u8,
    pub hex_even_bonus: u8,
    pub hex_charset_bonus: u8,
    pub binary_block_bonus: u8,
    /// Per well-formed %XX escape
    pub url_escape_weight: u8,
    /// Per named HTML entity
    pub html_entity_weight: u8,
    pub ascii_numeric_bonus: u8,
    /// Awarded when rotating produces recognizable words
    pub rot13_wordlist_bonus: u8,
    /// Per dot or dash
    pub morse_symbol_weight: u8,
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules {
            high_threshold: 70,
            medium_threshold: 40,
            min_length_bonus: 20,
            extended_length_bonus: 10,
            base64_padding_bonus: 30,
            base64_block_bonus: 20,
            base32_padding_bonus: 20,
            base32_block_bonus: 15,
            hex_even_bonus: 25,
            hex_charset_bonus: 20,
            binary_block_bonus: 30,
            url_escape_weight: 5,
            html_entity_weight: 10,
            ascii_numeric_bonus: 25,
            rot13_wordlist_bonus: 25,
            morse_symbol_weight: 2,
        }
    }
}

/// Minimum plausible lengths per format (measured on the cleaned form)
fn min_length(format: FormatKind) -> usize {
    match format {
        FormatKind::Base64 => 4,
        FormatKind::Base32 => 8,
        FormatKind::Hex => 2,
        FormatKind::Binary => 8,
        FormatKind::Url => 3,
        FormatKind::Html => 3,
        FormatKind::Ascii => 2,
        FormatKind::Rot13 => 1,
        FormatKind::Morse => 3,
        FormatKind::Caesar { .. } => 1,
    }
}

/// Scores candidate formats for text fragments
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: ScoringRules,
}

impl Classifier {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Score all detectable formats for `text`, highest first.
    ///
    /// Zero-score formats are excluded. Ties keep the fixed order of
    /// `FormatKind::DETECTABLE` (stable sort), so classification is
    /// fully deterministic.
    pub fn classify(&self, text: &str) -> Vec<DetectionCandidate> {
        let mut candidates: Vec<DetectionCandidate> = FormatKind::DETECTABLE
            .iter()
            .filter_map(|&format| {
                let score = self.score(format, text);
                (score > 0).then(|| DetectionCandidate {
                    format,
                    score,
                    confidence: self.confidence(score),
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        trace!(input_len = text.len(), candidates = candidates.len(), "classified input");
        candidates
    }

    /// Bucket a non-zero score into a confidence level
    pub fn confidence(&self, score: u8) -> Confidence {
        if score > self.rules.high_threshold {
            Confidence::High
        } else if score > self.rules.medium_threshold {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Score one format for `text`; 0 means inadmissible.
    ///
    /// Admissibility comes from the syntactic predicate; the score
    /// layers length bonuses and format-specific signals on top,
    /// capped at 100.
    pub fn score(&self, format: FormatKind, text: &str) -> u8 {
        let rules = &self.rules;
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();

        let mut score: u32 = 0;
        let length_bonus = |len: usize, min: usize, score: &mut u32| {
            if len >= min {
                *score += rules.min_length_bonus as u32;
            }
            if len > min * 2 {
                *score += rules.extended_length_bonus as u32;
            }
        };

        match format {
            FormatKind::Base64 => {
                if !patterns::is_base64_shaped(text) {
                    return 0;
                }
                length_bonus(text.len(), min_length(format), &mut score);
                if text.ends_with('=') {
                    score += rules.base64_padding_bonus as u32;
                }
                if text.len() % 4 == 0 {
                    score += rules.base64_block_bonus as u32;
                }
            }
            FormatKind::Base32 => {
                if !patterns::is_base32_shaped(text) {
                    return 0;
                }
                length_bonus(cleaned.len(), min_length(format), &mut score);
                if cleaned.contains('=') {
                    score += rules.base32_padding_bonus as u32;
                }
                if cleaned.len() % 8 == 0 {
                    score += rules.base32_block_bonus as u32;
                }
            }
            FormatKind::Hex => {
                if !patterns::is_hex_shaped(text) {
                    return 0;
                }
                length_bonus(cleaned.len(), min_length(format), &mut score);
                if cleaned.len() % 2 == 0 {
                    score += rules.hex_even_bonus as u32;
                }
                if cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
                    score += rules.hex_charset_bonus as u32;
                }
            }
            FormatKind::Binary => {
                if !patterns::is_binary_shaped(text) {
                    return 0;
                }
                length_bonus(cleaned.len(), min_length(format), &mut score);
                if cleaned.len() % 8 == 0 {
                    score += rules.binary_block_bonus as u32;
                }
            }
            FormatKind::Url => {
                if !patterns::has_url_escape(text) {
                    return 0;
                }
                length_bonus(text.len(), min_length(format), &mut score);
                score +=
                    patterns::url_escape_count(text) as u32 * rules.url_escape_weight as u32;
            }
            FormatKind::Html => {
                if !patterns::has_html_entity(text) {
                    return 0;
                }
                length_bonus(text.len(), min_length(format), &mut score);
                score +=
                    patterns::named_entity_count(text) as u32 * rules.html_entity_weight as u32;
            }
            FormatKind::Ascii => {
                if !patterns::is_ascii_codes_shaped(text) {
                    return 0;
                }
                length_bonus(text.len(), min_length(format), &mut score);
                score += rules.ascii_numeric_bonus as u32;
            }
            FormatKind::Rot13 => {
                if !patterns::is_rot13_shaped(text) {
                    return 0;
                }
                // Rotation is only plausible when it surfaces words
                // that are not already there; without this gate any
                // alphabetic string is admissible and every decoded
                // plaintext re-enters the loop as a ROT13 candidate.
                let rotated = rotation::rot13(text);
                if patterns::common_word_hits(&rotated) <= patterns::common_word_hits(text) {
                    return 0;
                }
                length_bonus(text.len(), min_length(format), &mut score);
                score += rules.rot13_wordlist_bonus as u32;
            }
            FormatKind::Morse => {
                if !patterns::is_morse_shaped(text) {
                    return 0;
                }
                length_bonus(text.len(), min_length(format), &mut score);
                score +=
                    patterns::morse_symbol_count(text) as u32 * rules.morse_symbol_weight as u32;
            }
            // Caesar is never auto-detected
            FormatKind::Caesar { .. } => return 0,
        }

        score.min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> Classifier {
        Classifier::default()
    }

    #[test]
    fn test_padded_base64_scores_medium() {
        let c = classifier();
        let score = c.score(FormatKind::Base64, "SGVsbG8=");
        // 20 (min length) + 30 (padding) + 20 (block multiple)
        assert_eq!(score, 70);
        assert_eq!(c.confidence(score), Confidence::Medium);
    }

    #[test]
    fn test_confidence_bucket_boundaries() {
        let c = classifier();
        assert_eq!(c.confidence(71), Confidence::High);
        assert_eq!(c.confidence(70), Confidence::Medium);
        assert_eq!(c.confidence(41), Confidence::Medium);
        assert_eq!(c.confidence(40), Confidence::Low);
        assert_eq!(c.confidence(1), Confidence::Low);
    }

    #[test]
    fn test_hex_outranks_other_candidates_for_hex_string() {
        let candidates = classifier().classify("48656c6c6f");
        assert_eq!(candidates[0].format, FormatKind::Hex);
        assert_eq!(candidates[0].score, 75);
    }

    #[test]
    fn test_binary_with_spaces_classifies_as_binary() {
        let candidates = classifier().classify("01001000 01100101 01101100 01101100 01101111");
        assert_eq!(candidates[0].format, FormatKind::Binary);
        assert!(candidates.iter().all(|c| c.format != FormatKind::Hex));
    }

    #[test]
    fn test_rot13_gate_accepts_rotated_english_only() {
        let c = classifier();
        assert!(c.score(FormatKind::Rot13, "Uryyb") > 0);
        assert_eq!(c.score(FormatKind::Rot13, "Hello"), 0);
        assert_eq!(c.score(FormatKind::Rot13, "Hello World"), 0);
    }

    #[test]
    fn test_unclassifiable_text_yields_no_candidates() {
        assert!(classifier().classify("not an encoding at all!!").is_empty());
        assert!(classifier().classify("").is_empty());
    }

    #[test]
    fn test_candidates_sorted_by_score_descending() {
        // Numeric codes are both ASCII- and hex-shaped
        let candidates = classifier().classify("72 101 108 108 111");
        assert!(candidates.len() >= 2);
        for pair in candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_morse_scores_by_symbol_density() {
        let c = classifier();
        let short = c.score(FormatKind::Morse, "... ---");
        let long = c.score(FormatKind::Morse, "... --- ... --- ... ---");
        assert!(long > short);
    }

    #[test]
    fn test_custom_rules_shift_buckets() {
        let rules = ScoringRules {
            high_threshold: 50,
            ..ScoringRules::default()
        };
        let c = Classifier::new(rules);
        assert_eq!(c.confidence(60), Confidence::High);
    }
}
