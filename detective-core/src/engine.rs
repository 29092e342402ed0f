//! Layer-peeling engine: iteratively classify, decode, and feed the
//! output back as input until the text stops unwrapping.
//!
//! The loop is purely synchronous and deterministic: the same input
//! and layer cap always produce a byte-identical trace. Termination
//! is guaranteed twice over — by the layer cap, and by rejecting any
//! decode whose output already appeared in the chain (which subsumes
//! the fixed-point rule `decoded == current`).

use crate::codecs;
use crate::core::models::{
    DecodingTrace, DetectionCandidate, FormatKind, LayerRecord, MAX_DETECT_LAYERS,
    MAX_SINGLE_FORMAT_LAYERS,
};
use crate::detect::{patterns, Classifier};
use std::collections::HashSet;
use tracing::debug;

/// How many candidates a layer records as alternatives
const MAX_ALTERNATIVES: usize = 3;

/// Loop state, logged per iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeelState {
    /// Looking for an admissible candidate
    Scanning,
    /// A layer was peeled this iteration
    Decoded,
    /// No candidate decoded to new text
    Stalled,
    /// The layer cap was reached with candidates still admissible
    Exhausted,
}

/// The multi-layer encoding detective
#[derive(Debug, Clone, Default)]
pub struct DetectiveEngine {
    classifier: Classifier,
}

impl DetectiveEngine {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Heuristic multi-layer detection with the default cap of 20
    pub fn peel(&self, text: &str) -> DecodingTrace {
        self.peel_with_limit(text, MAX_DETECT_LAYERS)
    }

    /// Heuristic multi-layer detection with an explicit cap
    pub fn peel_with_limit(&self, text: &str, max_layers: usize) -> DecodingTrace {
        self.run(text, max_layers, |current| self.classifier.classify(current))
    }

    /// Repeatedly decode a single named format (cap 50), the
    /// specialization behind the Base64-only and Base32-only peelers.
    pub fn peel_format(&self, text: &str, format: FormatKind) -> DecodingTrace {
        self.peel_format_with_limit(text, format, MAX_SINGLE_FORMAT_LAYERS)
    }

    /// Single-format peeling with an explicit cap.
    ///
    /// The classifier degenerates to one score-100 candidate when the
    /// format's syntactic test passes, none otherwise.
    pub fn peel_format_with_limit(
        &self,
        text: &str,
        format: FormatKind,
        max_layers: usize,
    ) -> DecodingTrace {
        self.run(text, max_layers, |current| {
            if format_admissible(format, current) {
                vec![DetectionCandidate {
                    format,
                    score: 100,
                    confidence: self.classifier.confidence(100),
                }]
            } else {
                vec![]
            }
        })
    }

    fn run<F>(&self, text: &str, max_layers: usize, classify: F) -> DecodingTrace
    where
        F: Fn(&str) -> Vec<DetectionCandidate>,
    {
        let original = text.to_string();
        let mut current = text.trim().to_string();
        let mut layers: Vec<LayerRecord> = Vec::new();

        // Every string the chain has passed through; a decode landing
        // back on one of these is a cycle, not progress.
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(current.clone());

        let mut state = PeelState::Scanning;
        while layers.len() < max_layers && !current.is_empty() {
            let candidates = classify(&current);
            if candidates.is_empty() {
                state = PeelState::Stalled;
                break;
            }

            // Top candidate first, then exactly one alternate. This
            // bounds branching; there is no backtracking across
            // committed layers.
            let chosen = candidates
                .iter()
                .take(2)
                .find_map(|candidate| {
                    let decoded = codecs::decode(candidate.format, &current).ok()?;
                    (!seen.contains(&decoded)).then_some((*candidate, decoded))
                });

            let (candidate, decoded) = match chosen {
                Some(hit) => hit,
                None => {
                    state = PeelState::Stalled;
                    break;
                }
            };

            debug!(
                layer = layers.len() + 1,
                format = %candidate.format,
                score = candidate.score,
                "peeled encoding layer"
            );

            layers.push(LayerRecord {
                layer: layers.len() + 1,
                format: candidate.format,
                confidence: candidate.confidence,
                score: candidate.score,
                input: current.clone(),
                output: decoded.clone(),
                alternatives: candidates.into_iter().take(MAX_ALTERNATIVES).collect(),
            });
            seen.insert(decoded.clone());
            current = decoded;
            state = PeelState::Decoded;
        }

        if state == PeelState::Decoded && layers.len() == max_layers {
            state = PeelState::Exhausted;
        }
        debug!(total_layers = layers.len(), ?state, "peeling finished");

        let final_result = if layers.is_empty() {
            original.clone()
        } else {
            current
        };
        DecodingTrace::from_layers(original, layers, final_result)
    }
}

/// Syntactic admissibility test for single-format peeling
fn format_admissible(format: FormatKind, text: &str) -> bool {
    match format {
        FormatKind::Base64 => patterns::is_base64_shaped(text),
        FormatKind::Base32 => patterns::is_base32_shaped(text),
        FormatKind::Hex => patterns::is_hex_shaped(text) || patterns::is_binary_shaped(text),
        FormatKind::Binary => patterns::is_binary_shaped(text),
        FormatKind::Url => patterns::has_url_escape(text),
        FormatKind::Html => patterns::has_html_entity(text),
        FormatKind::Ascii => patterns::is_ascii_codes_shaped(text),
        FormatKind::Rot13 | FormatKind::Caesar { .. } => !text.trim().is_empty(),
        FormatKind::Morse => patterns::is_morse_shaped(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Confidence;
    use pretty_assertions::assert_eq;

    fn engine() -> DetectiveEngine {
        DetectiveEngine::default()
    }

    #[test]
    fn test_single_base64_layer() {
        let trace = engine().peel("SGVsbG8=");
        assert_eq!(trace.total_layers, 1);
        assert_eq!(trace.layers[0].format, FormatKind::Base64);
        assert_eq!(trace.final_result, "Hello");
    }

    #[test]
    fn test_empty_input_yields_empty_trace() {
        let trace = engine().peel("");
        assert_eq!(trace.total_layers, 0);
        assert_eq!(trace.final_result, "");
        assert_eq!(trace.overall_confidence, Confidence::None);
    }

    #[test]
    fn test_whitespace_only_input_yields_empty_trace() {
        let trace = engine().peel("   \n  ");
        assert_eq!(trace.total_layers, 0);
        assert_eq!(trace.final_result, "   \n  ");
    }

    #[test]
    fn test_trim_feeds_first_layer() {
        let trace = engine().peel("  SGVsbG8=\n");
        assert_eq!(trace.layers[0].input, "SGVsbG8=");
        assert_eq!(trace.original, "  SGVsbG8=\n");
    }

    #[test]
    fn test_rot13_cycle_stops_after_one_layer() {
        // ROT13 is its own inverse; without cycle detection the
        // engine would bounce Hello <-> Uryyb to the cap.
        let trace = engine().peel("Uryyb");
        assert_eq!(trace.total_layers, 1);
        assert_eq!(trace.layers[0].format, FormatKind::Rot13);
        assert_eq!(trace.final_result, "Hello");
    }

    #[test]
    fn test_fallback_to_second_candidate_on_failed_decode() {
        // Scores hex above ASCII codes, but the hex reading decodes
        // to non-UTF-8 bytes; the alternate candidate wins the layer.
        let trace = engine().peel("72 101 108 108 111");
        assert_eq!(trace.total_layers, 1);
        assert_eq!(trace.layers[0].format, FormatKind::Ascii);
        assert_eq!(trace.final_result, "Hello");
        assert!(trace.layers[0]
            .alternatives
            .iter()
            .any(|c| c.format == FormatKind::Hex));
    }

    #[test]
    fn test_alternatives_capped_at_three() {
        let trace = engine().peel("SGVsbG8=");
        assert!(trace.layers[0].alternatives.len() <= 3);
    }

    #[test]
    fn test_single_format_peeler_rejects_other_encodings() {
        let trace = engine().peel_format("48656c6c6f", FormatKind::Base32);
        assert_eq!(trace.total_layers, 0);
        assert_eq!(trace.final_result, "48656c6c6f");
    }

    #[test]
    fn test_single_format_peeler_unwraps_nested_base64() {
        // "CTF" wrapped three times
        let mut wrapped = "CTF".to_string();
        for _ in 0..3 {
            wrapped = codecs::encode(FormatKind::Base64, &wrapped);
        }
        let trace = engine().peel_format(&wrapped, FormatKind::Base64);
        assert_eq!(trace.total_layers, 3);
        assert_eq!(trace.final_result, "CTF");
        assert!(trace.layers.iter().all(|l| l.score == 100));
        assert_eq!(trace.overall_confidence, Confidence::High);
    }

    #[test]
    fn test_layer_cap_respected() {
        // Deeply nested Base64 with a cap below the nesting depth
        let mut wrapped = "flag".to_string();
        for _ in 0..6 {
            wrapped = codecs::encode(FormatKind::Base64, &wrapped);
        }
        let trace = engine().peel_format_with_limit(&wrapped, FormatKind::Base64, 4);
        assert_eq!(trace.total_layers, 4);
        assert_ne!(trace.final_result, "flag");
    }
}
