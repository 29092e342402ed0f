//! Core data models for the encoding detective

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum layers the heuristic detective will peel
pub const MAX_DETECT_LAYERS: usize = 20;

/// Maximum layers a single-format repeated decoder will peel
pub const MAX_SINGLE_FORMAT_LAYERS: usize = 50;

/// Closed enumeration of every encoding the engine understands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Base64,
    Base32,
    Hex,
    Binary,
    Url,
    Html,
    Ascii,
    Rot13,
    Morse,
    Caesar { shift: u8 },
}

impl FormatKind {
    /// Formats the classifier considers, in its fixed evaluation order.
    ///
    /// This order is a reproducibility contract: candidates with equal
    /// scores keep it, so two runs over the same input always produce
    /// the same trace. Caesar is excluded — it is only reachable by
    /// explicit request, never by detection.
    pub const DETECTABLE: [FormatKind; 9] = [
        FormatKind::Base64,
        FormatKind::Base32,
        FormatKind::Hex,
        FormatKind::Binary,
        FormatKind::Url,
        FormatKind::Html,
        FormatKind::Ascii,
        FormatKind::Rot13,
        FormatKind::Morse,
    ];

    /// Get human-readable description of the format
    pub fn description(&self) -> &'static str {
        match self {
            FormatKind::Base64 => "Base64 encoding",
            FormatKind::Base32 => "Base32 encoding (RFC 4648)",
            FormatKind::Hex => "Hexadecimal encoding",
            FormatKind::Binary => "Binary (8-bit groups)",
            FormatKind::Url => "URL percent-encoding",
            FormatKind::Html => "HTML entities",
            FormatKind::Ascii => "ASCII decimal codes",
            FormatKind::Rot13 => "ROT13 cipher",
            FormatKind::Morse => "Morse code",
            FormatKind::Caesar { .. } => "Caesar cipher",
        }
    }

    /// Check if the format is a letter-rotation cipher
    pub fn is_rotation(&self) -> bool {
        matches!(self, FormatKind::Rot13 | FormatKind::Caesar { .. })
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Base64 => write!(f, "Base64"),
            FormatKind::Base32 => write!(f, "Base32"),
            FormatKind::Hex => write!(f, "Hex"),
            FormatKind::Binary => write!(f, "Binary"),
            FormatKind::Url => write!(f, "URL"),
            FormatKind::Html => write!(f, "HTML"),
            FormatKind::Ascii => write!(f, "ASCII"),
            FormatKind::Rot13 => write!(f, "ROT13"),
            FormatKind::Morse => write!(f, "Morse"),
            FormatKind::Caesar { shift } => write!(f, "Caesar (shift: {})", shift),
        }
    }
}

/// Confidence bucket for a candidate or a whole trace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::None => write!(f, "None"),
            Confidence::Low => write!(f, "Low"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::High => write!(f, "High"),
        }
    }
}

/// A hypothesized format for a string, produced fresh per classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectionCandidate {
    pub format: FormatKind,
    pub score: u8,
    pub confidence: Confidence,
}

/// One successful decode step in a multi-step unwrapping sequence.
///
/// Immutable once appended to a trace; `layer` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayerRecord {
    pub layer: usize,
    pub format: FormatKind,
    pub confidence: Confidence,
    pub score: u8,
    pub input: String,
    pub output: String,
    /// Up to 3 top-scoring candidates considered for this layer
    pub alternatives: Vec<DetectionCandidate>,
}

/// The ordered record of all layers produced by one detection/decode run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodingTrace {
    pub original: String,
    pub layers: Vec<LayerRecord>,
    pub final_result: String,
    pub total_layers: usize,
    /// Distinct formats across layers, in first-seen order
    pub encodings_detected: Vec<FormatKind>,
    pub overall_confidence: Confidence,
}

impl DecodingTrace {
    /// Build a terminal trace from the peeled layers.
    ///
    /// `final_result` is the last layer's output, or the original
    /// (trimmed state feeds the layers, the untrimmed original is kept
    /// verbatim in `original`).
    pub fn from_layers(original: String, layers: Vec<LayerRecord>, final_result: String) -> Self {
        let total_layers = layers.len();

        let mut encodings_detected = Vec::new();
        for layer in &layers {
            if !encodings_detected.contains(&layer.format) {
                encodings_detected.push(layer.format);
            }
        }

        let overall_confidence = Self::aggregate_confidence(&layers);

        DecodingTrace {
            original,
            layers,
            final_result,
            total_layers,
            encodings_detected,
            overall_confidence,
        }
    }

    /// High iff every layer is High; Medium iff at least one layer is
    /// High (but not all); Low iff layers exist but none is High;
    /// None iff zero layers.
    fn aggregate_confidence(layers: &[LayerRecord]) -> Confidence {
        if layers.is_empty() {
            return Confidence::None;
        }
        let high = layers
            .iter()
            .filter(|l| l.confidence == Confidence::High)
            .count();
        if high == layers.len() {
            Confidence::High
        } else if high > 0 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Check if at least one layer was peeled
    pub fn is_decoded(&self) -> bool {
        self.total_layers > 0
    }

    /// Check if a given format appears anywhere in the trace
    pub fn detected(&self, format: FormatKind) -> bool {
        self.encodings_detected.contains(&format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(n: usize, format: FormatKind, confidence: Confidence) -> LayerRecord {
        LayerRecord {
            layer: n,
            format,
            confidence,
            score: 50,
            input: format!("in{}", n),
            output: format!("out{}", n),
            alternatives: vec![],
        }
    }

    #[test]
    fn test_empty_trace_has_no_confidence() {
        let trace = DecodingTrace::from_layers("abc".to_string(), vec![], "abc".to_string());
        assert_eq!(trace.total_layers, 0);
        assert_eq!(trace.overall_confidence, Confidence::None);
        assert!(!trace.is_decoded());
        assert!(trace.encodings_detected.is_empty());
    }

    #[test]
    fn test_all_high_layers_aggregate_high() {
        let layers = vec![
            layer(1, FormatKind::Base64, Confidence::High),
            layer(2, FormatKind::Hex, Confidence::High),
        ];
        let trace = DecodingTrace::from_layers("x".into(), layers, "y".into());
        assert_eq!(trace.overall_confidence, Confidence::High);
    }

    #[test]
    fn test_mixed_high_layers_aggregate_medium() {
        let layers = vec![
            layer(1, FormatKind::Base64, Confidence::High),
            layer(2, FormatKind::Rot13, Confidence::Low),
        ];
        let trace = DecodingTrace::from_layers("x".into(), layers, "y".into());
        assert_eq!(trace.overall_confidence, Confidence::Medium);
    }

    #[test]
    fn test_no_high_layers_aggregate_low() {
        let layers = vec![
            layer(1, FormatKind::Rot13, Confidence::Low),
            layer(2, FormatKind::Ascii, Confidence::Medium),
        ];
        let trace = DecodingTrace::from_layers("x".into(), layers, "y".into());
        assert_eq!(trace.overall_confidence, Confidence::Low);
    }

    #[test]
    fn test_encodings_detected_deduplicates_in_first_seen_order() {
        let layers = vec![
            layer(1, FormatKind::Base64, Confidence::High),
            layer(2, FormatKind::Base64, Confidence::High),
            layer(3, FormatKind::Hex, Confidence::High),
        ];
        let trace = DecodingTrace::from_layers("x".into(), layers, "y".into());
        assert_eq!(
            trace.encodings_detected,
            vec![FormatKind::Base64, FormatKind::Hex]
        );
        assert!(trace.detected(FormatKind::Hex));
        assert!(!trace.detected(FormatKind::Morse));
    }

    #[test]
    fn test_format_display_names() {
        assert_eq!(FormatKind::Base64.to_string(), "Base64");
        assert_eq!(FormatKind::Caesar { shift: 5 }.to_string(), "Caesar (shift: 5)");
        assert!(FormatKind::Rot13.is_rotation());
        assert!(!FormatKind::Hex.is_rotation());
    }

    #[test]
    fn test_trace_serializes_to_plain_json() {
        let layers = vec![layer(1, FormatKind::Base64, Confidence::High)];
        let trace = DecodingTrace::from_layers("aGk=".into(), layers, "hi".into());
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["total_layers"], 1);
        assert_eq!(json["final_result"], "hi");
        assert_eq!(json["overall_confidence"], "High");
    }
}
