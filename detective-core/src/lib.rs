//! Encoding Detective core library
//!
//! Multi-layer encoding detection and decoding for CTF workflows:
//! per-format codecs, a heuristic format classifier, and the
//! layer-peeling engine that iteratively unwraps nested encodings
//! into a structured decoding trace.
//!
//! The engine is a pure function boundary: text in, [`DecodingTrace`]
//! out. Rendering, persistence, and transport belong to the caller.

pub mod codecs;
pub mod core;
pub mod detect;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    errors::DecodeError,
    models::{
        Confidence, DecodingTrace, DetectionCandidate, FormatKind, LayerRecord,
        MAX_DETECT_LAYERS, MAX_SINGLE_FORMAT_LAYERS,
    },
};
pub use detect::{Classifier, ScoringRules};
pub use engine::DetectiveEngine;

/// Result type used throughout the codec layer
pub type Result<T> = std::result::Result<T, DecodeError>;
